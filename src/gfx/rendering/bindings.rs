//! Bind group layouts and uniform buffers of the scene pipes.
//!
//! Group 0 holds the [`FrameUniform`], group 1 the [`ItemUniform`] and the
//! textured pipes add a texture + sampler pair at group 2.

use std::marker::PhantomData;

use super::uniforms::{FrameUniform, ItemUniform};
use crate::gfx::resources::TextureResource;
use crate::gfx::scene::PipeId;
use crate::gfx::defaults::pipes;

pub const FRAME_GROUP: u32 = 0;
pub const ITEM_GROUP: u32 = 1;
pub const TEXTURE_GROUP: u32 = 2;

/// Whether the pipe's fragment stage samples a texture at [`TEXTURE_GROUP`].
pub fn is_textured_pipe(pipe_id: PipeId) -> bool {
    matches!(
        pipe_id,
        pipes::TEXTURED_FLAT
            | pipes::PIPE_2D_TEXTURED
            | pipes::PIPE_3D_TEXTURED
            | pipes::TEXTURED_FLAT_LAST
            | pipes::PIPE_2D_TEXTURED_LAST
            | pipes::PIPE_3D_TEXTURED_LAST
    )
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// The three layouts shared by every pipe.
pub struct SceneBindGroupLayouts {
    pub frame: wgpu::BindGroupLayout,
    pub item: wgpu::BindGroupLayout,
    pub texture: wgpu::BindGroupLayout,
}

impl SceneBindGroupLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let frame = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[uniform_entry(0)],
        });
        let item = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Item Bind Group Layout"),
            entries: &[uniform_entry(0)],
        });
        let texture = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        Self {
            frame,
            item,
            texture,
        }
    }

    /// Layouts in group order for `pipe_id`.
    pub fn for_pipe(&self, pipe_id: PipeId) -> Vec<&wgpu::BindGroupLayout> {
        if is_textured_pipe(pipe_id) {
            vec![&self.frame, &self.item, &self.texture]
        } else {
            vec![&self.frame, &self.item]
        }
    }

    pub fn texture_bind_group(&self, device: &wgpu::Device, texture: &TextureResource) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout: &self.texture,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }
}

/// Uniform buffer of one `Content` block that skips unchanged writes.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    previous_content: Vec<u8>,
    content_type: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group,
            previous_content: Vec::new(),
            content_type: PhantomData,
        }
    }

    pub fn update_content(&mut self, queue: &wgpu::Queue, content: &Content) {
        let bytes = bytemuck::bytes_of(content);
        if self.previous_content == bytes {
            return;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
        self.previous_content = bytes.to_vec();
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

pub type FrameBuffer = UniformBuffer<FrameUniform>;
pub type ItemBuffer = UniformBuffer<ItemUniform>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textured_pipes() {
        assert!(is_textured_pipe(pipes::PIPE_3D_TEXTURED));
        assert!(is_textured_pipe(pipes::TEXTURED_FLAT_LAST));
        assert!(!is_textured_pipe(pipes::PIPE_3D));
        assert!(!is_textured_pipe(pipes::SELECTION));
    }
}
