//! Lazily created render pipelines keyed by pipe and draw state.

use std::collections::HashMap;

use super::plan::DrawCall;
use crate::gfx::resources::shaders::{FRAGMENT_ENTRY, VERTEX_ENTRY};
use crate::gfx::resources::ShaderCatalog;
use crate::gfx::scene::{Capability, PipeId, Vertex};

/// Everything that selects a distinct wgpu pipeline.
///
/// Line smoothing and line width have no wgpu counterpart and do not take
/// part in the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub pipe_id: PipeId,
    pub topology: wgpu::PrimitiveTopology,
    pub depth_test: bool,
    pub cull_face: bool,
    pub blend: bool,
}

impl PipelineKey {
    pub fn from_draw_call(call: &DrawCall<'_>) -> Self {
        Self {
            pipe_id: call.pipe_id,
            topology: call.mode.topology(),
            depth_test: call.is_enabled(Capability::DepthTest),
            cull_face: call.is_enabled(Capability::CullFace),
            blend: call.is_enabled(Capability::Blend),
        }
    }

    pub fn primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: self.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: if self.cull_face {
                Some(wgpu::Face::Back)
            } else {
                None
            },
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        }
    }

    pub fn depth_stencil_state(&self, format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format,
            depth_write_enabled: self.depth_test,
            depth_compare: if self.depth_test {
                wgpu::CompareFunction::Less
            } else {
                wgpu::CompareFunction::Always
            },
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }

    pub fn blend_state(&self) -> Option<wgpu::BlendState> {
        if self.blend {
            Some(wgpu::BlendState::ALPHA_BLENDING)
        } else {
            Some(wgpu::BlendState::REPLACE)
        }
    }
}

/// Pipelines for one color target, created on first use.
pub struct PipelineCache {
    color_format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl PipelineCache {
    pub fn new(color_format: wgpu::TextureFormat, depth_format: Option<wgpu::TextureFormat>) -> Self {
        Self {
            color_format,
            depth_format,
            pipelines: HashMap::new(),
        }
    }

    /// Returns the pipeline for `key`, building it if needed. `None` when the
    /// catalog has no shaders for the pipe.
    pub fn get_or_create(
        &mut self,
        device: &wgpu::Device,
        shaders: &ShaderCatalog,
        key: PipelineKey,
        layouts: &[&wgpu::BindGroupLayout],
    ) -> Option<&wgpu::RenderPipeline> {
        if !self.pipelines.contains_key(&key) {
            let pipeline = self.create_pipeline(device, shaders, key, layouts)?;
            self.pipelines.insert(key, pipeline);
        }
        self.pipelines.get(&key)
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Drops every pipeline, e.g. after the surface format changed.
    pub fn clear(&mut self) {
        self.pipelines.clear();
    }

    fn create_pipeline(
        &self,
        device: &wgpu::Device,
        shaders: &ShaderCatalog,
        key: PipelineKey,
        layouts: &[&wgpu::BindGroupLayout],
    ) -> Option<wgpu::RenderPipeline> {
        let source = shaders.get(key.pipe_id)?;
        log::debug!("creating pipeline for {:?}", key);

        let vertex_module = device.create_shader_module(source.vertex_module());
        let fragment_module = device.create_shader_module(source.fragment_module());

        let label = format!("Pipe {} Pipeline", key.pipe_id);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Layout", label)),
            bind_group_layouts: layouts,
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.color_format,
                    blend: key.blend_state(),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: key.primitive_state(),
            depth_stencil: self.depth_format.map(|format| key.depth_stencil_state(format)),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Some(pipeline)
    }
}
