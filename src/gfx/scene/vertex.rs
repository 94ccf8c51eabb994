//! # Vertex Data Structures
//!
//! The fixed 8-float vertex record shared by every mesh and mutable item.
//! Field order is part of the GPU contract and must not change.

/// A vertex with position, normal and texture coordinates.
///
/// # Memory Layout
///
/// `#[repr(C)]` keeps the float order `position[3] normal[3] tex_coords[2]`,
/// which is what [`Vertex::desc`] describes to the GPU.
///
/// # Examples
///
/// ```
/// use sceneview::gfx::scene::Vertex;
///
/// let vertex = Vertex::new([0.0, 1.0, 0.0]);
/// assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
/// assert_eq!(vertex.tex_coords, [0.0, 0.0]);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Normal vector [nx, ny, nz], not necessarily unit length
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]
    pub tex_coords: [f32; 2],
}

/// Normal assigned when none is computed.
pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

impl Vertex {
    /// Vertex at `position` with the default normal and zero texture coordinates.
    pub fn new(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: DEFAULT_NORMAL,
            tex_coords: [0.0; 2],
        }
    }

    pub fn with_normal(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            tex_coords: [0.0; 2],
        }
    }

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: position (Float32x3)
    /// - Attribute 1: normal (Float32x3)
    /// - Attribute 2: texture coordinates (Float32x2)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
