//! Uniform blocks shared with the WGSL pipes.
//!
//! Layouts MUST match the `Frame` and `Item` structs in `common.wgsl`.

use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::gfx::camera::camera_utils::{convert_matrix4_to_array, CameraUniform};
use crate::gfx::camera::Camera;
use crate::gfx::scene::{Color, Light};

/// Per-frame data, bound at group 0.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub light_direction: [f32; 4],
    pub light_ambient: [f32; 4],
    pub light_diffuse: [f32; 4],
    pub light_specular: [f32; 4],
}
// 64 + 5 * 16 = 144 bytes

impl FrameUniform {
    /// Frame data for `camera`. The light shines along `light.direction`.
    pub fn new(camera: &Camera, light: &Light) -> Self {
        let CameraUniform {
            view_position,
            view_proj,
        } = CameraUniform::from_camera(camera);

        Self {
            view_proj,
            view_position,
            light_direction: light.direction.extend(0.0).into(),
            light_ambient: light.ambient.to_array(),
            light_diffuse: light.diffuse.to_array(),
            light_specular: light.specular.to_array(),
        }
    }
}

/// Per-item data, bound at group 1.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ItemUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`.
    pub normal: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub alpha: f32,
}
// 64 + 64 + 12 + 4 = 144 bytes

impl ItemUniform {
    pub fn new(model: Matrix4<f32>, color: Color, alpha: f32) -> Self {
        // Singular transforms (flattening scales) keep the model matrix.
        let normal = model.invert().map(|m| m.transpose()).unwrap_or(model);
        Self {
            model: convert_matrix4_to_array(model),
            normal: convert_matrix4_to_array(normal),
            color: [color.r, color.g, color.b],
            alpha,
        }
    }
}
