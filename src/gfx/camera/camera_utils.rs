use cgmath::{Matrix4, SquareMatrix};

use super::camera::Camera;

/// Maps OpenGL clip depth (-1..1) to the wgpu range (0..1).
///
/// Camera math stays in OpenGL conventions; only GPU-facing uniforms
/// premultiply this.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Projection x view, already converted to wgpu clip depth.
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        let mut uniform = Self::default();
        uniform.update_view_proj(camera);
        uniform
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_position = camera.position().extend(1.0).into();
        self.view_proj = convert_matrix4_to_array(OPENGL_TO_WGPU_MATRIX * camera.transformation());
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

/// Column-major array layout expected by WGSL `mat4x4<f32>`.
pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
