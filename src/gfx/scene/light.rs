use cgmath::Vector3;

use super::item::Color;
use crate::gfx::defaults;

/// Directional light used by the lit pipes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub direction: Vector3<f32>,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl Default for Light {
    fn default() -> Self {
        defaults::lights::default_light()
    }
}
