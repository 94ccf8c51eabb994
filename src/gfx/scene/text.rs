//! Text overlay records. Painting them is up to the host UI.

use cgmath::Vector3;

use super::item::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    /// Anchor in world coordinates.
    pub position: Vector3<f32>,
    pub color: Color,
    /// Pixel offset from the projected anchor.
    pub shift: (i32, i32),
    /// Keep the label inside the viewport when its anchor leaves it.
    pub hold_in_screen: bool,
}

impl TextItem {
    pub fn new(text: impl Into<String>, position: Vector3<f32>) -> Self {
        Self {
            text: text.into(),
            position,
            color: Color::default(),
            shift: (0, 0),
            hold_in_screen: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
