//! # Scene Items
//!
//! An [`Item`] is one renderable entity: a color, a transform, draw state and
//! either a reference to a shared mesh or its own mutable vertex list.

use std::rc::Rc;

use cgmath::{Matrix4, SquareMatrix};

use super::vertex::Vertex;
use crate::gfx::defaults;
use crate::gfx::picking::ITEM_ID_MASK;
use crate::gfx::resources::TextureImage;

pub type MeshId = u32;
pub type PipeId = u32;
pub type TextureId = u32;

/// Item identifier used for picking. Only the low 24 bits are significant;
/// `0` marks an item that can be neither hovered nor selected.
pub type ItemId = u32;

/// RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from a `0xRRGGBB` value.
    pub fn from_hex(rgb: u32) -> Self {
        Self::from_rgb8(((rgb >> 16) & 0xff) as u8, ((rgb >> 8) & 0xff) as u8, (rgb & 0xff) as u8)
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Brightens the color by `factor` percent in HSV space.
    ///
    /// `100` returns the color unchanged. When the value channel overflows,
    /// the excess is taken out of the saturation, so saturated colors fade
    /// towards white.
    pub fn lighter(self, factor: u32) -> Self {
        if factor == 100 {
            return self;
        }

        let (h, mut s, mut v) = self.to_hsv();
        v *= factor as f32 / 100.0;
        if v > 1.0 {
            s = (s - (v - 1.0)).max(0.0);
            v = 1.0;
        }

        let (r, g, b) = hsv_to_rgb(h, s, v);
        Self { r, g, b, a: self.a }
    }

    fn to_hsv(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let v = max;
        let s = if max > 0.0 { delta / max } else { 0.0 };
        let h = if delta <= f32::EPSILON {
            0.0
        } else if max == self.r {
            60.0 * ((self.g - self.b) / delta).rem_euclid(6.0)
        } else if max == self.g {
            60.0 * ((self.b - self.r) / delta + 2.0)
        } else {
            60.0 * ((self.r - self.g) / delta + 4.0)
        };

        (h, s, v)
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (r + m, g + m, b + m)
}

impl Default for Color {
    fn default() -> Self {
        defaults::colors::DEFAULT
    }
}

/// Primitive assembly mode of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    Points,
    Lines,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
}

impl DrawMode {
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            DrawMode::Points => wgpu::PrimitiveTopology::PointList,
            DrawMode::Lines => wgpu::PrimitiveTopology::LineList,
            DrawMode::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            DrawMode::Triangles => wgpu::PrimitiveTopology::TriangleList,
            DrawMode::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }
}

/// Fixed-function state toggled around an item's draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    DepthTest,
    CullFace,
    LineSmooth,
    Blend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderAttributes {
    pub line_width: f32,
    pub enable: Vec<Capability>,
    pub disable: Vec<Capability>,
}

impl Default for RenderAttributes {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            enable: Vec::new(),
            disable: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderParameters {
    pub mode: DrawMode,
    pub alpha: f32,
    pub attributes: RenderAttributes,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            mode: DrawMode::Triangles,
            alpha: 1.0,
            attributes: RenderAttributes::default(),
        }
    }
}

impl RenderParameters {
    pub fn with_mode(mut self, mode: DrawMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.attributes.line_width = line_width;
        self
    }

    pub fn enabling(mut self, capability: Capability) -> Self {
        self.attributes.enable.push(capability);
        self
    }

    pub fn disabling(mut self, capability: Capability) -> Self {
        self.attributes.disable.push(capability);
        self
    }
}

/// Where an item's vertices come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemGeometry {
    /// A range of the scene's shared vertex buffer.
    Mesh(MeshId),
    /// Vertices owned by the item, re-uploaded on every draw.
    Mutable(Vec<Vertex>),
}

/// One renderable entity.
#[derive(Debug, Clone)]
pub struct Item {
    pub visible: bool,
    pub id: ItemId,
    pub color: Color,
    pub transform: Matrix4<f32>,
    pub render_parameters: RenderParameters,
    pub pipe_id: PipeId,
    pub texture_id: TextureId,
    /// Bound texture; takes precedence over the scene catalog entry.
    pub texture: Option<Rc<TextureImage>>,
    pub geometry: ItemGeometry,
}

impl Item {
    /// Item drawing a shared mesh.
    pub fn from_mesh(mesh_id: MeshId) -> Self {
        Self::with_geometry(ItemGeometry::Mesh(mesh_id))
    }

    /// Item owning its vertices.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self::with_geometry(ItemGeometry::Mutable(vertices))
    }

    fn with_geometry(geometry: ItemGeometry) -> Self {
        Self {
            visible: true,
            id: 0,
            color: Color::default(),
            transform: Matrix4::identity(),
            render_parameters: RenderParameters::default(),
            pipe_id: defaults::pipes::PIPE_3D,
            texture_id: defaults::textures::COMMON,
            texture: None,
            geometry,
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_render_parameters(mut self, render_parameters: RenderParameters) -> Self {
        self.render_parameters = render_parameters;
        self
    }

    pub fn with_pipe(mut self, pipe_id: PipeId) -> Self {
        self.pipe_id = pipe_id;
        self
    }

    pub fn with_texture_id(mut self, texture_id: TextureId) -> Self {
        self.texture_id = texture_id;
        self
    }

    pub fn with_texture(mut self, texture: Rc<TextureImage>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn is_mutable_geometry(&self) -> bool {
        matches!(self.geometry, ItemGeometry::Mutable(_))
    }

    pub fn mesh_id(&self) -> Option<MeshId> {
        match self.geometry {
            ItemGeometry::Mesh(id) => Some(id),
            ItemGeometry::Mutable(_) => None,
        }
    }

    /// Mutable vertex list, if the item owns one.
    pub fn vertices_mut(&mut self) -> Option<&mut Vec<Vertex>> {
        match &mut self.geometry {
            ItemGeometry::Mutable(vertices) => Some(vertices),
            ItemGeometry::Mesh(_) => None,
        }
    }

    /// `true` when the item takes part in hovering and selection.
    pub fn is_pickable(&self) -> bool {
        self.id & ITEM_ID_MASK != 0
    }
}
