//! Figure descriptors consumed by the generator.
//!
//! Every descriptor is plain immutable data. Angles are in degrees.

use super::{Point3, PointPack};

/// Flat rectangle of `width` (X) by `length` (Y) centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureLine {
    pub width: f32,
    pub length: f32,
}

/// Side wall between two equal-length point loops.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FigureStripe {
    pub upper_shape: PointPack,
    pub lower_shape: PointPack,
}

/// Closed XY outline extruded symmetrically along Z and capped at both ends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FigureTube {
    pub shape: PointPack,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureCube {
    pub size: f32,
}

/// Box outline as line segments; `is_crossed` adds diagonal braces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureWireBox {
    pub size: f32,
    pub is_crossed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSphere {
    pub radius: f32,
    pub h_sides: u32,
    pub v_sides: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureCylinder {
    pub radius: f32,
    pub height: f32,
    pub sides: u32,
    /// Rotation of the first circle point, in degrees.
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureCone {
    pub radius: f32,
    pub height: f32,
    pub sides: u32,
}

/// Axis-aligned grid of lines in the XY plane, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureGrid {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub cell_size_x: f32,
    pub cell_size_y: f32,
}

/// Cross-section `shape` swept along `path`.
///
/// Only two-point shapes are swept (as a ribbon); any other shape yields the
/// path itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FigureExtrusion {
    pub path: PointPack,
    pub shape: PointPack,
}

/// Ribbon of constant `width` (offset along X) following `path`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FigurePath {
    pub path: PointPack,
    pub width: f32,
}

/// Sensor field-of-view wedge: a primary sector inside a wider secondary
/// sector, mounted at `mounting_point` and rotated by `mounting_angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureFov {
    pub mounting_point: [f32; 2],
    pub mounting_angle: f32,
    pub primary_range: f32,
    pub primary_fov: f32,
    pub secondary_range: f32,
    pub secondary_fov: f32,
}

/// Closed set of figure descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Line(FigureLine),
    Stripe(FigureStripe),
    Tube(FigureTube),
    Cube(FigureCube),
    WireBox(FigureWireBox),
    Sphere(FigureSphere),
    Cylinder(FigureCylinder),
    Cone(FigureCone),
    Grid(FigureGrid),
    Extrusion(FigureExtrusion),
    Path(FigurePath),
    Fov(FigureFov),
}

impl Figure {
    /// `true` for figures that emit line-segment pairs instead of triangles.
    pub fn is_line_figure(&self) -> bool {
        matches!(self, Figure::Grid(_) | Figure::WireBox(_))
    }
}

macro_rules! impl_figure_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Figure {
                fn from(figure: $ty) -> Self {
                    Figure::$variant(figure)
                }
            }
        )*
    };
}

impl_figure_from! {
    Line => FigureLine,
    Stripe => FigureStripe,
    Tube => FigureTube,
    Cube => FigureCube,
    WireBox => FigureWireBox,
    Sphere => FigureSphere,
    Cylinder => FigureCylinder,
    Cone => FigureCone,
    Grid => FigureGrid,
    Extrusion => FigureExtrusion,
    Path => FigurePath,
    Fov => FigureFov,
}

impl FigureStripe {
    pub fn new(upper_shape: PointPack, lower_shape: PointPack) -> Self {
        Self {
            upper_shape,
            lower_shape,
        }
    }
}

impl FigurePath {
    pub fn new(path: impl IntoIterator<Item = Point3>, width: f32) -> Self {
        Self {
            path: path.into_iter().collect(),
            width,
        }
    }
}
