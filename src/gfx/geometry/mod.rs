//! # Procedural Geometry Generation
//!
//! This module turns parametric figure descriptions into flat point lists
//! (triangle soup), eliminating the need for external model files for the
//! shapes a scene is usually built from.
//!
//! ## Supported Figures
//!
//! - **Stripe / Tube**: side walls between two point loops, optionally capped
//! - **Cube / Cylinder / Cone**: circle-based solids with fan caps
//! - **Sphere**: stacked latitude bands
//! - **Path / Extrusion**: flat ribbons following a path
//! - **Grid / Wire box**: line-segment pairs for line-mode rendering
//! - **Field of view**: flat pie/annulus outline
//!
//! ## Usage
//!
//! ```rust
//! use sceneview::gfx::geometry::{generate, Figure, FigureCube, FigureSphere, Generate};
//!
//! // Generate through the descriptor itself
//! let cube = FigureCube { size: 1.0 }.generate();
//! assert_eq!(cube.len() % 3, 0);
//!
//! // Or through the closed figure enum
//! let sphere = generate(&Figure::Sphere(FigureSphere { radius: 0.5, h_sides: 16, v_sides: 8 }));
//! assert_eq!(sphere.len() % 3, 0);
//! ```

pub mod figures;
pub mod generator;
pub mod primitives;

pub use figures::*;
pub use generator::{generate, Generate};

/// A point in 3D space: `[x, y, z]`.
pub type Point3 = [f32; 3];

/// An ordered list of points. Triangle figures emit multiples of 3,
/// line figures emit segment endpoint pairs.
pub type PointPack = Vec<Point3>;

/// A point in screen space (pixels, top-left origin).
pub type Point2 = (i32, i32);
