//! # Camera Module
//!
//! Scene camera with orthographic and perspective projections, range limits,
//! screen/world conversions and pointer manipulators.

pub mod camera;
pub mod camera_utils;
pub mod manipulator;
pub mod projection;
pub mod range;

// Re-export main types
pub use camera::{Camera, CameraListener, CameraSettings, MovementDirection};
pub use camera_utils::{CameraUniform, OPENGL_TO_WGPU_MATRIX};
pub use manipulator::{FixedManipulator, Manipulator, ManipulatorState, ScreenRect, StandardManipulator};
pub use projection::{OrthographicProjection, PerspectiveProjection, Projection, ProjectionType};
pub use range::{Range, RangeLimits};
