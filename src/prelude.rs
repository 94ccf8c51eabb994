//! # Sceneview Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use sceneview::prelude::*;
//!
//! let mut scene = Scene::new();
//! let id = scene.add_item(Item::from_mesh(meshes::CUBE).with_color(Color::YELLOW));
//! assert!(scene.item(id).is_some());
//! ```

// Scene
pub use crate::gfx::scene::{
    Capability, Color, DrawMode, Item, ItemId, Light, Mesh, ObjectBehavior, RenderParameters,
    Scene, SceneObject, TextItem, Vertex,
};

// Geometry
pub use crate::gfx::geometry::{generate, Figure, Generate, PointPack};

// Camera and interaction
pub use crate::gfx::camera::{
    Camera, CameraSettings, Manipulator, MovementDirection, ProjectionType, Range, RangeLimits,
    StandardManipulator,
};
pub use crate::gfx::picking::{PickEvent, PickRequest, PickingState};

// Rendering
pub use crate::gfx::rendering::{RenderMode, RenderPlan};

// Built-in catalog ids
pub use crate::gfx::defaults::{meshes, pipes, textures};

pub use crate::logging::{init_logging, LoggingConfig};

// Common external math types
pub use cgmath::{InnerSpace, Matrix4, Point3, Vector3, Zero};
