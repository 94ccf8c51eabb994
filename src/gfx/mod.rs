//! # Graphics Module
//!
//! Scene-graph and render-state side of sceneview. Nothing in here owns a
//! window or a surface; a render driver consumes what these modules produce.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Parametric figures turned into point lists
//! - **Scene** ([`scene`]) - Meshes, items grouped by pipe, composite objects
//! - **Camera** ([`camera`]) - Range-limited camera, projections, manipulators
//! - **Picking** ([`picking`]) - Color-coded item ids, hover and selection state
//! - **Rendering** ([`rendering`]) - Draw plans, uniform blocks, pipeline cache
//! - **Resources** ([`resources`]) - Shader and texture catalogs, OBJ loading
//! - **Defaults** ([`defaults`]) - Built-in ids, colors, light and camera
//!
//! ## Usage
//!
//! ```
//! use sceneview::gfx::camera::Camera;
//! use sceneview::gfx::defaults;
//! use sceneview::gfx::picking::PickingState;
//! use sceneview::gfx::rendering::{RenderMode, RenderPlan};
//! use sceneview::gfx::scene::{Item, Scene};
//!
//! let mut scene = Scene::new();
//! scene.add_item(Item::from_mesh(defaults::meshes::SPHERE).with_id(7));
//!
//! let camera = Camera::default();
//! let picking = PickingState::new();
//! let plan = RenderPlan::build(&mut scene, &camera, &picking, RenderMode::Standard);
//! assert_eq!(plan.draw_calls.len(), 1);
//! ```

pub mod camera;
pub mod defaults;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use picking::PickingState;
pub use rendering::RenderPlan;
pub use scene::Scene;
