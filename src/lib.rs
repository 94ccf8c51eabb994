// src/lib.rs
//! Sceneview 3D Scene Library
//!
//! A scene-graph and render-state library: procedural figure meshes, a
//! range-limited camera with switchable projections, pipe-batched items and
//! color-coded GPU picking. GPU work is left to a render driver which consumes
//! the vertex buffer, shader catalog and draw plan produced here.

pub mod gfx;
pub mod logging;
pub mod prelude;

// Re-export main types for convenience
pub use gfx::camera::Camera;
pub use gfx::scene::Scene;
