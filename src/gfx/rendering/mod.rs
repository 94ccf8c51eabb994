// src/gfx/rendering/mod.rs
//! Render-driver facing output
//!
//! Draw plans per pass, uniform blocks, bind group layouts and the pipeline
//! cache. Surfaces, encoders and submission stay with the driver.

pub mod bindings;
pub mod pipeline;
pub mod plan;
pub mod uniforms;

// Re-export main types
pub use bindings::{SceneBindGroupLayouts, UniformBuffer};
pub use pipeline::{PipelineCache, PipelineKey};
pub use plan::{
    highlight_factor, picking_attributes, standard_attributes, DrawCall, DrawGeometry, RenderMode,
    RenderPlan,
};
pub use uniforms::{FrameUniform, ItemUniform};
