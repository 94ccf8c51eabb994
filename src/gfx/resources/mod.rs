// src/gfx/resources/mod.rs
//! Scene resources
//!
//! Texture and shader catalogs, model loading and GPU texture upload.

pub mod model_loader;
pub mod shaders;
pub mod texture_resource;
pub mod textures;

// Re-export main types
pub use model_loader::{LoadError, ModelLoader};
pub use shaders::{ShaderCatalog, ShaderSource};
pub use texture_resource::TextureResource;
pub use textures::{TextureCatalog, TextureEntry, TextureImage};
