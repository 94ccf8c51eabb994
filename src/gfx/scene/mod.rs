//! # Scene Management Module
//!
//! Scene data consumed by a render driver: meshes concatenated into one
//! shared vertex buffer, items grouped by pipe, and composite objects with
//! lazy self-update.
//!
//! ## Key Components
//!
//! - [`Scene`] - Mesh catalog, item and object arenas, light, shaders, textures
//! - [`Item`] - One renderable entity referencing a mesh or owning vertices
//! - [`SceneObject`] - Hierarchy node with optional [`ObjectBehavior`]
//! - [`Mesh`] - Immutable geometry generated from figures or loaded models
//! - [`Vertex`] - 8-float GPU vertex record
//!
//! ## Usage
//!
//! ```
//! use sceneview::gfx::defaults;
//! use sceneview::gfx::scene::{Color, Item, Scene};
//!
//! let mut scene = Scene::new();
//! scene.add_item(
//!     Item::from_mesh(defaults::meshes::CUBE)
//!         .with_id(1)
//!         .with_color(Color::rgb(0.2, 0.6, 1.0)),
//! );
//!
//! let cube = scene.geometry_data(defaults::meshes::CUBE);
//! assert!(cube.count > 0);
//! ```

pub mod item;
pub mod light;
pub mod mesh;
pub mod object;
pub mod scene;
pub mod text;
pub mod vertex;

// Re-export main types
pub use item::{
    Capability, Color, DrawMode, Item, ItemGeometry, ItemId, MeshId, PipeId, RenderAttributes,
    RenderParameters, TextureId,
};
pub use light::Light;
pub use mesh::Mesh;
pub use object::{ItemKey, ObjectBehavior, ObjectItems, ObjectKey, SceneObject};
pub use scene::{GeometryData, MeshCatalog, Scene, SceneStatistics};
pub use text::TextItem;
pub use vertex::Vertex;
