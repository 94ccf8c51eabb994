//! Shader source catalog.
//!
//! The catalog only maps pipe ids to WGSL sources; compiling them into
//! pipelines is left to the render driver.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::gfx::defaults::pipes;
use crate::gfx::scene::PipeId;

macro_rules! wgsl {
    ($($file:literal),+ $(,)?) => {
        concat!($(include_str!(concat!("shaders/", $file)), "\n"),+)
    };
}

pub const SCENE_VERTEX: &str = wgsl!("common.wgsl", "scene_vs.wgsl");
pub const FLAT_VERTEX: &str = wgsl!("common.wgsl", "flat_vs.wgsl");
pub const LIT_FRAGMENT: &str = wgsl!("common.wgsl", "lighting.wgsl", "lit_fs.wgsl");
pub const LIT_TEXTURED_FRAGMENT: &str =
    wgsl!("common.wgsl", "lighting.wgsl", "lit_textured_fs.wgsl");
pub const COLOR_FRAGMENT: &str = wgsl!("common.wgsl", "color_fs.wgsl");
pub const COLOR_TEXTURED_FRAGMENT: &str = wgsl!("common.wgsl", "color_textured_fs.wgsl");
pub const SELECTION_FRAGMENT: &str = wgsl!("common.wgsl", "selection_fs.wgsl");

/// Entry points shared by every default source.
pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Vertex and fragment stage sources of one pipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSource {
    pub const fn from_static(vertex: &'static str, fragment: &'static str) -> Self {
        Self {
            vertex: Cow::Borrowed(vertex),
            fragment: Cow::Borrowed(fragment),
        }
    }

    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: Cow::Owned(vertex.into()),
            fragment: Cow::Owned(fragment.into()),
        }
    }

    /// Wraps the vertex stage for `wgpu::Device::create_shader_module`.
    pub fn vertex_module(&self) -> wgpu::ShaderModuleDescriptor<'_> {
        wgpu::ShaderModuleDescriptor {
            label: Some("sceneview vertex"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(self.vertex.as_ref())),
        }
    }

    pub fn fragment_module(&self) -> wgpu::ShaderModuleDescriptor<'_> {
        wgpu::ShaderModuleDescriptor {
            label: Some("sceneview fragment"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(self.fragment.as_ref())),
        }
    }
}

/// Pipe id → shader sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderCatalog {
    sources: BTreeMap<PipeId, ShaderSource>,
}

impl ShaderCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pipe_id: PipeId, source: ShaderSource) {
        self.sources.insert(pipe_id, source);
    }

    pub fn with_source(mut self, pipe_id: PipeId, source: ShaderSource) -> Self {
        self.insert(pipe_id, source);
        self
    }

    pub fn get(&self, pipe_id: PipeId) -> Option<&ShaderSource> {
        let source = self.sources.get(&pipe_id);
        if source.is_none() {
            log::warn!("no shader registered for pipe {}", pipe_id);
        }
        source
    }

    pub fn iter(&self) -> impl Iterator<Item = (PipeId, &ShaderSource)> {
        self.sources.iter().map(|(id, source)| (*id, source))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources for every default pipe. "Last" pipes reuse the shaders of
    /// their base pipe; they only differ in draw order.
    pub fn with_defaults() -> Self {
        let pipe_2d = ShaderSource::from_static(SCENE_VERTEX, COLOR_FRAGMENT);
        let pipe_3d = ShaderSource::from_static(SCENE_VERTEX, LIT_FRAGMENT);
        let pipe_2d_textured = ShaderSource::from_static(SCENE_VERTEX, COLOR_TEXTURED_FRAGMENT);
        let pipe_3d_textured = ShaderSource::from_static(SCENE_VERTEX, LIT_TEXTURED_FRAGMENT);
        let textured_flat = ShaderSource::from_static(FLAT_VERTEX, COLOR_TEXTURED_FRAGMENT);
        let selection = ShaderSource::from_static(SCENE_VERTEX, SELECTION_FRAGMENT);

        Self::new()
            .with_source(pipes::PIPE_2D, pipe_2d.clone())
            .with_source(pipes::PIPE_3D, pipe_3d.clone())
            .with_source(pipes::PIPE_2D_TEXTURED, pipe_2d_textured.clone())
            .with_source(pipes::PIPE_3D_TEXTURED, pipe_3d_textured.clone())
            .with_source(pipes::TEXTURED_FLAT, textured_flat.clone())
            .with_source(pipes::SELECTION, selection)
            .with_source(pipes::PIPE_2D_LAST, pipe_2d)
            .with_source(pipes::PIPE_3D_LAST, pipe_3d)
            .with_source(pipes::TEXTURED_FLAT_LAST, textured_flat)
            .with_source(pipes::PIPE_2D_TEXTURED_LAST, pipe_2d_textured)
            .with_source(pipes::PIPE_3D_TEXTURED_LAST, pipe_3d_textured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_covers_every_pipe() {
        let catalog = ShaderCatalog::with_defaults();
        assert_eq!(catalog.len(), 11);
        for pipe in 0..=10 {
            let source = catalog.get(pipe).unwrap();
            assert!(source.vertex.contains(VERTEX_ENTRY));
            assert!(source.fragment.contains(FRAGMENT_ENTRY));
        }
    }

    #[test]
    fn test_last_pipes_share_sources() {
        let catalog = ShaderCatalog::with_defaults();
        assert_eq!(catalog.get(pipes::PIPE_3D), catalog.get(pipes::PIPE_3D_LAST));
        assert_eq!(catalog.get(pipes::TEXTURED_FLAT), catalog.get(pipes::TEXTURED_FLAT_LAST));
    }

    #[test]
    fn test_textured_fragments_sample_texture() {
        assert!(LIT_TEXTURED_FRAGMENT.contains("textureSample"));
        assert!(!LIT_FRAGMENT.contains("textureSample"));
        assert!(SELECTION_FRAGMENT.contains("item.color"));
    }

    #[test]
    fn test_unknown_pipe() {
        assert!(ShaderCatalog::new().get(99).is_none());
    }
}
