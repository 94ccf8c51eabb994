//! External model loading.
//!
//! Wavefront OBJ files are read through `tobj` and expanded into a flat
//! triangle list of [`Vertex`] records, ready to become a mesh or the
//! vertices of a mutable item.

use std::path::Path;

use thiserror::Error;

use crate::gfx::scene::mesh::face_normal;
use crate::gfx::scene::Vertex;

/// Errors raised while loading models or textures.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

pub struct ModelLoader;

impl ModelLoader {
    /// Loads `path` into a vertex list.
    ///
    /// Returns an empty list when the format is unsupported or the file
    /// cannot be read; there are no partial results.
    pub fn load(path: impl AsRef<Path>) -> Vec<Vertex> {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(vertices) => vertices,
            Err(err) => {
                log::warn!("failed to load model {}: {}", path.display(), err);
                Vec::new()
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Vec<Vertex>, LoadError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "obj" => Self::load_obj(path),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn load_obj(path: &Path) -> Result<Vec<Vertex>, LoadError> {
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut vertices = Vec::new();
        for model in &models {
            let mesh = &model.mesh;
            let has_normals = mesh.normals.len() == mesh.positions.len();
            let has_tex_coords = mesh.texcoords.len() / 2 == mesh.positions.len() / 3;

            let position = |i: usize| -> [f32; 3] {
                [mesh.positions[i * 3], mesh.positions[i * 3 + 1], mesh.positions[i * 3 + 2]]
            };

            for triangle in mesh.indices.chunks_exact(3) {
                let corners = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
                let flat = face_normal(position(corners[0]), position(corners[1]), position(corners[2]));

                for i in corners {
                    let normal = if has_normals {
                        [mesh.normals[i * 3], mesh.normals[i * 3 + 1], mesh.normals[i * 3 + 2]]
                    } else {
                        flat
                    };
                    let tex_coords = if has_tex_coords {
                        [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
                    } else {
                        [0.0; 2]
                    };

                    vertices.push(Vertex {
                        position: position(i),
                        normal,
                        tex_coords,
                    });
                }
            }
        }

        log::debug!(
            "loaded {} vertices from {} ({} models)",
            vertices.len(),
            path.display(),
            models.len()
        );

        Ok(vertices)
    }
}
