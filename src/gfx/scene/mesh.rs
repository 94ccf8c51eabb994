//! Static mesh: a point list plus the vertices derived from it.

use cgmath::Vector3;

use super::vertex::Vertex;
use crate::gfx::geometry::{generate, Figure, PointPack};

/// Immutable geometry referenced by items through a mesh id.
///
/// All derivation happens at construction; a mesh never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    points: PointPack,
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new(points: PointPack, generate_normals: bool) -> Self {
        Self::from_points(points, 0.0, generate_normals)
    }

    /// Builds a mesh from `points`, first shifting every point by `z_offset`.
    ///
    /// With `generate_normals` the points are read as a triangle list and
    /// each triangle gets the flat, unnormalized normal
    /// `(p2 - p1) × (p3 - p1)`. One or two trailing points that do not form
    /// a full triangle produce no vertices. Without it, every point becomes a
    /// vertex with the default normal.
    pub fn from_points(mut points: PointPack, z_offset: f32, generate_normals: bool) -> Self {
        if z_offset != 0.0 {
            for p in &mut points {
                p[2] += z_offset;
            }
        }

        let vertices = if generate_normals {
            points
                .chunks_exact(3)
                .flat_map(|t| {
                    let normal = face_normal(t[0], t[1], t[2]);
                    t.iter().map(move |&p| Vertex::with_normal(p, normal))
                })
                .collect()
        } else {
            points.iter().map(|&p| Vertex::new(p)).collect()
        };

        Self { points, vertices }
    }

    /// Generates `figure` and builds the mesh from its points.
    pub fn from_figure(figure: &Figure, generate_normals: bool) -> Self {
        Self::new(generate(figure), generate_normals)
    }

    /// Stores prebuilt vertices verbatim.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self {
            points: PointPack::new(),
            vertices,
        }
    }

    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Unnormalized face normal of triangle `p1 p2 p3`.
pub fn face_normal(p1: [f32; 3], p2: [f32; 3], p3: [f32; 3]) -> [f32; 3] {
    let edge1 = Vector3::from(p2) - Vector3::from(p1);
    let edge2 = Vector3::from(p3) - Vector3::from(p1);
    edge1.cross(edge2).into()
}
