//! Built-in catalog ids, colors and starting state.
//!
//! Everything here is plain code-level configuration: scenes, cameras and
//! items fall back to these values through their `Default` impls.

/// Ids of the meshes in [`meshes::default_meshes`].
pub mod meshes {
    use crate::gfx::geometry::{
        Figure, FigureCone, FigureCube, FigureCylinder, FigureGrid, FigureSphere,
    };
    use crate::gfx::scene::{Mesh, MeshCatalog, MeshId};

    pub const CUBE: MeshId = 0;
    pub const CONE: MeshId = 1;
    pub const CYLINDER: MeshId = 2;
    pub const SPHERE: MeshId = 3;
    pub const OCTAHEDRON: MeshId = 4;
    pub const GRID: MeshId = 5;

    /// Unit primitives plus a 500 x 500 ground grid.
    pub fn default_meshes() -> MeshCatalog {
        let lit = |figure: Figure| Mesh::from_figure(&figure, true);

        let mut catalog = MeshCatalog::new();
        catalog.insert(
            GRID,
            Mesh::from_figure(
                &Figure::Grid(FigureGrid {
                    min_x: -250.0,
                    max_x: 250.0,
                    min_y: -250.0,
                    max_y: 250.0,
                    cell_size_x: 1.0,
                    cell_size_y: 1.0,
                }),
                false,
            ),
        );
        catalog.insert(CUBE, lit(FigureCube { size: 1.0 }.into()));
        catalog.insert(
            CONE,
            lit(FigureCone {
                radius: 0.5,
                height: 1.0,
                sides: 32,
            }
            .into()),
        );
        catalog.insert(
            CYLINDER,
            lit(FigureCylinder {
                radius: 0.5,
                height: 1.0,
                sides: 32,
                angle: 0.0,
            }
            .into()),
        );
        catalog.insert(
            SPHERE,
            lit(FigureSphere {
                radius: 0.5,
                h_sides: 64,
                v_sides: 32,
            }
            .into()),
        );
        // A 4 x 2 sphere is an octahedron.
        catalog.insert(
            OCTAHEDRON,
            lit(FigureSphere {
                radius: 0.3,
                h_sides: 4,
                v_sides: 2,
            }
            .into()),
        );
        catalog
    }
}

/// Pipe ids. Items are drawn in ascending pipe order, so the `*_LAST`
/// variants render over everything else with the same shaders.
pub mod pipes {
    use crate::gfx::scene::PipeId;

    pub const TEXTURED_FLAT: PipeId = 0;
    pub const PIPE_2D: PipeId = 1;
    pub const PIPE_3D: PipeId = 2;
    pub const PIPE_3D_TEXTURED: PipeId = 3;
    pub const PIPE_2D_TEXTURED: PipeId = 4;
    pub const SELECTION: PipeId = 5;
    pub const PIPE_2D_LAST: PipeId = 6;
    pub const PIPE_3D_LAST: PipeId = 7;
    pub const TEXTURED_FLAT_LAST: PipeId = 8;
    pub const PIPE_3D_TEXTURED_LAST: PipeId = 9;
    pub const PIPE_2D_TEXTURED_LAST: PipeId = 10;
}

pub mod textures {
    use crate::gfx::scene::TextureId;

    pub const COMMON: TextureId = 0;
}

pub mod colors {
    use crate::gfx::scene::Color;

    pub const BACKGROUND: Color = Color::BLACK;
    pub const SELECTED: Color = Color::WHITE;
    pub const HOVERED: Color = Color::MAGENTA;
    pub const SELECTION_RECT: Color = Color::YELLOW;
    pub const DEFAULT: Color = Color::WHITE;
}

pub mod lights {
    use cgmath::Vector3;

    use crate::gfx::scene::{Color, Light};

    pub fn default_light() -> Light {
        Light {
            direction: Vector3::new(-1.0, -1.0, 0.0),
            ambient: Color::from_hex(0x99_99_99),
            diffuse: Color::from_hex(0x99_99_99),
            specular: Color::WHITE,
        }
    }
}

pub mod common {
    /// Stride mask for box selection picking.
    pub const SELECTION_MASK: i32 = 5;
}

pub mod cameras {
    use cgmath::Vector3;

    use crate::gfx::camera::{
        CameraSettings, OrthographicProjection, PerspectiveProjection, ProjectionType, Range,
        RangeLimits,
    };

    /// Z-up camera 50 units south of and 100 units above the origin,
    /// looking north at 45 degrees down.
    pub fn default_settings() -> CameraSettings {
        CameraSettings {
            position: Vector3::new(0.0, -50.0, 100.0),
            world_up: Vector3::unit_z(),
            yaw: 90.0,
            pitch: -45.0,
            speed: 1.0,
            sensitivity: 1.0,
            zoom: 1.0,
            scale: Vector3::new(1.0, 1.0, 1.0),
            projection_type: ProjectionType::Perspective,
            perspective: PerspectiveProjection::new(45.0, 0.1, 400.0),
            ortho: OrthographicProjection::new(-150.0, 150.0, -50.0, 250.0, 0.0, 250.0),
            limits: default_limits(),
        }
    }

    pub fn default_limits() -> RangeLimits {
        RangeLimits {
            x: Range::new(-150.0, 150.0),
            y: Range::new(-50.0, 250.0),
            z: Range::new(0.2, 250.0),
            zoom: Range::new(1.0, 10.0),
            yaw: Range::new(0.0, 360.0),
            pitch: Range::new(-89.0, 0.0),
            scale: Range::disabled(),
        }
    }
}
