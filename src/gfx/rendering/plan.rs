//! # Render Plan
//!
//! Turns a scene into an ordered list of draw calls for one pass. The plan
//! holds no GPU objects; a render driver walks [`RenderPlan::draw_calls`],
//! binds the pipeline for each call's [`PipelineKey`](super::PipelineKey),
//! uploads its [`ItemUniform`] and issues the draw.
//!
//! Items are visited pipe by pipe in ascending pipe id and in insertion order
//! within a pipe, so the `*_LAST` pipes draw after everything else.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use cgmath::Matrix4;

use super::uniforms::{FrameUniform, ItemUniform};
use crate::gfx::camera::Camera;
use crate::gfx::defaults;
use crate::gfx::picking::{encode_item_id, PickingState, ITEM_ID_MASK};
use crate::gfx::resources::TextureImage;
use crate::gfx::scene::{
    Capability, Color, DrawMode, GeometryData, ItemGeometry, ItemId, ItemKey, Light, PipeId,
    RenderAttributes, Scene, TextItem, Vertex,
};

/// Brightness factors, in percent, for highlighted items.
pub const STANDARD_FACTOR: u32 = 100;
pub const SELECTED_FACTOR: u32 = 190;
pub const HOVERED_FACTOR: u32 = 180;
pub const HOVERED_SELECTED_FACTOR: u32 = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// On-screen pass with lighting, textures and highlight colors.
    #[default]
    Standard,
    /// Off-screen pass filling every pickable item with its encoded id.
    Picking,
}

/// Capabilities set up before the items of a pass are drawn.
pub fn standard_attributes() -> RenderAttributes {
    RenderAttributes {
        line_width: 1.0,
        enable: vec![Capability::DepthTest, Capability::CullFace, Capability::LineSmooth],
        disable: vec![Capability::Blend],
    }
}

/// Flat state for the picking pass; blending and smoothing would corrupt ids.
pub fn picking_attributes() -> RenderAttributes {
    RenderAttributes {
        line_width: 1.0,
        enable: vec![Capability::DepthTest, Capability::CullFace],
        disable: vec![Capability::LineSmooth, Capability::Blend],
    }
}

/// Vertices of one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawGeometry<'a> {
    /// Range of [`Scene::vertices`].
    Static(GeometryData),
    /// Item-owned vertices uploaded for this draw.
    Dynamic(&'a [Vertex]),
}

impl DrawGeometry<'_> {
    pub fn vertex_count(&self) -> u32 {
        match self {
            DrawGeometry::Static(data) => data.count,
            DrawGeometry::Dynamic(vertices) => vertices.len() as u32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DrawCall<'a> {
    pub item: ItemKey,
    pub item_id: ItemId,
    pub pipe_id: PipeId,
    pub mode: DrawMode,
    pub color: Color,
    pub alpha: f32,
    pub transform: Matrix4<f32>,
    pub line_width: f32,
    /// Capabilities enabled for this draw after the item's own toggles.
    pub capabilities: BTreeSet<Capability>,
    pub texture: Option<Rc<TextureImage>>,
    pub geometry: DrawGeometry<'a>,
}

impl DrawCall<'_> {
    pub fn uniform(&self) -> ItemUniform {
        ItemUniform::new(self.transform, self.color, self.alpha)
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Everything a driver needs to render one pass.
#[derive(Debug, Clone)]
pub struct RenderPlan<'a> {
    pub mode: RenderMode,
    pub clear_color: Color,
    pub frame: FrameUniform,
    pub draw_calls: Vec<DrawCall<'a>>,
    /// Screen-space labels; empty in picking mode.
    pub text_items: &'a [TextItem],
}

impl<'a> RenderPlan<'a> {
    /// Builds the draw list for `mode`.
    ///
    /// The scene is borrowed mutably only to materialize catalog textures.
    pub fn build(
        scene: &'a mut Scene,
        camera: &Camera,
        picking: &PickingState,
        mode: RenderMode,
    ) -> Self {
        let textures = match mode {
            RenderMode::Standard => resolve_textures(scene),
            RenderMode::Picking => BTreeMap::new(),
        };
        let scene: &'a Scene = scene;

        let preset = match mode {
            RenderMode::Standard => standard_attributes(),
            RenderMode::Picking => picking_attributes(),
        };

        // The light follows the view direction.
        let light = Light {
            direction: camera.front(),
            ..*scene.light()
        };

        let mut draw_calls = Vec::new();
        for &pipe_id in scene.pipes().keys() {
            for (key, item) in scene.pipe_items(pipe_id) {
                if !item.visible {
                    continue;
                }
                if mode == RenderMode::Picking && !item.is_pickable() {
                    continue;
                }

                let geometry = match &item.geometry {
                    ItemGeometry::Mesh(mesh_id) => {
                        DrawGeometry::Static(scene.geometry_data(*mesh_id))
                    }
                    ItemGeometry::Mutable(vertices) => DrawGeometry::Dynamic(vertices),
                };

                let params = &item.render_parameters;
                let mut capabilities: BTreeSet<Capability> =
                    preset.enable.iter().copied().collect();
                capabilities.extend(params.attributes.enable.iter().copied());
                for capability in &params.attributes.disable {
                    capabilities.remove(capability);
                }

                let call = match mode {
                    RenderMode::Standard => DrawCall {
                        item: key,
                        item_id: item.id,
                        pipe_id,
                        mode: params.mode,
                        color: item.color.lighter(highlight_factor(item.id, picking)),
                        alpha: params.alpha,
                        transform: item.transform,
                        line_width: params.attributes.line_width,
                        capabilities,
                        texture: textures.get(&key).cloned(),
                        geometry,
                    },
                    RenderMode::Picking => {
                        for capability in &preset.disable {
                            capabilities.remove(capability);
                        }
                        let [r, g, b] = encode_item_id(item.id);
                        DrawCall {
                            item: key,
                            item_id: item.id,
                            pipe_id: defaults::pipes::SELECTION,
                            mode: params.mode,
                            color: Color::rgb(r, g, b),
                            alpha: 1.0,
                            transform: item.transform,
                            line_width: params.attributes.line_width,
                            capabilities,
                            texture: None,
                            geometry,
                        }
                    }
                };
                draw_calls.push(call);
            }
        }

        log::trace!("render plan ({:?}): {} draw calls", mode, draw_calls.len());

        Self {
            mode,
            clear_color: defaults::colors::BACKGROUND,
            frame: FrameUniform::new(camera, &light),
            draw_calls,
            text_items: match mode {
                RenderMode::Standard => scene.text_items(),
                RenderMode::Picking => &[],
            },
        }
    }

    /// Draw calls of one pipe, in order.
    pub fn pipe_calls(&self, pipe_id: PipeId) -> impl Iterator<Item = &DrawCall<'a>> {
        self.draw_calls.iter().filter(move |call| call.pipe_id == pipe_id)
    }
}

/// Brightness of an item given the current hover and selection.
pub fn highlight_factor(id: ItemId, picking: &PickingState) -> u32 {
    let mut factor = STANDARD_FACTOR;
    if id & ITEM_ID_MASK != 0 {
        if picking.is_selected(id) {
            factor = SELECTED_FACTOR;
        }
        if picking.is_hovered(id) {
            factor = if factor != STANDARD_FACTOR {
                HOVERED_SELECTED_FACTOR
            } else {
                HOVERED_FACTOR
            };
        }
    }
    factor
}

/// Texture of every visible item: its bound image, else the catalog entry.
fn resolve_textures(scene: &mut Scene) -> BTreeMap<ItemKey, Rc<TextureImage>> {
    let wanted: Vec<_> = scene
        .pipes()
        .values()
        .flatten()
        .filter_map(|&key| scene.item(key).map(|item| (key, item)))
        .filter(|(_, item)| item.visible)
        .map(|(key, item)| (key, item.texture.clone(), item.texture_id))
        .collect();

    wanted
        .into_iter()
        .filter_map(|(key, bound, texture_id)| {
            let texture = bound.or_else(|| {
                if scene.textures().contains(texture_id) {
                    scene.texture(texture_id)
                } else {
                    None
                }
            })?;
            Some((key, texture))
        })
        .collect()
}
