//! # Color-Coded Picking
//!
//! Hit-testing by rendering. The render driver draws the scene once with
//! [`RenderMode::Picking`](crate::gfx::rendering::RenderMode::Picking), where
//! every pickable item is filled with its 24-bit id packed into RGB, reads the
//! target back and hands the pixels to [`PickingState::pick`].
//!
//! ## How it works
//!
//! 1. **Encode**: item id `0x00RRGGBB` becomes the color `(RR, GG, BB)`
//! 2. **Sample**: a [`PickRegion`] walks a pixel rectangle, optionally
//!    skipping pixels through a stride mask
//! 3. **Decode**: sampled pixels turn back into ids; `0` is the background
//! 4. **Report**: hover and selection changes come back as [`PickEvent`]s
//!
//! ## Usage
//!
//! ```
//! use sceneview::gfx::picking::{encode_item_id_rgba, PickEvent, PickImage, PickRegion, PickingState};
//!
//! let mut pixels = vec![0u8; 4 * 4 * 4];
//! pixels[..4].copy_from_slice(&encode_item_id_rgba(7));
//! let image = PickImage::new(4, 4, &pixels);
//!
//! let mut state = PickingState::new();
//! let events = state.pick(&image, PickRegion::point(0, 0), false);
//! assert_eq!(events, vec![PickEvent::HoverChanged { hovered: true, id: 7 }]);
//! ```

use std::collections::BTreeSet;

use crate::gfx::camera::ManipulatorState;
use crate::gfx::defaults;
use crate::gfx::scene::ItemId;

/// Bits of an item id that survive the color encoding.
pub const ITEM_ID_MASK: ItemId = 0x00FF_FFFF;

/// Picking color of `id` as normalized RGB.
pub fn encode_item_id(id: ItemId) -> [f32; 3] {
    let [r, g, b, _] = encode_item_id_rgba(id);
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// Picking color of `id` as RGBA8 with opaque alpha.
pub fn encode_item_id_rgba(id: ItemId) -> [u8; 4] {
    [
        ((id >> 16) & 0xFF) as u8,
        ((id >> 8) & 0xFF) as u8,
        (id & 0xFF) as u8,
        0xFF,
    ]
}

/// Item id stored in an RGBA8 pixel. Alpha is ignored.
pub fn decode_pixel(rgba: [u8; 4]) -> ItemId {
    ((rgba[0] as ItemId) << 16) | ((rgba[1] as ItemId) << 8) | rgba[2] as ItemId
}

/// Pixel rectangle to sample, corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickRegion {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
    /// Stride mask; `1` samples every pixel.
    pub mask: i32,
}

impl PickRegion {
    /// Region spanned by two corners in any order.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, mask: i32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
            mask,
        }
    }

    /// A single pixel.
    pub fn point(x: i32, y: i32) -> Self {
        Self::new(x, y, x, y, 1)
    }

    /// Whether pixel `(x, y)` is sampled.
    ///
    /// With a mask other than `1`, a pixel is taken when its x and y either
    /// both share a bit with the mask or both share none.
    pub fn samples(&self, x: i32, y: i32) -> bool {
        if self.mask == 1 {
            return true;
        }
        let x_hit = x & self.mask != 0;
        let y_hit = y & self.mask != 0;
        x_hit == y_hit
    }

    /// Sampled pixels, x-major.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.min_x..=self.max_x)
            .flat_map(move |x| (self.min_y..=self.max_y).map(move |y| (x, y)))
            .filter(move |&(x, y)| self.samples(x, y))
    }
}

/// Read-back picking target: tightly packed RGBA8 rows, top row first.
#[derive(Debug, Clone, Copy)]
pub struct PickImage<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl<'a> PickImage<'a> {
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let bytes = self.pixels.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn item_id(&self, x: i32, y: i32) -> Option<ItemId> {
        self.pixel(x, y).map(decode_pixel)
    }
}

/// Outcome of a pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickEvent {
    /// The item under the pointer changed; `hovered` is false over background.
    HoverChanged { hovered: bool, id: ItemId },
    SelectionChanged(BTreeSet<ItemId>),
}

/// A pick the render driver should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickRequest {
    pub region: PickRegion,
    pub is_selection: bool,
}

impl PickRequest {
    /// Hover tracking under the pointer.
    pub fn hover(x: i32, y: i32) -> Self {
        Self {
            region: PickRegion::point(x, y),
            is_selection: false,
        }
    }

    /// Box selection between two corners with the default stride mask.
    pub fn selection(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            region: PickRegion::new(x1, y1, x2, y2, defaults::common::SELECTION_MASK),
            is_selection: true,
        }
    }

    /// Click selection of a single pixel.
    pub fn click(x: i32, y: i32) -> Self {
        Self {
            region: PickRegion::point(x, y),
            is_selection: true,
        }
    }

    /// The selection a button release triggers, if any. Call before
    /// forwarding the release to the manipulator, which clears its modes.
    pub fn on_release(state: &ManipulatorState) -> Option<Self> {
        let (px, py) = state.pressed();
        let (cx, cy) = state.current();
        if state.is_rect_selection_mode() {
            Some(Self::selection(px, py, cx, cy))
        } else if (px, py) == (cx, cy) {
            Some(Self::click(cx, cy))
        } else {
            None
        }
    }
}

/// Current hover and selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickingState {
    selected: BTreeSet<ItemId>,
    hovered: ItemId,
}

impl PickingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &BTreeSet<ItemId> {
        &self.selected
    }

    pub fn hovered(&self) -> ItemId {
        self.hovered
    }

    /// Only the low 24 bits of `id` take part, as in the pick image.
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&(id & ITEM_ID_MASK))
    }

    pub fn is_hovered(&self, id: ItemId) -> bool {
        let id = id & ITEM_ID_MASK;
        id != 0 && self.hovered == id
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Samples `region` of `image`.
    ///
    /// The last sampled id becomes the hovered one; when no pixel of the
    /// region lies inside the image the hover falls back to `0`. With
    /// `is_selection` the selection is replaced by every non-background id
    /// sampled.
    pub fn pick(&mut self, image: &PickImage<'_>, region: PickRegion, is_selection: bool) -> Vec<PickEvent> {
        if is_selection {
            self.selected.clear();
        }

        let mut last = 0;
        for (x, y) in region.pixels() {
            let Some(id) = image.item_id(x, y) else {
                continue;
            };
            log::trace!("pick sample ({}, {}) -> {}", x, y, id);
            if is_selection && id != 0 {
                self.selected.insert(id);
            }
            last = id;
        }

        let mut events = Vec::new();
        if last != self.hovered {
            self.hovered = last;
            events.push(PickEvent::HoverChanged {
                hovered: last != 0,
                id: last,
            });
        }
        if is_selection {
            events.push(PickEvent::SelectionChanged(self.selected.clone()));
        }
        events
    }

    pub fn apply(&mut self, image: &PickImage<'_>, request: PickRequest) -> Vec<PickEvent> {
        self.pick(image, request.region, request.is_selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{Camera, Manipulator, StandardManipulator};
    use winit::event::MouseButton;
    use winit::keyboard::ModifiersState;

    fn image_with(width: u32, height: u32, ids: &[((u32, u32), ItemId)]) -> Vec<u8> {
        let mut pixels = vec![0u8; (width * height * 4) as usize];
        for &((x, y), id) in ids {
            let offset = ((y * width + x) * 4) as usize;
            pixels[offset..offset + 4].copy_from_slice(&encode_item_id_rgba(id));
        }
        pixels
    }

    #[test]
    fn test_encode_decode_item_ids() {
        for id in [0, 1, 255, 256, 0x12_34_56, ITEM_ID_MASK] {
            assert_eq!(decode_pixel(encode_item_id_rgba(id)), id);
        }
        assert_eq!(encode_item_id_rgba(0x01_02_03), [1, 2, 3, 255]);
        assert_eq!(encode_item_id(0xFF_00_00), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_high_byte_is_dropped() {
        assert_eq!(decode_pixel(encode_item_id_rgba(0xAB_00_00_07)), 7);
    }

    #[test]
    fn test_decode_ignores_alpha() {
        assert_eq!(decode_pixel([0, 0, 9, 0]), 9);
        assert_eq!(decode_pixel([0, 0, 9, 255]), 9);
    }

    #[test]
    fn test_region_normalizes_corners() {
        let region = PickRegion::new(10, 2, 3, 8, 1);
        assert_eq!((region.min_x, region.min_y, region.max_x, region.max_y), (3, 2, 10, 8));
    }

    #[test]
    fn test_mask_one_samples_every_pixel() {
        let region = PickRegion::new(0, 0, 3, 3, 1);
        assert_eq!(region.pixels().count(), 16);
    }

    #[test]
    fn test_stride_mask_predicate() {
        let region = PickRegion::new(0, 0, 7, 7, 5);
        assert!(region.samples(0, 0));
        assert!(region.samples(1, 4));
        assert!(region.samples(2, 2));
        assert!(!region.samples(1, 0));
        assert!(!region.samples(0, 5));
        // x & 5 == 0 for x in {0, 2}, non-zero for the other six.
        assert_eq!(region.pixels().count(), 2 * 2 + 6 * 6);
    }

    #[test]
    fn test_hover_change_is_reported_once() {
        let pixels = image_with(4, 4, &[((1, 1), 42)]);
        let image = PickImage::new(4, 4, &pixels);
        let mut state = PickingState::new();

        let events = state.pick(&image, PickRegion::point(1, 1), false);
        assert_eq!(events, vec![PickEvent::HoverChanged { hovered: true, id: 42 }]);
        assert!(state.pick(&image, PickRegion::point(1, 1), false).is_empty());

        let events = state.pick(&image, PickRegion::point(0, 0), false);
        assert_eq!(events, vec![PickEvent::HoverChanged { hovered: false, id: 0 }]);
        assert!(state.selected().is_empty());
    }

    #[test]
    fn test_pixels_outside_image_are_ignored() {
        let pixels = image_with(2, 2, &[((1, 1), 5)]);
        let image = PickImage::new(2, 2, &pixels);
        let mut state = PickingState::new();

        assert!(state.pick(&image, PickRegion::point(-1, 0), false).is_empty());
        assert!(state.pick(&image, PickRegion::point(2, 1), false).is_empty());

        let events = state.pick(&image, PickRegion::new(1, 1, 5, 5, 1), true);
        assert_eq!(events[0], PickEvent::HoverChanged { hovered: true, id: 5 });
        assert!(state.is_selected(5));
    }

    #[test]
    fn test_hover_resets_when_pointer_leaves_image() {
        let pixels = image_with(4, 4, &[((1, 1), 5)]);
        let image = PickImage::new(4, 4, &pixels);
        let mut state = PickingState::new();

        state.pick(&image, PickRegion::point(1, 1), false);
        assert_eq!(state.hovered(), 5);

        let events = state.pick(&image, PickRegion::point(10, 10), false);
        assert_eq!(events, vec![PickEvent::HoverChanged { hovered: false, id: 0 }]);
        assert_eq!(state.hovered(), 0);
        assert!(!state.is_hovered(5));
    }

    #[test]
    fn test_wide_ids_compare_on_low_bits() {
        let wide = 0x0100_0007;
        let pixels = image_with(2, 2, &[((0, 0), wide & ITEM_ID_MASK)]);
        let image = PickImage::new(2, 2, &pixels);
        let mut state = PickingState::new();

        state.pick(&image, PickRegion::point(0, 0), true);
        assert!(state.is_selected(wide));
        assert!(state.is_hovered(wide));
        assert!(!state.is_hovered(0x0100_0000));
    }

    #[test]
    fn test_box_selection_replaces_previous_selection() {
        let pixels = image_with(8, 8, &[((0, 0), 3), ((2, 2), 4), ((6, 6), 9), ((1, 0), 11)]);
        let image = PickImage::new(8, 8, &pixels);
        let mut state = PickingState::new();

        state.pick(&image, PickRegion::point(6, 6), true);
        assert_eq!(state.selected().iter().copied().collect::<Vec<_>>(), vec![9]);

        let events = state.pick(&image, PickRegion::new(0, 0, 3, 3, 5), true);
        let expected: BTreeSet<ItemId> = [3, 4].into_iter().collect();
        assert_eq!(events.last(), Some(&PickEvent::SelectionChanged(expected.clone())));
        // (1, 0) is skipped by the stride mask.
        assert_eq!(state.selected(), &expected);
    }

    #[test]
    fn test_release_requests() {
        let mut camera = Camera::default();
        camera.set_viewport(100, 100);
        let mut manipulator = StandardManipulator::new(&camera);

        manipulator.mouse_press(10, 10, MouseButton::Left, ModifiersState::empty(), &mut camera);
        assert_eq!(PickRequest::on_release(manipulator.state()), Some(PickRequest::click(10, 10)));

        manipulator.mouse_move(20, 10, Some(MouseButton::Left), &mut camera);
        assert_eq!(PickRequest::on_release(manipulator.state()), None);
        manipulator.mouse_release(&mut camera);

        manipulator.mouse_press(10, 10, MouseButton::Left, ModifiersState::SHIFT, &mut camera);
        manipulator.mouse_move(30, 40, Some(MouseButton::Left), &mut camera);
        let request = PickRequest::on_release(manipulator.state());
        assert_eq!(request, Some(PickRequest::selection(10, 10, 30, 40)));
        assert_eq!(request.map(|r| r.region.mask), Some(5));
    }
}
