//! # Scene Objects
//!
//! Composite nodes grouping items and child objects. Nodes live in the
//! scene's object arena and refer to items and children by key, so a node can
//! be shared by several parents without owning back-references.
//!
//! Custom per-object data and its update logic are attached through the
//! [`ObjectBehavior`] trait:
//!
//! ```
//! use std::any::Any;
//! use sceneview::gfx::scene::{Color, Item, ObjectBehavior, ObjectItems, Scene, SceneObject};
//!
//! struct Blink {
//!     on: bool,
//! }
//!
//! impl ObjectBehavior for Blink {
//!     fn self_update(&mut self, items: &mut ObjectItems<'_>) {
//!         let color = if self.on { Color::WHITE } else { Color::BLACK };
//!         items.for_each(|item| item.color = color);
//!     }
//!     fn as_any(&self) -> &dyn Any { self }
//!     fn as_any_mut(&mut self) -> &mut dyn Any { self }
//! }
//!
//! let mut scene = Scene::new();
//! let item = scene.insert_item(Item::from_mesh(0));
//! let object = scene.add_object(SceneObject::new(vec![item]).with_behavior(Blink { on: true }));
//! scene.update();
//! assert_eq!(scene.item(item).map(|i| i.color), Some(Color::WHITE));
//!
//! if let Some(blink) = scene.object_behavior_mut::<Blink>(object) {
//!     blink.on = false;
//! }
//! scene.update();
//! assert_eq!(scene.item(item).map(|i| i.color), Some(Color::BLACK));
//! ```

use std::any::Any;

use super::item::Item;

/// Stable handle of an item in the scene arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(pub(crate) usize);

/// Stable handle of an object in the scene arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(pub(crate) usize);

/// Per-object data with its own update step.
///
/// `self_update` runs during [`Scene::update`](super::Scene::update) only
/// after the data has been touched through a mutable accessor.
pub trait ObjectBehavior {
    fn self_update(&mut self, items: &mut ObjectItems<'_>);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Mutable view over the items owned directly by one object.
pub struct ObjectItems<'a> {
    keys: &'a [ItemKey],
    arena: &'a mut [Item],
}

impl<'a> ObjectItems<'a> {
    pub(crate) fn new(keys: &'a [ItemKey], arena: &'a mut [Item]) -> Self {
        Self { keys, arena }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The object's `index`-th item.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        let key = self.keys.get(index)?;
        self.arena.get_mut(key.0)
    }

    pub fn for_each(&mut self, mut f: impl FnMut(&mut Item)) {
        for key in self.keys {
            if let Some(item) = self.arena.get_mut(key.0) {
                f(item);
            }
        }
    }
}

/// A node of the composition hierarchy.
pub struct SceneObject {
    pub(crate) visible: bool,
    pub(crate) changed: bool,
    pub(crate) items: Vec<ItemKey>,
    pub(crate) children: Vec<ObjectKey>,
    pub(crate) behavior: Option<Box<dyn ObjectBehavior>>,
}

impl SceneObject {
    pub fn new(items: Vec<ItemKey>) -> Self {
        Self {
            visible: true,
            changed: false,
            items,
            children: Vec::new(),
            behavior: None,
        }
    }

    /// Attaches custom data; the next update runs its `self_update`.
    pub fn with_behavior(mut self, behavior: impl ObjectBehavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self.changed = true;
        self
    }

    pub fn with_children(mut self, children: Vec<ObjectKey>) -> Self {
        self.children = children;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    pub fn items(&self) -> &[ItemKey] {
        &self.items
    }

    pub fn children(&self) -> &[ObjectKey] {
        &self.children
    }

    pub fn behavior(&self) -> Option<&dyn ObjectBehavior> {
        self.behavior.as_deref()
    }
}

impl std::fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneObject")
            .field("visible", &self.visible)
            .field("changed", &self.changed)
            .field("items", &self.items)
            .field("children", &self.children)
            .field("has_behavior", &self.behavior.is_some())
            .finish()
    }
}
