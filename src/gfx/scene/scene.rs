use std::any::Any;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::item::{Item, MeshId, PipeId, TextureId};
use super::light::Light;
use super::mesh::Mesh;
use super::object::{ItemKey, ObjectBehavior, ObjectItems, ObjectKey, SceneObject};
use super::text::TextItem;
use super::vertex::Vertex;
use crate::gfx::defaults;
use crate::gfx::resources::{ShaderCatalog, TextureCatalog, TextureImage};

/// Mesh id → mesh. Iteration order defines the shared vertex buffer layout.
pub type MeshCatalog = BTreeMap<MeshId, Mesh>;

/// Range of a mesh inside the shared vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryData {
    pub first: u32,
    pub count: u32,
}

impl GeometryData {
    pub fn range(&self) -> std::ops::Range<u32> {
        self.first..self.first + self.count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneStatistics {
    pub item_count: usize,
    pub registered_item_count: usize,
    pub object_count: usize,
    pub mesh_count: usize,
    pub vertex_count: usize,
}

/// The 3D world: mesh catalog, shared vertex buffer, items grouped by pipe,
/// composite objects, light, shaders and textures.
///
/// # Examples
///
/// ```
/// use sceneview::gfx::scene::{Item, Mesh, MeshCatalog, Scene};
/// use sceneview::gfx::geometry::FigureCube;
///
/// let mut meshes = MeshCatalog::new();
/// meshes.insert(0, Mesh::from_figure(&FigureCube { size: 1.0 }.into(), true));
///
/// let mut scene = Scene::with_meshes(meshes);
/// let key = scene.add_item(Item::from_mesh(0).with_id(1));
///
/// assert_eq!(scene.geometry_data(0).count as usize, scene.vertices().len());
/// assert!(scene.item(key).is_some());
/// ```
pub struct Scene {
    meshes: MeshCatalog,
    vertices: Vec<Vertex>,
    geometry: BTreeMap<MeshId, GeometryData>,

    items: Vec<Item>,
    pipes: BTreeMap<PipeId, Vec<ItemKey>>,

    objects: Vec<SceneObject>,
    roots: Vec<ObjectKey>,

    light: Light,
    shaders: ShaderCatalog,
    textures: TextureCatalog,
    text_items: Vec<TextItem>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Scene over the default meshes, light, shaders and textures.
    pub fn new() -> Self {
        Self::with_catalogs(
            defaults::meshes::default_meshes(),
            Light::default(),
            ShaderCatalog::with_defaults(),
            TextureCatalog::default(),
        )
    }

    pub fn with_meshes(meshes: MeshCatalog) -> Self {
        Self::with_catalogs(
            meshes,
            Light::default(),
            ShaderCatalog::with_defaults(),
            TextureCatalog::default(),
        )
    }

    pub fn with_catalogs(
        meshes: MeshCatalog,
        light: Light,
        shaders: ShaderCatalog,
        textures: TextureCatalog,
    ) -> Self {
        let mut vertices = Vec::new();
        let mut geometry = BTreeMap::new();

        for (id, mesh) in &meshes {
            let first = vertices.len() as u32;
            vertices.extend_from_slice(mesh.vertices());
            let count = mesh.vertex_count() as u32;
            geometry.insert(*id, GeometryData { first, count });
        }

        log::debug!(
            "scene created: {} meshes, {} vertices, {} shaders, {} textures",
            meshes.len(),
            vertices.len(),
            shaders.len(),
            textures.len()
        );

        Self {
            meshes,
            vertices,
            geometry,
            items: Vec::new(),
            pipes: BTreeMap::new(),
            objects: Vec::new(),
            roots: Vec::new(),
            light,
            shaders,
            textures,
            text_items: Vec::new(),
        }
    }

    // ---- items ----

    /// Stores `item` without registering it for rendering. Used for items
    /// owned by objects, which are registered when the object is added.
    pub fn insert_item(&mut self, item: Item) -> ItemKey {
        self.items.push(item);
        ItemKey(self.items.len() - 1)
    }

    /// Stores `item` and registers it under its pipe.
    pub fn add_item(&mut self, item: Item) -> ItemKey {
        let key = self.insert_item(item);
        self.register_item(key);
        key
    }

    /// Appends an already stored item to its pipe bucket.
    ///
    /// The pipe is read at registration time; later changes to the item's
    /// `pipe_id` do not move it.
    pub fn register_item(&mut self, key: ItemKey) {
        let Some(item) = self.items.get(key.0) else {
            log::warn!("cannot register unknown item {:?}", key);
            return;
        };
        self.pipes.entry(item.pipe_id).or_default().push(key);
    }

    pub fn item(&self, key: ItemKey) -> Option<&Item> {
        self.items.get(key.0)
    }

    pub fn item_mut(&mut self, key: ItemKey) -> Option<&mut Item> {
        self.items.get_mut(key.0)
    }

    /// Pipe id → registered items, in insertion order within each pipe.
    pub fn pipes(&self) -> &BTreeMap<PipeId, Vec<ItemKey>> {
        &self.pipes
    }

    pub fn pipe_items(&self, pipe_id: PipeId) -> impl Iterator<Item = (ItemKey, &Item)> {
        self.pipes
            .get(&pipe_id)
            .into_iter()
            .flatten()
            .filter_map(|key| self.items.get(key.0).map(|item| (*key, item)))
    }

    // ---- objects ----

    /// Stores `object` without making it a top-level object.
    pub fn insert_object(&mut self, object: SceneObject) -> ObjectKey {
        self.objects.push(object);
        ObjectKey(self.objects.len() - 1)
    }

    /// Stores `object` as a top-level object and registers every item of its
    /// subtree.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectKey {
        let key = self.insert_object(object);
        self.roots.push(key);
        for item in self.all_items(key) {
            self.register_item(item);
        }
        key
    }

    /// Makes `child` a child of `parent`. A child may have several parents.
    ///
    /// Items of `child` are not registered here; add children before adding
    /// the top-level object, or register the items explicitly.
    /// Attachments that would make `parent` its own descendant are refused.
    pub fn add_child_object(&mut self, parent: ObjectKey, child: ObjectKey) {
        if child.0 >= self.objects.len() {
            log::warn!("cannot attach unknown object {:?}", child);
            return;
        }
        if self.reaches(child, parent) {
            log::warn!("attaching {:?} under {:?} would create a cycle", child, parent);
            return;
        }
        match self.objects.get_mut(parent.0) {
            Some(object) => object.children.push(child),
            None => log::warn!("cannot attach to unknown object {:?}", parent),
        }
    }

    /// Whether `target` is `from` or one of its descendants.
    fn reaches(&self, from: ObjectKey, target: ObjectKey) -> bool {
        let mut visited = vec![false; self.objects.len()];
        let mut stack = vec![from];
        while let Some(key) = stack.pop() {
            if key == target {
                return true;
            }
            let Some(object) = self.objects.get(key.0) else {
                continue;
            };
            if std::mem::replace(&mut visited[key.0], true) {
                continue;
            }
            stack.extend_from_slice(&object.children);
        }
        false
    }

    pub fn object(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key.0)
    }

    pub fn root_objects(&self) -> &[ObjectKey] {
        &self.roots
    }

    /// Items of `key` followed by the items of its children, depth first.
    pub fn all_items(&self, key: ObjectKey) -> Vec<ItemKey> {
        let mut items = Vec::new();
        self.collect_items(key, &mut items);
        items
    }

    fn collect_items(&self, key: ObjectKey, items: &mut Vec<ItemKey>) {
        let Some(object) = self.objects.get(key.0) else {
            return;
        };
        items.extend_from_slice(&object.items);
        for child in &object.children {
            self.collect_items(*child, items);
        }
    }

    /// Sets the visibility of an object, its items and all descendants.
    ///
    /// Nothing happens when the object already has the requested value, and
    /// the cascade stops at descendants that already match.
    pub fn set_object_visibility(&mut self, key: ObjectKey, visible: bool) {
        let Some(object) = self.objects.get_mut(key.0) else {
            return;
        };
        if object.visible == visible {
            return;
        }
        object.visible = visible;

        for item in &object.items {
            if let Some(item) = self.items.get_mut(item.0) {
                item.visible = visible;
            }
        }

        let children = object.children.clone();
        for child in children {
            self.set_object_visibility(child, visible);
        }
    }

    /// Replaces the behavior of `key` and marks it changed.
    pub fn set_object_behavior(&mut self, key: ObjectKey, behavior: impl ObjectBehavior + 'static) {
        if let Some(object) = self.objects.get_mut(key.0) {
            object.behavior = Some(Box::new(behavior));
            object.changed = true;
        }
    }

    pub fn object_behavior<T: Any>(&self, key: ObjectKey) -> Option<&T> {
        self.objects
            .get(key.0)?
            .behavior
            .as_ref()?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Mutable access to the behavior of `key`; marks the object changed so
    /// its `self_update` runs on the next [`Scene::update`].
    pub fn object_behavior_mut<T: Any>(&mut self, key: ObjectKey) -> Option<&mut T> {
        let object = self.objects.get_mut(key.0)?;
        let behavior = object.behavior.as_mut()?.as_any_mut().downcast_mut::<T>()?;
        object.changed = true;
        Some(behavior)
    }

    pub fn mark_object_changed(&mut self, key: ObjectKey) {
        if let Some(object) = self.objects.get_mut(key.0) {
            object.mark_changed();
        }
    }

    /// Updates every visible top-level object. Invisible subtrees are skipped.
    pub fn update(&mut self) {
        let roots = self.roots.clone();
        for key in roots {
            if self.objects.get(key.0).is_some_and(|o| o.visible) {
                self.update_object(key);
            }
        }
    }

    fn update_object(&mut self, key: ObjectKey) {
        let Some(object) = self.objects.get_mut(key.0) else {
            return;
        };

        if object.changed {
            if let Some(behavior) = object.behavior.as_mut() {
                let mut items = ObjectItems::new(&object.items, &mut self.items);
                behavior.self_update(&mut items);
            }
            object.changed = false;
        }

        let children = object.children.clone();
        for child in children {
            self.update_object(child);
        }
    }

    // ---- geometry ----

    /// All mesh vertices, concatenated in ascending mesh id order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Range of `mesh_id` in [`Scene::vertices`]; `{0, 0}` if unknown.
    pub fn geometry_data(&self, mesh_id: MeshId) -> GeometryData {
        match self.geometry.get(&mesh_id) {
            Some(data) => *data,
            None => {
                log::debug!("mesh {} is not in the catalog", mesh_id);
                GeometryData::default()
            }
        }
    }

    pub fn meshes(&self) -> &MeshCatalog {
        &self.meshes
    }

    pub fn mesh(&self, mesh_id: MeshId) -> Option<&Mesh> {
        self.meshes.get(&mesh_id)
    }

    // ---- light, shaders, textures, text ----

    pub fn light(&self) -> &Light {
        &self.light
    }

    pub fn set_light(&mut self, light: Light) {
        self.light = light;
    }

    pub fn shaders(&self) -> &ShaderCatalog {
        &self.shaders
    }

    /// Texture of `texture_id`, decoded on first access.
    pub fn texture(&mut self, texture_id: TextureId) -> Option<Rc<TextureImage>> {
        self.textures.get(texture_id)
    }

    pub fn textures(&self) -> &TextureCatalog {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureCatalog {
        &mut self.textures
    }

    pub fn set_text_items(&mut self, text_items: Vec<TextItem>) {
        self.text_items = text_items;
    }

    pub fn text_items(&self) -> &[TextItem] {
        &self.text_items
    }

    pub fn statistics(&self) -> SceneStatistics {
        SceneStatistics {
            item_count: self.items.len(),
            registered_item_count: self.pipes.values().map(Vec::len).sum(),
            object_count: self.objects.len(),
            mesh_count: self.meshes.len(),
            vertex_count: self.vertices.len(),
        }
    }
}
