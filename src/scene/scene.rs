use slotmap::SlotMap;

use crate::mirror::TransformHost;
use crate::scene::ObjectHandle;
use crate::scene::history::{UndoEntry, UndoHistory};
use crate::scene::node::SceneObject;
use crate::scene::transform::TransformSnapshot;

/// Default number of undo entries kept by [`Scene::new`].
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Flat world-space scene used as the reference [`TransformHost`].
///
/// Objects are addressed by [`ObjectHandle`]; a removed object's handle stays
/// invalid forever, which is how hosts report destroyed objects to the
/// mirroring core.
pub struct Scene {
    objects: SlotMap<ObjectHandle, SceneObject>,
    history: UndoHistory,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            objects: SlotMap::with_key(),
            history: UndoHistory::new(limit),
        }
    }

    /// Adds an object with an identity transform.
    pub fn create_object(&mut self, name: &str) -> ObjectHandle {
        self.objects.insert(SceneObject::new(name))
    }

    /// Adds an object with the given world transform.
    pub fn add_object(&mut self, name: &str, transform: TransformSnapshot) -> ObjectHandle {
        self.objects.insert(SceneObject::with_transform(name, &transform))
    }

    pub fn remove_object(&mut self, handle: ObjectHandle) -> Option<SceneObject> {
        self.objects.remove(handle)
    }

    #[must_use]
    pub fn get_object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle)
    }

    pub fn get_object_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.objects.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: ObjectHandle) -> Option<&str> {
        self.objects.get(handle).map(|o| o.name.as_str())
    }

    pub fn set_name(&mut self, handle: ObjectHandle, name: &str) {
        if let Some(object) = self.objects.get_mut(handle) {
            object.name = name.to_owned();
        }
    }

    /// First object carrying `name`, if any.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .find_map(|(handle, object)| (object.name == name).then_some(handle))
    }

    /// Edits an object's transform directly, bypassing undo and the save flag.
    ///
    /// This is how tests and demos stand in for a user dragging a gizmo.
    pub fn edit_transform(&mut self, handle: ObjectHandle, edit: impl FnOnce(&mut TransformSnapshot)) {
        if let Some(object) = self.objects.get_mut(handle) {
            let mut snapshot = object.transform.snapshot();
            edit(&mut snapshot);
            object.transform.position = snapshot.position;
            object.transform.rotation = snapshot.rotation;
            object.transform.scale = snapshot.scale;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.objects.keys()
    }

    #[must_use]
    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// Reverts the most recent recorded change.
    ///
    /// Entries whose object has since been removed are discarded but still returned.
    pub fn undo(&mut self) -> Option<UndoEntry> {
        let entry = self.history.pop()?;
        if let Some(object) = self.objects.get_mut(entry.object) {
            object.transform.apply_snapshot(&entry.before);
        } else {
            log::warn!("Undo '{}' targets a removed object, skipping.", entry.label);
        }
        Some(entry)
    }

    /// Handles of objects written since the last call, clearing their save flags.
    pub fn take_dirty_objects(&mut self) -> Vec<ObjectHandle> {
        self.objects
            .iter_mut()
            .filter_map(|(handle, object)| object.transform.take_dirty().then_some(handle))
            .collect()
    }
}

impl TransformHost for Scene {
    fn contains(&self, object: ObjectHandle) -> bool {
        self.objects.contains_key(object)
    }

    fn world_transform(&self, object: ObjectHandle) -> Option<TransformSnapshot> {
        self.objects.get(object).map(SceneObject::world_transform)
    }

    fn set_world_transform(&mut self, object: ObjectHandle, transform: &TransformSnapshot) {
        if let Some(o) = self.objects.get_mut(object) {
            o.transform.apply_snapshot(transform);
        }
    }

    fn begin_undoable_change(&mut self, object: ObjectHandle, label: &str) {
        if let Some(o) = self.objects.get(object) {
            let before = o.world_transform();
            self.history.record(label, object, before);
        }
    }

    fn find_object(&self, name: &str) -> Option<ObjectHandle> {
        self.find_by_name(name)
    }

    fn object_name(&self, object: ObjectHandle) -> Option<&str> {
        self.get_name(object)
    }
}
