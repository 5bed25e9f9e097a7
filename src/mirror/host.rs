use crate::scene::{ObjectHandle, TransformSnapshot};

/// Services the mirroring core needs from the surrounding editor.
///
/// All calls for one session must happen on a single thread: `tick`,
/// `capture` and `restore` read-modify-write scene state without any
/// synchronization of their own.
pub trait TransformHost {
    /// Whether the object still exists. Destroyed objects are treated as unset.
    fn contains(&self, object: ObjectHandle) -> bool;

    /// Current world transform, or `None` if the object no longer exists.
    fn world_transform(&self, object: ObjectHandle) -> Option<TransformSnapshot>;

    /// Writes a world transform and marks the object as needing save.
    fn set_world_transform(&mut self, object: ObjectHandle, transform: &TransformSnapshot);

    /// Records the object's current state under `label` so that undoing
    /// returns it there. Called immediately before the protected write.
    fn begin_undoable_change(&mut self, object: ObjectHandle, label: &str);

    /// Scene lookup by display name.
    fn find_object(&self, name: &str) -> Option<ObjectHandle>;

    fn object_name(&self, object: ObjectHandle) -> Option<&str>;

    /// Record, write, mark dirty: the order every mutation goes through.
    fn apply_undoable(&mut self, object: ObjectHandle, label: &str, transform: &TransformSnapshot) {
        self.begin_undoable_change(object, label);
        self.set_world_transform(object, transform);
    }
}
