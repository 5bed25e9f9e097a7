use std::collections::VecDeque;

use crate::scene::ObjectHandle;
use crate::scene::transform::TransformSnapshot;

/// One recorded change: the transform an object had *before* a labelled mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry {
    pub label: String,
    pub object: ObjectHandle,
    pub before: TransformSnapshot,
}

/// Bounded command log backing `begin_undoable_change` on the reference scene.
///
/// When the limit is reached the oldest entry is dropped. A limit of zero
/// keeps every entry.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    entries: VecDeque<UndoEntry>,
    limit: usize,
}

impl UndoHistory {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    pub fn record(&mut self, label: &str, object: ObjectHandle, before: TransformSnapshot) {
        if self.limit > 0 && self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(UndoEntry {
            label: label.to_owned(),
            object,
            before,
        });
    }

    /// Removes and returns the most recent entry.
    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop_back()
    }

    #[must_use]
    pub fn last(&self) -> Option<&UndoEntry> {
        self.entries.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Labels from oldest to newest.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
