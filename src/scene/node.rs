use crate::scene::transform::{Transform, TransformSnapshot};

/// A named object living in a [`Scene`](crate::scene::Scene).
///
/// Objects carry no hierarchy: every transform is expressed in world space.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Display name, also the lookup key used when resolving presets.
    pub name: String,
    /// World-space transform
    pub transform: Transform,
}

impl SceneObject {
    /// Creates an object with an identity transform.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
        }
    }

    #[must_use]
    pub fn with_transform(name: impl Into<String>, snapshot: &TransformSnapshot) -> Self {
        Self {
            name: name.into(),
            transform: Transform::from_snapshot(snapshot),
        }
    }

    #[inline]
    #[must_use]
    pub fn world_transform(&self) -> TransformSnapshot {
        self.transform.snapshot()
    }
}
