//! Scene Module
//!
//! A minimal world-space scene that hosts the mirroring core:
//! - [`TransformSnapshot`]: immutable world-space TRS value
//! - [`Transform`]: live transform component with a "needs save" flag
//! - [`SceneObject`]: named object owning a transform
//! - [`Scene`]: object storage implementing [`TransformHost`](crate::mirror::TransformHost)
//! - [`UndoHistory`]: the command log behind `begin_undoable_change`

pub mod history;
pub mod node;
pub mod scene;
pub mod transform;

pub use history::{UndoEntry, UndoHistory};
pub use node::SceneObject;
pub use scene::Scene;
pub use transform::{
    EULER_ORDER, Transform, TransformSnapshot, quat_from_euler_degrees, quat_to_euler_degrees,
};

use slotmap::new_key_type;

new_key_type! {
    /// Stable reference to a scene object. Stale after the object is removed.
    pub struct ObjectHandle;
}
