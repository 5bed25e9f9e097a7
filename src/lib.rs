#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! World-space transform mirroring between paired scene objects.
//!
//! A [`MirrorSession`] holds pairs of objects. While the session is active,
//! every edit to a pair's source is carried over to its target, with optional
//! per-axis sign flips and per-channel freezes. Stopping the session rolls
//! both objects of every pair back to where they were when it started.
//!
//! ```rust,ignore
//! use mirror_rig::{MirrorSession, Scene, TransformSnapshot};
//! use glam::Vec3;
//!
//! let mut scene = Scene::new();
//! let left = scene.add_object("LeftHand", TransformSnapshot::from_position(Vec3::new(-1.0, 0.0, 0.0)));
//! let right = scene.add_object("RightHand", TransformSnapshot::from_position(Vec3::new(1.0, 0.0, 0.0)));
//!
//! let mut session = MirrorSession::default();
//! session.add_pair(left, right, &scene)?;
//! session.start(&scene);
//!
//! // once per frame
//! let report = session.tick(&mut scene);
//!
//! session.stop(&mut scene);
//! ```

pub mod errors;
pub mod mirror;
pub mod preset;
pub mod scene;
pub mod settings;

pub use errors::{MirrorError, Result};
pub use mirror::{
    AppliedTransform, Axis, AxisMask, BypassMask, MirrorEngine, MirrorSession, TickReport,
    TransformHost, TransformPair,
};
pub use preset::{MirrorPreset, PairData, PresetLibrary, PresetLoadReport};
pub use scene::{ObjectHandle, Scene, TransformSnapshot};
pub use settings::{MirrorSettings, UndoLabels};
