//! Mirroring Core
//!
//! - [`TransformHost`]: the editor services the core calls into
//! - [`TransformPair`]: per-pair baseline, change cache and flags
//! - [`MirrorEngine`]: the per-tick delta propagation
//! - [`MirrorSession`]: pair list plus the active/inactive state, driven by the host

pub mod engine;
pub mod host;
pub mod pair;
pub mod session;

pub use engine::{AppliedTransform, MirrorEngine};
pub use host::TransformHost;
pub use pair::{Axis, AxisMask, BypassMask, TransformPair};
pub use session::{MirrorSession, PairFailure, TickReport};
