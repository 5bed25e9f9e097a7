//! Presets
//!
//! Named, persisted pair lists. Objects are stored by *name*, so loading a
//! preset resolves them through the host's scene lookup and can fail per pair.
//! `last_source` is session state and is never persisted.

pub mod library;

pub use library::PresetLibrary;

use serde::{Deserialize, Serialize};

use crate::errors::{MirrorError, Result};
use crate::mirror::{AxisMask, BypassMask};
use crate::scene::TransformSnapshot;

/// Persisted form of one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairData {
    /// Empty when the pair had no source assigned.
    pub source_name: String,
    pub target_name: String,
    #[serde(default)]
    pub axis_mask: AxisMask,
    #[serde(default)]
    pub bypass_mask: BypassMask,
    pub initial_source: TransformSnapshot,
    pub initial_target: TransformSnapshot,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MirrorPreset {
    pub name: String,
    #[serde(default)]
    pub pairs: Vec<PairData>,
}

impl MirrorPreset {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pairs: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A preset pair that was not loaded.
#[derive(Debug)]
pub struct SkippedPair {
    /// Position of the pair in the preset.
    pub index: usize,
    pub error: MirrorError,
}

/// Outcome of [`MirrorSession::load_preset`](crate::mirror::MirrorSession::load_preset).
#[derive(Debug, Default)]
pub struct PresetLoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedPair>,
}

impl PresetLoadReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
