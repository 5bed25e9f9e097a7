//! Mirror Settings
//!
//! Tool-wide configuration, loadable from JSON. Every field has a default, so
//! a settings file only needs to name what it changes:
//!
//! ```json
//! {
//!     "presets_dir": "Assets/TransformMirrorPresets",
//!     "default_axis_mask": { "x": true, "y": false, "z": false }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::mirror::AxisMask;
use crate::preset::PresetLibrary;
use crate::scene::Scene;
use crate::scene::scene::DEFAULT_HISTORY_LIMIT;

/// Labels attached to undo records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UndoLabels {
    /// Target write during a tick.
    pub mirror: String,
    /// Source write during restore.
    pub restore_source: String,
    /// Target write during restore.
    pub restore_target: String,
}

impl Default for UndoLabels {
    fn default() -> Self {
        Self {
            mirror: "Mirror Transform".to_owned(),
            restore_source: "Restore Base Transform".to_owned(),
            restore_target: "Restore Target Transform".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorSettings {
    /// Mirror flags given to newly created pairs.
    pub default_axis_mask: AxisMask,
    /// Folder holding preset files.
    pub presets_dir: PathBuf,
    /// Preset file extension, without the dot.
    pub preset_extension: String,
    /// Undo entries kept by a scene built from these settings. `0` keeps all.
    pub undo_history_limit: usize,
    pub labels: UndoLabels,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            default_axis_mask: AxisMask::ALL,
            presets_dir: PathBuf::from("presets"),
            preset_extension: "json".to_owned(),
            undo_history_limit: DEFAULT_HISTORY_LIMIT,
            labels: UndoLabels::default(),
        }
    }
}

impl MirrorSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        log::info!("Loaded mirror settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// An empty scene whose undo log honours `undo_history_limit`.
    #[must_use]
    pub fn new_scene(&self) -> Scene {
        Scene::with_history_limit(self.undo_history_limit)
    }

    /// Opens (creating if needed) the preset folder.
    pub fn open_library(&self) -> Result<PresetLibrary> {
        PresetLibrary::open(&self.presets_dir, &self.preset_extension)
    }
}
