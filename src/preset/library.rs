use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{MirrorError, Result};
use crate::preset::MirrorPreset;

/// A folder of preset files, one `<name>.<extension>` JSON file per preset.
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    root: PathBuf,
    extension: String,
}

impl PresetLibrary {
    /// Opens the library, creating the folder if it does not exist.
    pub fn open(root: impl AsRef<Path>, extension: &str) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            fs::create_dir_all(&root)?;
            log::info!("Created preset folder {}", root.display());
        }
        Ok(Self {
            root,
            extension: extension.trim_start_matches('.').to_owned(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a preset with this name is stored in.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{}", self.extension))
    }

    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.path_for(name).is_file()
    }

    /// Names of all readable presets, sorted.
    ///
    /// The name comes from the file contents. Unreadable files and presets
    /// with an empty name are left out.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }

            match read_preset(&path) {
                Ok(preset) if !preset.name.trim().is_empty() => names.push(preset.name),
                Ok(_) => {}
                Err(e) => log::warn!("Ignoring unreadable preset {}: {e}", path.display()),
            }
        }

        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Writes a preset. An existing file is only replaced when `overwrite` is set.
    pub fn save(&self, preset: &MirrorPreset, overwrite: bool) -> Result<PathBuf> {
        validate_name(&preset.name)?;

        let path = self.path_for(&preset.name);
        if path.exists() && !overwrite {
            return Err(MirrorError::PresetExists(preset.name.clone()));
        }

        fs::write(&path, preset.to_json()?)?;
        log::info!("Saved preset '{}' ({} pairs)", preset.name, preset.pairs.len());
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<MirrorPreset> {
        validate_name(name)?;

        let path = self.path_for(name);
        if !path.is_file() {
            return Err(MirrorError::PresetNotFound(name.to_owned()));
        }
        read_preset(&path)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        validate_name(name)?;

        let path = self.path_for(name);
        if !path.is_file() {
            return Err(MirrorError::PresetNotFound(name.to_owned()));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

fn read_preset(path: &Path) -> Result<MirrorPreset> {
    let text = fs::read_to_string(path)?;
    MirrorPreset::from_json(&text)
}

/// Names double as file stems: non-empty, no surrounding whitespace, no path
/// separators, no `..`.
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty()
        || name.trim() != name
        || name.contains(['/', '\\'])
        || name.contains("..")
    {
        return Err(MirrorError::InvalidPresetName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_reject_paths() {
        assert!(validate_name("Arms").is_ok());
        assert!(validate_name("left arm v2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("../escape").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name(" Arms").is_err());
        assert!(validate_name("Arms\t").is_err());
    }
}
