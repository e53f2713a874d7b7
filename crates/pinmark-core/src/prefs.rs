// License: MIT
//
// Key/value preference store. Values are plain strings; callers own parsing
// and fall back to their own defaults when a key is missing or malformed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use eventline::{debug, warn};

use crate::error::Result;
use crate::palette;

pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    /// Flush to the backing medium.
    fn save(&mut self) -> Result<()>;
}

/// In-memory store, `save` is a no-op.
#[derive(Debug, Default, Clone)]
pub struct MemoryPrefs {
    values: BTreeMap<String, String>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn save(&mut self) -> Result<()> {
        Ok(())
    }
}

/// JSON object of string -> string on disk.
///
/// Saving first renames the current file to `<name>.bak`, so the previous
/// generation survives a failed write.
#[derive(Debug)]
pub struct JsonPrefs {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonPrefs {
    /// Missing or unreadable files start from defaults, never an error.
    pub fn load(path: &Path) -> Self {
        let values = match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(v) => v,
                Err(e) => {
                    warn!("unreadable preferences {}: {e}; using defaults", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) => {
                debug!("no preferences at {}: {e}; using defaults", path.display());
                BTreeMap::new()
            }
        };

        let mut prefs = Self {
            path: path.to_path_buf(),
            values,
        };

        if prefs.values.is_empty() {
            palette::reset_to_defaults(&mut prefs);
        }

        prefs
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }
}

impl PrefStore for JsonPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if self.path.exists() {
            let backup = self.backup_path();
            if backup.exists() {
                std::fs::remove_file(&backup)?;
            }
            std::fs::rename(&self.path, &backup)?;
        }

        let text = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, text)?;
        debug!("preferences saved to {}", self.path.display());
        Ok(())
    }
}
