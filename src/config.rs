//! CLI preferences persistence.
//!
//! Stores the last selected class and an optional data-directory override as
//! JSON at `~/.local/share/talent-calc/config.json`. Loaded once on startup;
//! saved on every change so the file is always current.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file path.
fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("talent-calc")
        .join("config.json")
}

/// Persisted CLI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_class")]
    pub last_class: String,
    /// Overrides the `data/` directory next to the working directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Path the config was loaded from (not serialized).
    #[serde(skip)]
    path: PathBuf,
}

fn default_class() -> String {
    "warrior".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_class: default_class(),
            data_dir: None,
            path: default_path(),
        }
    }
}

impl AppConfig {
    /// Load from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = default_path();
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        config.path = path;
        config
    }

    /// Persist current config to disk.
    pub fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = std::fs::write(&self.path, json);
        }
    }
}
