//! Stepping configuration persistence.
//!
//! A single YAML file; today it only carries the re-anchoring cutoff.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for change-driven session management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Minimum inserted-text length (in chars) for an external edit to be
    /// adopted as a new steppable span. Shorter insertions and pure
    /// deletions only invalidate the current session.
    #[serde(default = "default_reanchor_min_chars")]
    pub reanchor_min_chars: usize,
}

fn default_reanchor_min_chars() -> usize {
    2
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            reanchor_min_chars: default_reanchor_min_chars(),
        }
    }
}

impl StepConfig {
    /// Load config from a file, or return defaults if missing or invalid.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
