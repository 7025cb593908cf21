//! Engine settings persistence
//!
//! Stores the tunable knobs of the binding engine as YAML. The host's
//! config layer watches the file and pushes changes into the engine via
//! [`crate::KeyBindings::apply_config`]; the engine itself never reads
//! configuration at resolve time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BindError;

/// Settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timeout in milliseconds waiting for the next keystroke of a chain
    #[serde(default = "default_chain_timeout")]
    pub chain_timeout_ms: u64,
}

fn default_chain_timeout() -> u64 {
    750
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chain_timeout_ms: default_chain_timeout(),
        }
    }
}

impl EngineConfig {
    /// Load settings from disk, or return defaults if missing or malformed
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Engine config not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded engine config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse engine config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read engine config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to disk, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), BindError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BindError::Io(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| BindError::Io(format!("serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| BindError::Io(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Saved engine config to {}", path.display());
        Ok(())
    }
}
