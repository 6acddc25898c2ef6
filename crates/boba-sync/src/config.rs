//! # Sync Configuration
//!
//! Configuration for the sync engine.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Explicit path passed by the embedding app                           │
//! │                                                                         │
//! │  2. TOML config file                                                    │
//! │     ~/.config/boba-catalog/sync.toml (Linux)                            │
//! │     ~/Library/Application Support/com.boba.catalog/sync.toml (macOS)    │
//! │                                                                         │
//! │  3. Default values (lowest priority)                                    │
//! │     collection "products", command buffer 64                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # sync.toml
//! [collection]
//! name = "products"
//!
//! [agent]
//! command_buffer = 64
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SyncError, SyncResult};

// =============================================================================
// Collection Settings
// =============================================================================

/// Which remote collection the engine synchronizes against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Collection name in the remote store.
    #[serde(default = "default_collection_name")]
    pub name: String,
}

fn default_collection_name() -> String {
    boba_core::DEFAULT_COLLECTION.to_string()
}

impl Default for CollectionConfig {
    fn default() -> Self {
        CollectionConfig {
            name: default_collection_name(),
        }
    }
}

// =============================================================================
// Agent Settings
// =============================================================================

/// Tuning for the agent's channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Capacity of the handle → agent command channel.
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
}

fn default_command_buffer() -> usize {
    64
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            command_buffer: default_command_buffer(),
        }
    }
}

// =============================================================================
// Sync Config
// =============================================================================

/// Root configuration for the sync engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Remote collection settings.
    #[serde(default)]
    pub collection: CollectionConfig,

    /// Agent channel settings.
    #[serde(default)]
    pub agent: AgentConfig,
}

impl SyncConfig {
    /// Returns the platform config file path, if a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "boba", "boba-catalog")
            .map(|dirs| dirs.config_dir().join("sync.toml"))
    }

    /// Loads configuration from the given file.
    pub fn load(path: &Path) -> SyncResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: SyncConfig = toml::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded sync config");
        Ok(config)
    }

    /// Loads configuration, falling back to defaults when the file is
    /// absent or unreadable. A broken file is logged, not fatal.
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        let Some(path) = path.or_else(Self::default_path) else {
            return SyncConfig::default();
        };

        if !path.exists() {
            debug!(path = %path.display(), "No sync config file, using defaults");
            return SyncConfig::default();
        }

        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "Ignoring broken sync config");
                SyncConfig::default()
            }
        }
    }

    /// Saves configuration to the given file, creating parent directories.
    pub fn save(&self, path: &Path) -> SyncResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        }

        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        debug!(path = %path.display(), "Saved sync config");
        Ok(())
    }

    /// Checks configuration invariants.
    pub fn validate(&self) -> SyncResult<()> {
        if self.collection.name.trim().is_empty() {
            return Err(SyncError::InvalidConfig(
                "collection.name must not be empty".into(),
            ));
        }

        if self.agent.command_buffer == 0 {
            return Err(SyncError::InvalidConfig(
                "agent.command_buffer must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
