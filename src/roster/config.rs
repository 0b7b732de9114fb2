//! # Configuration
//!
//! Roster configuration is loaded with [`confique`], layering TOML files and
//! environment variables over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Resolved in priority order:
//! 1. **Command-line flags** (applied by the CLI after loading).
//! 2. **Environment variables**: `ROSTER_SORT_FIELD`, `ROSTER_COLOR`.
//! 3. **Project Config**: `./roster.toml` in the working directory.
//! 4. **Global Config**: `roster.toml` in the OS config directory (via `directories`).
//! 5. **Compiled Defaults**: `#[config(default = ...)]` below.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `sort_field` | `lastName` | Record field the list is sorted by |
//! | `color` | `true` | Style terminal output |

use crate::error::Result;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "roster.toml";
pub const DEFAULT_SORT_FIELD: &str = "lastName";

/// Configuration for roster, stored in `roster.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Record field the visible list is sorted by (ascending, case-sensitive).
    #[config(default = "lastName", env = "ROSTER_SORT_FIELD")]
    pub sort_field: String,

    /// Whether terminal output is styled. Piped output is never styled.
    #[config(default = true, env = "ROSTER_COLOR")]
    pub color: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            color: true,
        }
    }
}

impl RosterConfig {
    /// Loads the layered configuration. Missing files are skipped.
    pub fn load(project_dir: &Path, global_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder()
            .env()
            .file(project_dir.join(CONFIG_FILENAME));
        if let Some(dir) = global_dir {
            builder = builder.file(dir.join(CONFIG_FILENAME));
        }
        Ok(builder.load()?)
    }

    /// Key/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sort_field", self.sort_field.clone()),
            ("color", self.color.to_string()),
        ]
    }
}

/// The per-user configuration directory, if the platform has one.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "roster", "roster").map(|dirs| dirs.config_dir().to_path_buf())
}
