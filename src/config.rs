//! The JSON configuration file consumed once at startup by each binary.
//!
//! ```json
//! {
//!     "mattermost": {
//!         "url": "https://chat.example.com",
//!         "userID": "bot@example.com",
//!         "password": "hunter2",
//!         "version": 4
//!     },
//!     "registry": {
//!         "on_conflict": "overwrite"
//!     }
//! }
//! ```
//!
//! The `registry` section is optional. Paths are handed to components
//! explicitly; nothing in the library computes its own file location.

use crate::mattermost::api::VersionSpec;
use crate::registry::ConflictPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub mattermost: MattermostConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Connection settings for the Mattermost instance.
#[derive(Debug, Deserialize)]
pub struct MattermostConfig {
    pub url: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub password: String,
    pub version: VersionSpec,
}

/// Registry behaviour knobs.
#[derive(Debug, Default, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub on_conflict: ConflictPolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    Unreadable(io::Error),
    Malformed(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ConfigError::NotFound(p) => format!("Config file not found: {}", p.display()),
            ConfigError::Unreadable(e) => format!("Config file unreadable: {}", e),
            ConfigError::Malformed(e) => format!("Config file is malformed: {}", e),
        };

        write!(f, "{}", x)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(path.to_owned()),
            _ => ConfigError::Unreadable(e),
        })?;

        serde_json::from_str(&text).map_err(ConfigError::Malformed)
    }
}
