//! BioSync configuration.
//!
//! Loaded from `~/.biosync/config.toml`. Every key is optional; a missing
//! file means defaults.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::model::ProfileId;
use crate::storage::SqliteStore;

/// Environment variable overriding the store location.
pub const STORE_ENV: &str = "BIOSYNC_STORE";

/// BioSync configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Profile used when no traveller has been selected yet.
    pub default_profile: ProfileId,

    /// Where the state database lives.
    /// Defaults to `~/.biosync/state.sqlite`.
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Load config from `~/.biosync/config.toml`, or defaults if it doesn't exist.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        if config.default_profile.as_str().is_empty() {
            return Err(format!(
                "default-profile is empty in {}\n\
                 Remove it or set it to a profile such as \"user1\".",
                path.display()
            ));
        }

        Ok(config)
    }

    /// The config file path: `~/.biosync/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".biosync").join("config.toml"))
    }

    /// Resolve the store path: `BIOSYNC_STORE`, then `store-path`, then the default.
    pub fn resolve_store_path(&self) -> Option<PathBuf> {
        if let Ok(path) = env::var(STORE_ENV)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        self.store_path.clone().or_else(SqliteStore::default_path)
    }
}
