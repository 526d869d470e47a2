//! Configuration, in order of precedence:
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`NEWSVIEW_*`)
//! 3. Config file (`--config PATH`, or `<config dir>/newsview/config.toml`)
//! 4. Built-in defaults

use crate::error::{Error, NewsResult};
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scheme and host the API paths are resolved against.
    pub origin: String,
    pub api_base: String,
    /// Prefix for image paths that are neither absolute nor root-relative.
    pub media_root: String,
    /// Fixed offset dates are displayed in.
    pub utc_offset_hours: i32,
    pub discard_stale_responses: bool,
    /// Host document; the built-in one when unset.
    pub template: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: "http://127.0.0.1:8000".to_string(),
            api_base: "/api".to_string(),
            media_root: "/media/".to_string(),
            utc_offset_hours: 3,
            discard_stale_responses: false,
            template: None,
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("newsview").join("config.toml"))
    }

    /// A missing `explicit` file is an error; a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> NewsResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> NewsResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(origin) = lookup("NEWSVIEW_ORIGIN") {
            self.origin = origin;
        }
        if let Some(api_base) = lookup("NEWSVIEW_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(media_root) = lookup("NEWSVIEW_MEDIA_ROOT") {
            self.media_root = media_root;
        }
    }

    pub fn utc_offset(&self) -> NewsResult<FixedOffset> {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(Error::InvalidOffset(self.utc_offset_hours))
    }
}
