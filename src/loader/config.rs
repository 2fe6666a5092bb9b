//! Dashboard configuration file loading
//!
//! The config lives at `~/.sentiboard/config.json` unless a path is given.
//! It is read on every invocation and never cached.

use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{DashboardConfig, Result, SentiboardError};

pub struct ConfigLoader {
    path: PathBuf,
    /// Explicit paths must exist; the default path may be absent
    explicit: bool,
}

impl ConfigLoader {
    /// Loader for the default location (`~/.sentiboard/config.json`)
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| SentiboardError::Config("Cannot determine home directory".into()))?;
        Ok(Self {
            path: base_dirs.home_dir().join(".sentiboard").join("config.json"),
            explicit: false,
        })
    }

    /// Loader for a user-supplied path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            explicit: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the configuration.
    ///
    /// A missing default file yields [`DashboardConfig::default`].
    pub fn load(&self) -> Result<DashboardConfig> {
        if !self.explicit && !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(DashboardConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: DashboardConfig = serde_json::from_str(&content).map_err(|e| {
            SentiboardError::Config(format!("{}: {}", self.path.display(), e))
        })?;
        config.validate()?;

        tracing::info!(
            path = %self.path.display(),
            emotions = config.emotions.len(),
            gauges = config.gauges.len(),
            "loaded dashboard config"
        );
        Ok(config)
    }
}
