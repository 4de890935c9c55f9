//! Loads `AppdockConfig` from a YAML file plus environment overrides.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::config::{AppdockConfig, validate_config};

/// Reads `~/.appdock/config.yaml` (or `$APPDOCK_CONFIG`).
pub struct YamlConfigLoader;

impl YamlConfigLoader {
    /// Load, apply `APPDOCK_BACKEND` / `APPDOCK_CATALOG` overrides, validate.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the resulting configuration is invalid.
    pub fn load(&self) -> Result<AppdockConfig> {
        let path = self.path()?;
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?
        } else {
            AppdockConfig::default()
        };
        apply_overrides(
            &mut config,
            std::env::var("APPDOCK_BACKEND").ok(),
            std::env::var("APPDOCK_CATALOG").ok(),
        );
        validate_config(&config)?;
        Ok(config)
    }

    /// Location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("APPDOCK_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".appdock").join("config.yaml"))
    }
}

fn apply_overrides(config: &mut AppdockConfig, backend: Option<String>, catalog: Option<String>) {
    if let Some(url) = backend.filter(|v| !v.is_empty()) {
        config.backend_url = url;
    }
    if let Some(url) = catalog.filter(|v| !v.is_empty()) {
        config.catalog_url = url;
    }
}
