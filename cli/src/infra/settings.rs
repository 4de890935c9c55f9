//! Infrastructure implementation of the `SettingsStore` port.
//!
//! Settings live in one YAML list. Reads and writes run on the blocking pool;
//! every write replaces the whole file atomically (temp file + rename).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::SettingsStore;
use crate::domain::{SettingRecord, SettingsError};

/// YAML-backed settings store.
pub struct YamlSettingsStore {
    path: PathBuf,
}

impl YamlSettingsStore {
    /// Store at `override_path`, or `~/.appdock/settings.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the home directory cannot
    /// be determined.
    pub fn new(override_path: Option<&str>) -> Result<Self> {
        if let Some(path) = override_path {
            return Ok(Self::with_path(PathBuf::from(path)));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_path(home.join(".appdock").join("settings.yaml")))
    }

    /// Store at an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn unreachable(path: &Path, reason: impl ToString) -> anyhow::Error {
    SettingsError::Unreachable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
    .into()
}

fn load_sync(path: &Path) -> Result<Vec<SettingRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| unreachable(path, e))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(&content).map_err(|e| unreachable(path, e))
}

fn save_sync(path: &Path, records: &[SettingRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let content = serde_yaml::to_string(records).context("serializing settings")?;

    let temp_path = path.with_extension("yaml.tmp");
    std::fs::write(&temp_path, &content)
        .with_context(|| format!("writing temp file {}", temp_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
    }

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("finalizing settings file {}", path.display()))?;
    Ok(())
}

fn upsert_sync(path: &Path, record: &SettingRecord) -> Result<()> {
    let mut records = load_sync(path)?;
    match records.iter_mut().find(|r| r.name == record.name) {
        Some(existing) => existing.value = record.value.clone(),
        None => records.push(record.clone()),
    }
    save_sync(path, &records).map_err(|e| {
        SettingsError::WriteFailed {
            name: record.name.clone(),
            reason: format!("{e:#}"),
        }
        .into()
    })
}

impl SettingsStore for YamlSettingsStore {
    async fn find_all(&self) -> Result<Vec<SettingRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_sync(&path))
            .await
            .context("settings load task panicked")?
    }

    async fn find_one(&self, name: &str) -> Result<Option<SettingRecord>> {
        Ok(self.find_all().await?.into_iter().find(|r| r.name == name))
    }

    async fn upsert(&self, record: &SettingRecord) -> Result<()> {
        let path = self.path.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || upsert_sync(&path, &record))
            .await
            .context("settings save task panicked")?
    }
}
