//! Local persistence mirror: `{portfolio, resumes}` as one JSON document.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::context::models::ZcvState;
use crate::models::portfolio::Portfolio;
use crate::models::resume::GeneratedResume;

/// The mirrored subset of the state. Both fields are optional on read so a
/// cache holding only one of them still loads.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SavedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<Portfolio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resumes: Option<Vec<GeneratedResume>>,
}

impl From<&ZcvState> for SavedData {
    fn from(state: &ZcvState) -> Self {
        Self {
            portfolio: Some(state.portfolio.clone()),
            resumes: Some(state.resumes.clone()),
        }
    }
}

/// Storage seam for the mirror. Carried as `Arc<dyn StateStore>`.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<SavedData>>;
    async fn save(&self, data: &SavedData) -> Result<()>;
}

/// Pretty-printed JSON file, replaced atomically on every save.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> Result<Option<SavedData>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No saved data at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };
        let data = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse saved data in {}", self.path.display()))?;
        Ok(Some(data))
    }

    async fn save(&self, data: &SavedData) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(data).context("Failed to serialize saved data")?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || atomic_write(&path, &bytes))
            .await
            .context("Save task panicked")??;
        debug!("Saved data to {}", self.path.display());
        Ok(())
    }
}

/// Writes through a tempfile in the target directory, then renames over the
/// target so readers never observe a partial file.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// In-process store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    data: std::sync::Mutex<Option<SavedData>>,
    saves: std::sync::Mutex<usize>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_data(data: SavedData) -> Self {
        Self {
            data: std::sync::Mutex::new(Some(data)),
            saves: std::sync::Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> Option<SavedData> {
        self.data.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<Option<SavedData>> {
        Ok(self.snapshot())
    }

    async fn save(&self, data: &SavedData) -> Result<()> {
        *self.data.lock().unwrap_or_else(|e| e.into_inner()) = Some(data.clone());
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
