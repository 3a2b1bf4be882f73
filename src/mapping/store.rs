use crate::error::PersistenceError;
use crate::mapping::payload::MappingEntry;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Persistence boundary for the flat mapping payload.
///
/// `save` is a full replace of whatever was stored before. Failures are
/// surfaced as-is; the engine does not retry and never partially applies a
/// save.
#[async_trait]
pub trait MappingStore: Send + Sync {
    async fn load(&self) -> Result<Vec<MappingEntry>, PersistenceError>;
    async fn save(&self, entries: &[MappingEntry]) -> Result<(), PersistenceError>;
}

/// In-process store; the default for tests and embedding without a backend.
#[derive(Default)]
pub struct MemoryMappingStore {
    entries: Mutex<Vec<MappingEntry>>,
}

impl MemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<MappingEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl MappingStore for MemoryMappingStore {
    async fn load(&self) -> Result<Vec<MappingEntry>, PersistenceError> {
        Ok(self.entries.lock().await.clone())
    }

    async fn save(&self, entries: &[MappingEntry]) -> Result<(), PersistenceError> {
        *self.entries.lock().await = entries.to_vec();
        log::debug!("Saved {} mapping entries", entries.len());
        Ok(())
    }
}

/// Store backed by a JSON file holding the flat entry list.
pub struct JsonFileMappingStore {
    path: PathBuf,
}

impl JsonFileMappingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MappingStore for JsonFileMappingStore {
    /// A missing file reads as an empty payload; anything else is surfaced.
    async fn load(&self) -> Result<Vec<MappingEntry>, PersistenceError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(PersistenceError::LoadError(format!(
                    "could not read '{}': {e}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_str(&content)
            .map_err(|e| PersistenceError::LoadError(format!("invalid payload: {e}")))
    }

    async fn save(&self, entries: &[MappingEntry]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| PersistenceError::SaveError(e.to_string()))?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            PersistenceError::SaveError(format!("could not write '{}': {e}", self.path.display()))
        })?;
        log::debug!(
            "Saved {} mapping entries to '{}'",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}
