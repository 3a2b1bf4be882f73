use crate::error::FieldLoadError;
use crate::form::FormField;
use crate::source::types::DataSource;
use ahash::AHashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Request-scoped field cache keyed by source id.
///
/// Loading through the session has single-flight semantics: concurrent
/// requests for the same source share one in-flight load instead of each
/// hitting the underlying producer. A failed load is not cached; the next
/// request retries.
///
/// The session replaces the original system's per-view ephemeral cache, so
/// its lifetime is whatever "one request" means to the caller — drop it or
/// call [`reset`](Self::reset) to start fresh.
#[derive(Default)]
pub struct ResolverSession {
    cells: Mutex<AHashMap<String, Arc<OnceCell<Vec<FormField>>>>>,
}

impl ResolverSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a source's fields, deduplicating in-flight requests per source
    /// id and caching the successful result for the session's lifetime.
    pub async fn load_fields(&self, source: &DataSource) -> Result<Vec<FormField>, FieldLoadError> {
        let cell = {
            let mut cells = self.cells.lock().expect("session cache lock poisoned");
            Arc::clone(cells.entry(source.id.clone()).or_default())
        };

        let fields = cell
            .get_or_try_init(|| async {
                log::debug!("Loading fields for source '{}'", source.id);
                source.load_fields().await
            })
            .await?;
        Ok(fields.clone())
    }

    /// Drops the cached fields for one source. A load already in flight
    /// completes into the discarded cell and is not observed afterwards.
    pub fn invalidate(&self, source_id: &str) {
        self.cells
            .lock()
            .expect("session cache lock poisoned")
            .remove(source_id);
    }

    /// Drops every cached entry.
    pub fn reset(&self) {
        self.cells
            .lock()
            .expect("session cache lock poisoned")
            .clear();
    }
}
