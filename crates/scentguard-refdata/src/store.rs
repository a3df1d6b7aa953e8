use crate::load_reference_data;
use camino::{Utf8Path, Utf8PathBuf};
use scentguard_domain::reference::ReferenceData;
use std::sync::{Arc, PoisonError, RwLock};

/// Lazily loaded, shareable reference tables.
///
/// Evaluations hold an `Arc` snapshot, so a [`ReferenceStore::reload`] never changes
/// the tables under an evaluation already in flight.
#[derive(Debug)]
pub struct ReferenceStore {
    dir: Utf8PathBuf,
    snapshot: RwLock<Option<Arc<ReferenceData>>>,
}

impl ReferenceStore {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            snapshot: RwLock::new(None),
        }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Load on first use; later calls return the same snapshot.
    pub fn load(&self) -> anyhow::Result<Arc<ReferenceData>> {
        if let Some(data) = self.snapshot() {
            return Ok(data);
        }
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(data) = guard.as_ref() {
            return Ok(Arc::clone(data));
        }
        let data = Arc::new(load_reference_data(&self.dir)?);
        *guard = Some(Arc::clone(&data));
        Ok(data)
    }

    /// Re-read every dataset and swap it in. On error the previous snapshot stays.
    pub fn reload(&self) -> anyhow::Result<Arc<ReferenceData>> {
        let data = Arc::new(load_reference_data(&self.dir)?);
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::clone(&data));
        tracing::info!(dir = %self.dir, "reference data reloaded");
        Ok(data)
    }

    pub fn snapshot(&self) -> Option<Arc<ReferenceData>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
