//! In-memory stand-in for the client-local selection storage.

use std::sync::Mutex;

use crate::domain::ports::{SelectionStore, SelectionStoreError};
use crate::domain::space::SpaceId;

/// Durable-per-instance key-value slot holding the selected space id.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    slot: Mutex<Option<SpaceId>>,
}

impl MemorySelectionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<SpaceId>>, SelectionStoreError> {
        self.slot.lock().map_err(|_| SelectionStoreError::Storage {
            message: "selection slot poisoned".to_owned(),
        })
    }
}

impl SelectionStore for MemorySelectionStore {
    fn load(&self) -> Result<Option<SpaceId>, SelectionStoreError> {
        Ok(*self.lock()?)
    }

    fn save(&self, id: &SpaceId) -> Result<(), SelectionStoreError> {
        *self.lock()? = Some(*id);
        Ok(())
    }

    fn clear(&self) -> Result<(), SelectionStoreError> {
        *self.lock()? = None;
        Ok(())
    }
}
