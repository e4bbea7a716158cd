//! Driven port for the durable, client-local selection storage.
//!
//! Stands in for whatever key-value storage the client shell persists the
//! selected space id in across reloads. Injected so selection logic is
//! testable without real browser storage.

use crate::domain::space::SpaceId;

/// Errors raised by selection storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionStoreError {
    /// The backing storage rejected the operation.
    #[error("selection storage failed: {message}")]
    Storage {
        /// Adapter-supplied failure description.
        message: String,
    },
}

/// Port for persisting the currently selected space id.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionStore: Send + Sync {
    /// The persisted selection, if one exists.
    fn load(&self) -> Result<Option<SpaceId>, SelectionStoreError>;

    /// Persist `id` as the current selection.
    fn save(&self, id: &SpaceId) -> Result<(), SelectionStoreError>;

    /// Remove the persisted selection.
    fn clear(&self) -> Result<(), SelectionStoreError>;
}
