//! Driven port for the space collection in the managed store.

use async_trait::async_trait;

use crate::domain::space::{Space, SpaceId};
use crate::domain::user::UserId;

/// Errors raised by space repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpaceStoreError {
    /// The store could not be reached.
    #[error("space store unreachable: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("space store operation failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

/// Port for space storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpaceRepository: Send + Sync {
    /// Persist a new space document.
    async fn insert(&self, space: &Space) -> Result<(), SpaceStoreError>;

    /// Fetch a space by id.
    async fn find_by_id(&self, id: &SpaceId) -> Result<Option<Space>, SpaceStoreError>;

    /// All spaces owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Space>, SpaceStoreError>;

    /// Delete a space document. Deleting an absent id is a no-op.
    async fn delete(&self, id: &SpaceId) -> Result<(), SpaceStoreError>;
}
