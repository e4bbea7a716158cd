//! Driven port for the user-record collection in the managed store.
//!
//! Each method is a single-document operation; the store serialises
//! individual document writes but offers no cross-document transaction.
//! Multi-field updates that must land together (membership plus onboarding
//! flag) are therefore modelled as one port call.

use async_trait::async_trait;

use crate::domain::preferences::Preferences;
use crate::domain::space::SpaceId;
use crate::domain::user::{EmailAddress, UserId, UserRecord};

/// Errors raised by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// The store could not be reached.
    #[error("user directory unreachable: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("user directory operation failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// An insert would violate the email uniqueness constraint.
    #[error("a user record already exists for {email}")]
    DuplicateEmail {
        /// The conflicting email address.
        email: String,
    },
    /// The addressed record does not exist.
    #[error("no user record with id {id}")]
    MissingRecord {
        /// The missing record id.
        id: String,
    },
}

/// Port for user-record storage and retrieval.
///
/// # Ordering
///
/// [`find_by_email`](UserDirectory::find_by_email) returns matches sorted
/// by creation time, then by id, so duplicate tie-breaks are deterministic
/// across adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Insert a new record, enforcing email uniqueness at write time.
    async fn insert(&self, record: &UserRecord) -> Result<(), DirectoryError>;

    /// Fetch a record by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, DirectoryError>;

    /// All records keyed by `email`, oldest first.
    ///
    /// More than one entry signals a pre-existing data anomaly; callers
    /// decide how to tie-break.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Vec<UserRecord>, DirectoryError>;

    /// Append `space` to the user's membership list when absent and clear
    /// the onboarding flag, in one document write. Adding an id that is
    /// already present is a no-op.
    async fn attach_space(&self, id: &UserId, space: &SpaceId) -> Result<(), DirectoryError>;

    /// Remove `space` from the user's membership list.
    async fn detach_space(&self, id: &UserId, space: &SpaceId) -> Result<(), DirectoryError>;

    /// Replace the profile name fields.
    async fn update_names(
        &self,
        id: &UserId,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), DirectoryError>;

    /// Replace the preference bag.
    async fn update_preferences(
        &self,
        id: &UserId,
        preferences: &Preferences,
    ) -> Result<(), DirectoryError>;
}
