//! Driving ports for the settings panel: profile reads and updates.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::preferences::Preferences;
use crate::domain::user::{UserId, UserRecord};

/// Profile name fields accepted from the settings panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Given name; stored trimmed.
    pub first_name: String,
    /// Family name; stored trimmed.
    pub last_name: String,
}

/// Domain use-case port for reading the current user's record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Fetch the record for the authenticated user.
    async fn fetch_profile(&self, id: &UserId) -> Result<UserRecord, Error>;
}

/// Domain use-case port for settings mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsCommand: Send + Sync {
    /// Update the profile name fields, returning the updated record.
    async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserRecord, Error>;

    /// Replace the preference bag, returning the updated record.
    async fn update_preferences(
        &self,
        id: &UserId,
        preferences: Preferences,
    ) -> Result<UserRecord, Error>;
}
