//! Settings panel use-cases: profile fields and the preference bag.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{
    DirectoryError, ProfileUpdate, SettingsCommand, UserDirectory, UserProfileQuery,
};
use crate::domain::preferences::Preferences;
use crate::domain::user::{UserId, UserRecord};

/// Settings service backed by the user directory.
#[derive(Clone)]
pub struct SettingsService<D> {
    directory: Arc<D>,
}

impl<D> SettingsService<D> {
    /// Create a new service over the given directory.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

impl<D> SettingsService<D>
where
    D: UserDirectory,
{
    fn map_directory_error(error: DirectoryError) -> Error {
        match error {
            DirectoryError::Connection { message } => {
                Error::service_unavailable(format!("user directory unavailable: {message}"))
            }
            DirectoryError::MissingRecord { id } => {
                Error::not_found(format!("no user record with id {id}"))
            }
            other => Error::internal(format!("user directory error: {other}")),
        }
    }

    async fn reload(&self, id: &UserId) -> Result<UserRecord, Error> {
        self.directory
            .find_by_id(id)
            .await
            .map_err(Self::map_directory_error)?
            .ok_or_else(|| Error::not_found(format!("no user record with id {id}")))
    }
}

#[async_trait]
impl<D> UserProfileQuery for SettingsService<D>
where
    D: UserDirectory,
{
    async fn fetch_profile(&self, id: &UserId) -> Result<UserRecord, Error> {
        self.reload(id).await
    }
}

#[async_trait]
impl<D> SettingsCommand for SettingsService<D>
where
    D: UserDirectory,
{
    async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserRecord, Error> {
        self.directory
            .update_names(
                id,
                update.first_name.trim(),
                update.last_name.trim(),
            )
            .await
            .map_err(Self::map_directory_error)?;
        self.reload(id).await
    }

    async fn update_preferences(
        &self,
        id: &UserId,
        preferences: Preferences,
    ) -> Result<UserRecord, Error> {
        self.directory
            .update_preferences(id, &preferences)
            .await
            .map_err(Self::map_directory_error)?;
        self.reload(id).await
    }
}
