//! Login flow: verify credentials, resolve identity, enrich the session.
//!
//! The managed provider only vouches for the credential pair; the session
//! principal carries the *record* id so every later operation is keyed by
//! the directory, not the provider.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::{LoginCredentials, SessionPrincipal};
use crate::domain::error::Error;
use crate::domain::identity::IdentityService;
use crate::domain::ports::{
    AuthProvider, AuthProviderError, IdentityResolver, LoginService, ProfileHint, UserDirectory,
};

/// Login service composing the provider, the resolver, and the directory.
#[derive(Clone)]
pub struct LoginFlow<A, D> {
    provider: Arc<A>,
    directory: Arc<D>,
    identity: IdentityService<D>,
}

impl<A, D> LoginFlow<A, D> {
    /// Create a new flow over the given provider and directory.
    pub fn new(provider: Arc<A>, directory: Arc<D>) -> Self {
        let identity = IdentityService::new(directory.clone());
        Self {
            provider,
            directory,
            identity,
        }
    }
}

fn map_provider_error(error: AuthProviderError) -> Error {
    match error {
        AuthProviderError::InvalidCredentials => Error::unauthorized("invalid credentials"),
        AuthProviderError::Unavailable { message } => {
            Error::service_unavailable(format!("authentication provider unavailable: {message}"))
        }
    }
}

#[async_trait]
impl<A, D> LoginService for LoginFlow<A, D>
where
    A: AuthProvider,
    D: UserDirectory,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionPrincipal, Error> {
        let principal = self
            .provider
            .verify(credentials)
            .await
            .map_err(map_provider_error)?;

        let hint = ProfileHint {
            display_name: principal.display_name,
        };
        let user_id = self.identity.resolve(&principal.email, &hint).await?;

        let record = self
            .directory
            .find_by_id(&user_id)
            .await
            .map_err(|err| Error::internal(format!("user directory error: {err}")))?
            .ok_or_else(|| Error::internal(format!("user record {user_id} vanished post-login")))?;

        Ok(SessionPrincipal {
            user_id,
            email: record.email().clone(),
            display_name: record.display_name(),
        })
    }
}
