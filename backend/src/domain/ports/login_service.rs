//! Driving port for the login use-case.
//!
//! Inbound adapters call this to turn a credential pair into an enriched
//! session principal without knowing about the provider or the directory.

use async_trait::async_trait;

use crate::domain::auth::{LoginCredentials, SessionPrincipal};
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the enriched session principal.
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionPrincipal, Error>;
}

/// Fixture login service accepting any credential pair.
#[derive(Debug, Clone, Copy)]
pub struct FixtureLoginService(pub UserId);

impl Default for FixtureLoginService {
    fn default() -> Self {
        Self(UserId::random())
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionPrincipal, Error> {
        Ok(SessionPrincipal {
            user_id: self.0,
            email: credentials.email().clone(),
            display_name: "Ada Lovelace".to_owned(),
        })
    }
}
