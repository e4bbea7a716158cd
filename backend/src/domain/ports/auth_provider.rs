//! Driven port for the managed authentication service.
//!
//! Credential verification, sign-up, and password reset live in a hosted
//! provider; the application only asks it to verify a credential pair and
//! hand back the principal it knows about.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::user::EmailAddress;

/// Errors raised by authentication provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthProviderError {
    /// The credential pair did not match a known account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The provider could not be reached or answered abnormally.
    #[error("authentication provider unavailable: {message}")]
    Unavailable {
        /// Adapter-supplied failure description.
        message: String,
    },
}

/// Principal data returned by the provider on successful verification.
///
/// The provider's own subject id is opaque to the domain; user records are
/// keyed by email and resolved separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPrincipal {
    /// Provider-side subject identifier.
    pub subject: String,
    /// Verified email address.
    pub email: EmailAddress,
    /// Display name held by the provider, if any.
    pub display_name: Option<String>,
}

/// Port for credential verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify a credential pair and return the provider's principal.
    async fn verify(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<ProviderPrincipal, AuthProviderError>;
}

/// In-memory authenticator used until a real provider adapter is wired.
///
/// `admin@example.com` / `password` verifies successfully; everything else
/// is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthProvider;

impl FixtureAuthProvider {
    /// Email accepted by the fixture.
    pub const EMAIL: &'static str = "admin@example.com";
    /// Password accepted by the fixture.
    pub const PASSWORD: &'static str = "password";
}

#[async_trait]
impl AuthProvider for FixtureAuthProvider {
    async fn verify(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<ProviderPrincipal, AuthProviderError> {
        if credentials.email().as_ref() == Self::EMAIL && credentials.password() == Self::PASSWORD {
            Ok(ProviderPrincipal {
                subject: "fixture-subject".to_owned(),
                email: credentials.email().clone(),
                display_name: Some("Ada Lovelace".to_owned()),
            })
        } else {
            Err(AuthProviderError::InvalidCredentials)
        }
    }
}
