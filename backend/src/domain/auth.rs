//! Authentication primitives: login credentials and the enriched principal.
//!
//! Credential validation happens here so inbound payload parsing stays out
//! of handlers; the managed authentication provider only ever sees a
//! well-formed credential pair.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use zeroize::Zeroizing;

use crate::domain::user::{EmailAddress, UserId, UserValidationError};

/// Validation failures for login payloads.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum LoginValidationError {
    /// The email was missing or malformed.
    #[error(transparent)]
    InvalidEmail(#[from] UserValidationError),
    /// The password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is normalised (trimmed, lowercased).
/// - `password` is non-empty but otherwise untouched, so stored
///   credentials with deliberate whitespace keep matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password as provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Session principal carried in the cookie after a successful login.
///
/// These are the enriched token fields: the resolved user-record id (not
/// the provider's principal id), the email, and the display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPrincipal {
    /// Resolved user-record identifier.
    pub user_id: UserId,
    /// Email address the record is keyed by.
    pub email: EmailAddress,
    /// Name shown in the dashboard shell.
    pub display_name: String,
}
