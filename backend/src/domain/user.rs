//! User identity and the persisted user record.
//!
//! The [`UserRecord`] is the profile document keyed by email in the managed
//! store. Its identifier is distinct from the authentication provider's
//! principal id; resolution happens through the identity service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use uuid::Uuid;

use crate::domain::preferences::Preferences;
use crate::domain::space::SpaceId;

/// Validation failures for user identity values.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum UserValidationError {
    /// The identifier is not a valid UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The email address is blank once trimmed.
    #[error("email address must not be empty")]
    EmptyEmail,
    /// The email address has no `@` separating local part and domain.
    #[error("email address must contain a local part and a domain")]
    MalformedEmail,
}

/// Stable user-record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalised email address used as the lookup key for user records.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and lowercased.
/// - Contains exactly one `@` with a non-empty local part and domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let mut parts = normalised.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next();
        match domain {
            Some(domain) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
                Ok(Self(normalised))
            }
            _ => Err(UserValidationError::MalformedEmail),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Persisted user profile document.
///
/// ## Invariants
/// - `spaces` never contains duplicate identifiers.
/// - `email` is the unique lookup key; uniqueness is enforced by the
///   directory adapter at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct UserRecord {
    id: UserId,
    email: EmailAddress,
    first_name: String,
    last_name: String,
    display_name: String,
    spaces: Vec<SpaceId>,
    needs_onboarding: bool,
    preferences: Preferences,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build a freshly-created record: empty membership, onboarding
    /// pending, default preferences.
    #[must_use]
    pub fn new(id: UserId, email: EmailAddress, display_name: impl Into<String>) -> Self {
        Self {
            id,
            email,
            first_name: String::new(),
            last_name: String::new(),
            display_name: display_name.into(),
            spaces: Vec::new(),
            needs_onboarding: true,
            preferences: Preferences::default(),
            created_at: Utc::now(),
        }
    }

    /// Stable record identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Email lookup key.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Given name, possibly empty for lazily-created records.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name, possibly empty for lazily-created records.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Name shown in the UI: given plus family name when both are set,
    /// otherwise the stored display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() || self.last_name.is_empty() {
            self.display_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    /// Identifiers of the spaces this user owns or joined, in insertion
    /// order, free of duplicates.
    #[must_use]
    pub fn spaces(&self) -> &[SpaceId] {
        &self.spaces
    }

    /// Whether the first-run flow must still be completed.
    #[must_use]
    pub const fn needs_onboarding(&self) -> bool {
        self.needs_onboarding
    }

    /// Preference bag.
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Creation timestamp; the duplicate tie-break key.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Append a space id when absent and clear the onboarding flag.
    ///
    /// Returns `false` when the id was already present; the membership
    /// list never accumulates duplicates.
    pub fn attach_space(&mut self, id: SpaceId) -> bool {
        self.needs_onboarding = false;
        if self.spaces.contains(&id) {
            return false;
        }
        self.spaces.push(id);
        true
    }

    /// Remove a space id from the membership list.
    ///
    /// Returns `false` when the id was not present.
    pub fn detach_space(&mut self, id: &SpaceId) -> bool {
        let before = self.spaces.len();
        self.spaces.retain(|member| member != id);
        before != self.spaces.len()
    }

    /// Replace the profile name fields.
    pub fn set_names(&mut self, first_name: impl Into<String>, last_name: impl Into<String>) {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
    }

    /// Replace the preference bag.
    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }

    #[cfg(test)]
    pub(crate) fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
