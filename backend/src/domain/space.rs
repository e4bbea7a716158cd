//! The space aggregate: a named collaboration container with one owner.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use uuid::Uuid;

use crate::domain::user::UserId;

/// Upper bound on space name length, in characters.
pub const SPACE_NAME_MAX: usize = 64;

/// Validation failures for space values.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SpaceValidationError {
    /// The identifier is not a valid UUID.
    #[error("space id must be a valid UUID")]
    InvalidId,
    /// The name is blank once trimmed.
    #[error("space name must not be empty")]
    EmptyName,
    /// The name exceeds [`SPACE_NAME_MAX`] characters.
    #[error("space name must be at most {SPACE_NAME_MAX} characters")]
    NameTooLong,
}

/// Stable space identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(Uuid);

impl SpaceId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, SpaceValidationError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| SpaceValidationError::InvalidId)
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated, trimmed space name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpaceName(String);

impl SpaceName {
    /// Validate and trim a space name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SpaceValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SpaceValidationError::EmptyName);
        }
        if trimmed.chars().count() > SPACE_NAME_MAX {
            return Err(SpaceValidationError::NameTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for SpaceName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SpaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for SpaceName {
    type Error = SpaceValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpaceName> for String {
    fn from(value: SpaceName) -> Self {
        value.0
    }
}

/// Optional per-space presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSettings {
    /// Preferred landing view inside the space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_view: Option<String>,
    /// Whether activity notifications are on for this space.
    pub notifications: bool,
    /// Accent colour, as a CSS-compatible string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
}

/// Persisted space document.
///
/// ## Invariants
/// - The owner id always appears in the member list.
/// - The member list never contains duplicate identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Space {
    id: SpaceId,
    name: SpaceName,
    owner_id: UserId,
    members: Vec<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    settings: Option<SpaceSettings>,
    created_at: DateTime<Utc>,
}

impl Space {
    /// Build a new space; the member list starts as `[owner]`.
    #[must_use]
    pub fn new(id: SpaceId, name: SpaceName, owner_id: UserId) -> Self {
        Self {
            id,
            name,
            owner_id,
            members: vec![owner_id],
            settings: None,
            created_at: Utc::now(),
        }
    }

    /// Stable space identifier.
    #[must_use]
    pub const fn id(&self) -> SpaceId {
        self.id
    }

    /// Space name.
    #[must_use]
    pub const fn name(&self) -> &SpaceName {
        &self.name
    }

    /// Owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Members, owner included, in insertion order.
    #[must_use]
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    /// Presentation settings, if any were saved.
    #[must_use]
    pub const fn settings(&self) -> Option<&SpaceSettings> {
        self.settings.as_ref()
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `user` appears in the member list.
    #[must_use]
    pub fn has_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    /// Add a member when absent; the list never accumulates duplicates.
    pub fn add_member(&mut self, user: UserId) -> bool {
        if self.members.contains(&user) {
            return false;
        }
        self.members.push(user);
        true
    }

    /// Replace the presentation settings.
    pub fn set_settings(&mut self, settings: SpaceSettings) {
        self.settings = Some(settings);
    }

    #[cfg(test)]
    pub(crate) fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn space() -> Space {
        Space::new(
            SpaceId::random(),
            SpaceName::new("Acme").expect("valid name"),
            UserId::random(),
        )
    }

    #[rstest]
    #[case("Acme", "Acme")]
    #[case("  padded  ", "padded")]
    fn names_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(SpaceName::new(raw).expect("valid name").as_ref(), expected);
    }

    #[rstest]
    #[case("", SpaceValidationError::EmptyName)]
    #[case("   ", SpaceValidationError::EmptyName)]
    #[case(&"n".repeat(SPACE_NAME_MAX + 1), SpaceValidationError::NameTooLong)]
    fn invalid_names_are_rejected(#[case] raw: &str, #[case] expected: SpaceValidationError) {
        assert_eq!(SpaceName::new(raw).expect_err("invalid name"), expected);
    }

    #[test]
    fn the_owner_is_always_a_member() {
        let space = space();
        assert!(space.has_member(&space.owner_id()));
        assert_eq!(space.members(), &[space.owner_id()]);
    }

    #[test]
    fn add_member_deduplicates() {
        let mut space = space();
        let guest = UserId::random();

        assert!(space.add_member(guest));
        assert!(!space.add_member(guest));
        assert!(!space.add_member(space.owner_id()));
        assert_eq!(space.members().len(), 2);
    }

    #[test]
    fn settings_are_optional_and_survive_a_round_trip() {
        let mut space = space();
        space.set_settings(SpaceSettings {
            default_view: Some("board".to_owned()),
            notifications: true,
            accent_color: Some("#0055ff".to_owned()),
        });

        let value = serde_json::to_value(&space).expect("space serialises");
        assert_eq!(value["settings"]["defaultView"], "board");
        let parsed: Space = serde_json::from_value(value).expect("space deserialises");
        assert_eq!(parsed.settings(), space.settings());
    }

    #[test]
    fn spaces_serialise_with_the_document_field_names() {
        let space = space();
        let value = serde_json::to_value(&space).expect("space serialises");
        for key in ["id", "name", "ownerId", "members", "createdAt"] {
            assert!(value.get(key).is_some(), "missing document field {key}");
        }
        assert!(value.get("settings").is_none());
    }
}
