//! Driving port for resolving an authenticated email to a user record.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{EmailAddress, UserId};

/// Profile data available when a record has to be created lazily.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileHint {
    /// Display name carried by the session token, if any.
    pub display_name: Option<String>,
}

impl ProfileHint {
    /// Display name to store on a new record.
    #[must_use]
    pub fn display_name_or_default(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| "New User".to_owned())
    }
}

/// Domain use-case port for identity resolution.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve `email` to its user-record id, creating the record on
    /// first sight.
    async fn resolve(&self, email: &EmailAddress, hint: &ProfileHint) -> Result<UserId, Error>;
}

/// Fixture resolver returning a fixed id for any email.
#[derive(Debug, Clone, Copy)]
pub struct FixtureIdentityResolver(pub UserId);

impl Default for FixtureIdentityResolver {
    fn default() -> Self {
        Self(UserId::random())
    }
}

#[async_trait]
impl IdentityResolver for FixtureIdentityResolver {
    async fn resolve(&self, _email: &EmailAddress, _hint: &ProfileHint) -> Result<UserId, Error> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_resolver_returns_its_configured_id() {
        let id = UserId::random();
        let resolver = FixtureIdentityResolver(id);
        let email = EmailAddress::new("a@x.com").expect("valid email");

        let resolved = resolver
            .resolve(&email, &ProfileHint::default())
            .await
            .expect("resolution succeeds");
        assert_eq!(resolved, id);
    }

    #[rstest]
    fn hint_falls_back_to_a_placeholder_name() {
        assert_eq!(ProfileHint::default().display_name_or_default(), "New User");
        let hint = ProfileHint {
            display_name: Some("Ada".to_owned()),
        };
        assert_eq!(hint.display_name_or_default(), "Ada");
    }
}
