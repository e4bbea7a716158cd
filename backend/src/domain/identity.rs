//! Identity resolution: map an authenticated email to a user record.
//!
//! The resolver is a find-or-create: the first authenticated request for an
//! unknown email materialises its profile document. Uniqueness is enforced
//! at write time by the directory; a lost insert race is resolved by
//! re-querying rather than surfacing a conflict to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::error::Error;
use crate::domain::ports::{
    DirectoryError, IdentityResolver, ProfileHint, UserDirectory,
};
use crate::domain::user::{EmailAddress, UserId, UserRecord};

/// Identity service backed by the user directory.
#[derive(Clone)]
pub struct IdentityService<D> {
    directory: Arc<D>,
}

impl<D> IdentityService<D> {
    /// Create a new service over the given directory.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

impl<D> IdentityService<D>
where
    D: UserDirectory,
{
    fn map_directory_error(error: DirectoryError) -> Error {
        match error {
            DirectoryError::Connection { message } => {
                Error::service_unavailable(format!("user directory unavailable: {message}"))
            }
            DirectoryError::Query { message } => {
                Error::internal(format!("user directory error: {message}"))
            }
            DirectoryError::DuplicateEmail { email } => {
                Error::conflict(format!("a user record already exists for {email}"))
            }
            DirectoryError::MissingRecord { id } => {
                Error::internal(format!("user record {id} disappeared"))
            }
        }
    }

    /// Pick the authoritative record out of several sharing one email:
    /// earliest created, then smallest id.
    fn tie_break(mut records: Vec<UserRecord>) -> Option<UserRecord> {
        records.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        records.into_iter().next()
    }

    async fn lookup(&self, email: &EmailAddress) -> Result<Vec<UserRecord>, Error> {
        self.directory
            .find_by_email(email)
            .await
            .map_err(Self::map_directory_error)
    }

    async fn create_record(
        &self,
        email: &EmailAddress,
        hint: &ProfileHint,
    ) -> Result<UserId, Error> {
        let record = UserRecord::new(
            UserId::random(),
            email.clone(),
            hint.display_name_or_default(),
        );
        match self.directory.insert(&record).await {
            Ok(()) => Ok(record.id()),
            Err(DirectoryError::DuplicateEmail { .. }) => {
                // Another request materialised the record first; adopt it.
                let matches = self.lookup(email).await?;
                Self::tie_break(matches).map(|winner| winner.id()).ok_or_else(|| {
                    Error::internal(format!("user record for {email} vanished after insert race"))
                })
            }
            Err(err) => Err(Self::map_directory_error(err)),
        }
    }
}

#[async_trait]
impl<D> IdentityResolver for IdentityService<D>
where
    D: UserDirectory,
{
    async fn resolve(&self, email: &EmailAddress, hint: &ProfileHint) -> Result<UserId, Error> {
        let matches = self.lookup(email).await?;
        match matches.len() {
            0 => self.create_record(email, hint).await,
            1 => Ok(matches[0].id()),
            count => {
                warn!(email = %email, count, "multiple user records share one email");
                Self::tie_break(matches)
                    .map(|winner| winner.id())
                    .ok_or_else(|| Error::internal("tie-break over a non-empty set failed"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserDirectory;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    fn email() -> EmailAddress {
        EmailAddress::new("a@x.com").expect("valid email")
    }

    fn record_for(email: &EmailAddress) -> UserRecord {
        UserRecord::new(UserId::random(), email.clone(), "New User")
    }

    #[rstest]
    #[tokio::test]
    async fn resolves_the_single_existing_record() {
        let email = email();
        let existing = record_for(&email);
        let expected = existing.id();

        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(vec![existing]));
        directory.expect_insert().times(0);

        let service = IdentityService::new(Arc::new(directory));
        let resolved = service
            .resolve(&email, &ProfileHint::default())
            .await
            .expect("resolution succeeds");
        assert_eq!(resolved, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn creates_a_record_on_first_sight() {
        let email = email();

        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        directory
            .expect_insert()
            .withf(|record: &UserRecord| {
                record.needs_onboarding()
                    && record.spaces().is_empty()
                    && record.display_name() == "Ada"
            })
            .times(1)
            .return_once(|_| Ok(()));

        let service = IdentityService::new(Arc::new(directory));
        let hint = ProfileHint {
            display_name: Some("Ada".to_owned()),
        };
        service
            .resolve(&email, &hint)
            .await
            .expect("creation succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_records_tie_break_on_creation_time() {
        let email = email();
        let older = record_for(&email).with_created_at(Utc::now() - Duration::hours(1));
        let newer = record_for(&email);
        let expected = older.id();

        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(vec![newer, older]));

        let service = IdentityService::new(Arc::new(directory));
        let resolved = service
            .resolve(&email, &ProfileHint::default())
            .await
            .expect("resolution succeeds");
        assert_eq!(resolved, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn a_lost_insert_race_adopts_the_winner() {
        let email = email();
        let winner = record_for(&email);
        let expected = winner.id();

        let mut directory = MockUserDirectory::new();
        let mut lookups = 0_u32;
        directory
            .expect_find_by_email()
            .times(2)
            .returning(move |_| {
                lookups += 1;
                if lookups == 1 {
                    Ok(Vec::new())
                } else {
                    Ok(vec![winner.clone()])
                }
            });
        directory.expect_insert().times(1).return_once(|record| {
            Err(DirectoryError::DuplicateEmail {
                email: record.email().to_string(),
            })
        });

        let service = IdentityService::new(Arc::new(directory));
        let resolved = service
            .resolve(&email, &ProfileHint::default())
            .await
            .expect("race resolution succeeds");
        assert_eq!(resolved, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn store_outages_surface_as_resolver_failure() {
        let email = email();
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_email().times(1).return_once(|_| {
            Err(DirectoryError::Connection {
                message: "timed out".to_owned(),
            })
        });

        let service = IdentityService::new(Arc::new(directory));
        let err = service
            .resolve(&email, &ProfileHint::default())
            .await
            .expect_err("outage surfaces");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
