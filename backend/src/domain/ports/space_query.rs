//! Driving port for space reads.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::space::{Space, SpaceId};
use crate::domain::user::UserId;

/// Domain use-case port for reading spaces.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpaceQuery: Send + Sync {
    /// Spaces owned by `owner`, deduplicated by id.
    async fn list(&self, owner: &UserId) -> Result<Vec<Space>, Error>;

    /// Fetch a single space; `not_found` when absent.
    async fn fetch(&self, id: &SpaceId) -> Result<Space, Error>;
}

/// Fixture query knowing no spaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSpaceQuery;

#[async_trait]
impl SpaceQuery for FixtureSpaceQuery {
    async fn list(&self, _owner: &UserId) -> Result<Vec<Space>, Error> {
        Ok(Vec::new())
    }

    async fn fetch(&self, id: &SpaceId) -> Result<Space, Error> {
        Err(Error::not_found(format!("no space with id {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_query_knows_no_spaces() {
        let query = FixtureSpaceQuery;
        assert!(
            query
                .list(&UserId::random())
                .await
                .expect("listing succeeds")
                .is_empty()
        );
        let err = query
            .fetch(&SpaceId::random())
            .await
            .expect_err("nothing to fetch");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
