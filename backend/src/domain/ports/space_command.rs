//! Driving port for space mutations.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::space::{Space, SpaceId, SpaceName};
use crate::domain::user::UserId;

/// Request to create a space for an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSpaceRequest {
    /// Resolved owner record id.
    pub owner: UserId,
    /// Raw space name; validated by the service.
    pub name: String,
}

/// Request to delete a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSpaceRequest {
    /// Space to delete.
    pub id: SpaceId,
    /// Authenticated requester; must be the owner.
    pub requester: UserId,
}

/// Outcome of a successful deletion.
///
/// Carries the spaces the requester still owns so clients can fall back
/// when the deleted space was their current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceDeletion {
    /// Identifier of the deleted space.
    pub deleted: SpaceId,
    /// Spaces still owned by the requester, oldest first.
    pub remaining: Vec<Space>,
}

/// Domain use-case port for space mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpaceCommand: Send + Sync {
    /// Create a space and attach it to the owner's membership list.
    async fn create(&self, request: CreateSpaceRequest) -> Result<Space, Error>;

    /// Delete a space, owner-only, detaching it from the membership list.
    async fn delete(&self, request: DeleteSpaceRequest) -> Result<SpaceDeletion, Error>;
}

/// Fixture command returning an unstored space and an empty deletion.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSpaceCommand;

#[async_trait]
impl SpaceCommand for FixtureSpaceCommand {
    async fn create(&self, request: CreateSpaceRequest) -> Result<Space, Error> {
        let name = SpaceName::new(&request.name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(Space::new(SpaceId::random(), name, request.owner))
    }

    async fn delete(&self, request: DeleteSpaceRequest) -> Result<SpaceDeletion, Error> {
        Ok(SpaceDeletion {
            deleted: request.id,
            remaining: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_create_still_validates_the_name() {
        let command = FixtureSpaceCommand;
        let err = command
            .create(CreateSpaceRequest {
                owner: UserId::random(),
                name: "  ".to_owned(),
            })
            .await
            .expect_err("blank name rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);

        let space = command
            .create(CreateSpaceRequest {
                owner: UserId::random(),
                name: "Acme".to_owned(),
            })
            .await
            .expect("creation succeeds");
        assert_eq!(space.name().as_ref(), "Acme");
    }
}
