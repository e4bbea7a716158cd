//! Space use-cases: create, list, fetch, and delete.
//!
//! Creation and deletion each touch two documents (the space and the
//! owner's membership list) with no cross-document transaction. The
//! service keeps that pair effectively atomic from the caller's view: the
//! dependent membership write is retried once, and a creation whose
//! membership write keeps failing is compensated by removing the space
//! record before the error surfaces.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::error::Error;
use crate::domain::ports::{
    CreateSpaceRequest, DeleteSpaceRequest, DirectoryError, SpaceCommand, SpaceDeletion,
    SpaceQuery, SpaceRepository, SpaceStoreError, UserDirectory,
};
use crate::domain::space::{Space, SpaceId, SpaceName};
use crate::domain::user::UserId;

/// Space service implementing the driving ports.
#[derive(Clone)]
pub struct SpaceService<D, S> {
    directory: Arc<D>,
    spaces: Arc<S>,
}

impl<D, S> SpaceService<D, S> {
    /// Create a new service over the directory and space repository.
    pub fn new(directory: Arc<D>, spaces: Arc<S>) -> Self {
        Self { directory, spaces }
    }
}

impl<D, S> SpaceService<D, S>
where
    D: UserDirectory,
    S: SpaceRepository,
{
    fn map_store_error(error: SpaceStoreError) -> Error {
        match error {
            SpaceStoreError::Connection { message } => {
                Error::service_unavailable(format!("space store unavailable: {message}"))
            }
            SpaceStoreError::Query { message } => {
                Error::internal(format!("space store error: {message}"))
            }
        }
    }

    fn map_directory_error(error: DirectoryError) -> Error {
        match error {
            DirectoryError::Connection { message } => {
                Error::service_unavailable(format!("user directory unavailable: {message}"))
            }
            DirectoryError::Query { message } => {
                Error::internal(format!("user directory error: {message}"))
            }
            DirectoryError::DuplicateEmail { email } => {
                Error::internal(format!("unexpected duplicate email for {email}"))
            }
            DirectoryError::MissingRecord { id } => {
                Error::internal(format!("user record {id} disappeared mid-operation"))
            }
        }
    }

    /// Run the dependent membership write, re-attempting once before
    /// giving up. Attaching an id that is already present is a no-op, so
    /// the retry is safe to repeat.
    async fn attach_with_retry(&self, owner: &UserId, space: &SpaceId) -> Result<(), Error> {
        match self.directory.attach_space(owner, space).await {
            Ok(()) => Ok(()),
            Err(first) => {
                warn!(%owner, %space, error = %first, "membership attach failed, retrying");
                self.directory
                    .attach_space(owner, space)
                    .await
                    .map_err(Self::map_directory_error)
            }
        }
    }

    async fn detach_with_retry(&self, owner: &UserId, space: &SpaceId) -> Result<(), Error> {
        match self.directory.detach_space(owner, space).await {
            Ok(()) => Ok(()),
            Err(first) => {
                warn!(%owner, %space, error = %first, "membership detach failed, retrying");
                self.directory
                    .detach_space(owner, space)
                    .await
                    .map_err(Self::map_directory_error)
            }
        }
    }

    /// Best-effort removal of a space whose membership write never landed.
    async fn compensate_create(&self, space: &SpaceId) {
        if let Err(err) = self.spaces.delete(space).await {
            error!(%space, error = %err, "orphaned space record could not be removed");
        }
    }

    fn dedup_by_id(spaces: Vec<Space>) -> Vec<Space> {
        let mut seen = Vec::with_capacity(spaces.len());
        let mut unique = Vec::with_capacity(spaces.len());
        for space in spaces {
            if seen.contains(&space.id()) {
                continue;
            }
            seen.push(space.id());
            unique.push(space);
        }
        unique
    }
}

#[async_trait]
impl<D, S> SpaceCommand for SpaceService<D, S>
where
    D: UserDirectory,
    S: SpaceRepository,
{
    async fn create(&self, request: CreateSpaceRequest) -> Result<Space, Error> {
        let name = SpaceName::new(&request.name).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(serde_json::json!({ "field": "name" }))
        })?;

        let space = Space::new(SpaceId::random(), name, request.owner);
        self.spaces
            .insert(&space)
            .await
            .map_err(Self::map_store_error)?;

        if let Err(err) = self.attach_with_retry(&request.owner, &space.id()).await {
            self.compensate_create(&space.id()).await;
            return Err(err);
        }

        Ok(space)
    }

    async fn delete(&self, request: DeleteSpaceRequest) -> Result<SpaceDeletion, Error> {
        let space = self.fetch(&request.id).await?;
        if space.owner_id() != request.requester {
            return Err(Error::forbidden("only the owner can delete this space"));
        }

        self.spaces
            .delete(&request.id)
            .await
            .map_err(Self::map_store_error)?;
        self.detach_with_retry(&space.owner_id(), &request.id)
            .await?;

        let remaining = self.list(&request.requester).await?;
        Ok(SpaceDeletion {
            deleted: request.id,
            remaining,
        })
    }
}

#[async_trait]
impl<D, S> SpaceQuery for SpaceService<D, S>
where
    D: UserDirectory,
    S: SpaceRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<Space>, Error> {
        let spaces = self
            .spaces
            .list_by_owner(owner)
            .await
            .map_err(Self::map_store_error)?;
        Ok(Self::dedup_by_id(spaces))
    }

    async fn fetch(&self, id: &SpaceId) -> Result<Space, Error> {
        self.spaces
            .find_by_id(id)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no space with id {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockSpaceRepository, MockUserDirectory};
    use rstest::rstest;

    fn service(
        directory: MockUserDirectory,
        spaces: MockSpaceRepository,
    ) -> SpaceService<MockUserDirectory, MockSpaceRepository> {
        SpaceService::new(Arc::new(directory), Arc::new(spaces))
    }

    fn query_error() -> SpaceStoreError {
        SpaceStoreError::Query {
            message: "write rejected".to_owned(),
        }
    }

    fn directory_query_error() -> DirectoryError {
        DirectoryError::Query {
            message: "write rejected".to_owned(),
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn create_rejects_blank_names_before_touching_the_store(#[case] name: &str) {
        let mut spaces = MockSpaceRepository::new();
        spaces.expect_insert().times(0);
        let mut directory = MockUserDirectory::new();
        directory.expect_attach_space().times(0);

        let svc = service(directory, spaces);
        let err = svc
            .create(CreateSpaceRequest {
                owner: UserId::random(),
                name: name.to_owned(),
            })
            .await
            .expect_err("blank name rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn create_persists_the_space_and_attaches_membership() {
        let owner = UserId::random();

        let mut spaces = MockSpaceRepository::new();
        spaces
            .expect_insert()
            .withf(move |space: &Space| {
                space.owner_id() == owner && space.members() == [owner]
            })
            .times(1)
            .return_once(|_| Ok(()));
        let mut directory = MockUserDirectory::new();
        directory
            .expect_attach_space()
            .withf(move |id, _| *id == owner)
            .times(1)
            .return_once(|_, _| Ok(()));

        let svc = service(directory, spaces);
        let space = svc
            .create(CreateSpaceRequest {
                owner,
                name: "  Acme  ".to_owned(),
            })
            .await
            .expect("creation succeeds");
        assert_eq!(space.name().as_ref(), "Acme");
        assert_eq!(space.members(), [owner]);
    }

    #[rstest]
    #[tokio::test]
    async fn create_retries_the_membership_write_once() {
        let owner = UserId::random();

        let mut spaces = MockSpaceRepository::new();
        spaces.expect_insert().times(1).return_once(|_| Ok(()));
        spaces.expect_delete().times(0);
        let mut directory = MockUserDirectory::new();
        let mut attempts = 0_u32;
        directory
            .expect_attach_space()
            .times(2)
            .returning(move |_, _| {
                attempts += 1;
                if attempts == 1 {
                    Err(directory_query_error())
                } else {
                    Ok(())
                }
            });

        let svc = service(directory, spaces);
        svc.create(CreateSpaceRequest {
            owner,
            name: "Acme".to_owned(),
        })
        .await
        .expect("retry lands the write");
    }

    #[rstest]
    #[tokio::test]
    async fn create_compensates_when_the_membership_write_keeps_failing() {
        let owner = UserId::random();

        let mut spaces = MockSpaceRepository::new();
        spaces.expect_insert().times(1).return_once(|_| Ok(()));
        spaces.expect_delete().times(1).return_once(|_| Ok(()));
        let mut directory = MockUserDirectory::new();
        directory
            .expect_attach_space()
            .times(2)
            .returning(|_, _| Err(directory_query_error()));

        let svc = service(directory, spaces);
        let err = svc
            .create(CreateSpaceRequest {
                owner,
                name: "Acme".to_owned(),
            })
            .await
            .expect_err("failure surfaces after compensation");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn create_surfaces_space_write_failures_untouched() {
        let mut spaces = MockSpaceRepository::new();
        spaces
            .expect_insert()
            .times(1)
            .return_once(|_| Err(query_error()));
        let mut directory = MockUserDirectory::new();
        directory.expect_attach_space().times(0);

        let svc = service(directory, spaces);
        let err = svc
            .create(CreateSpaceRequest {
                owner: UserId::random(),
                name: "Acme".to_owned(),
            })
            .await
            .expect_err("store failure surfaces");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn list_deduplicates_by_id() {
        let owner = UserId::random();
        let space = Space::new(
            SpaceId::random(),
            SpaceName::new("Acme").expect("valid name"),
            owner,
        );
        let twin = space.clone();

        let mut spaces = MockSpaceRepository::new();
        spaces
            .expect_list_by_owner()
            .times(1)
            .return_once(move |_| Ok(vec![space, twin]));

        let svc = service(MockUserDirectory::new(), spaces);
        let listed = svc.list(&owner).await.expect("listing succeeds");
        assert_eq!(listed.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_misses_map_to_not_found() {
        let mut spaces = MockSpaceRepository::new();
        spaces.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let svc = service(MockUserDirectory::new(), spaces);
        let err = svc
            .fetch(&SpaceId::random())
            .await
            .expect_err("missing space");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_by_a_non_owner_is_forbidden_and_touches_nothing() {
        let owner = UserId::random();
        let intruder = UserId::random();
        let space = Space::new(
            SpaceId::random(),
            SpaceName::new("Acme").expect("valid name"),
            owner,
        );
        let id = space.id();

        let mut spaces = MockSpaceRepository::new();
        spaces
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(space)));
        spaces.expect_delete().times(0);
        let mut directory = MockUserDirectory::new();
        directory.expect_detach_space().times(0);

        let svc = service(directory, spaces);
        let err = svc
            .delete(DeleteSpaceRequest {
                id,
                requester: intruder,
            })
            .await
            .expect_err("non-owner rejected");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_the_record_and_detaches_membership() {
        let owner = UserId::random();
        let space = Space::new(
            SpaceId::random(),
            SpaceName::new("Acme").expect("valid name"),
            owner,
        );
        let id = space.id();

        let mut spaces = MockSpaceRepository::new();
        spaces
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(space)));
        spaces.expect_delete().times(1).return_once(|_| Ok(()));
        spaces
            .expect_list_by_owner()
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        let mut directory = MockUserDirectory::new();
        directory
            .expect_detach_space()
            .withf(move |user, deleted| *user == owner && *deleted == id)
            .times(1)
            .return_once(|_, _| Ok(()));

        let svc = service(directory, spaces);
        let deletion = svc
            .delete(DeleteSpaceRequest {
                id,
                requester: owner,
            })
            .await
            .expect("deletion succeeds");
        assert_eq!(deletion.deleted, id);
        assert!(deletion.remaining.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_an_unknown_space_is_not_found() {
        let mut spaces = MockSpaceRepository::new();
        spaces.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let svc = service(MockUserDirectory::new(), spaces);
        let err = svc
            .delete(DeleteSpaceRequest {
                id: SpaceId::random(),
                requester: UserId::random(),
            })
            .await
            .expect_err("missing space");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
