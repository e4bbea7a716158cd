//! In-memory document-store adapters.
//!
//! The production system talks to a managed document database; its
//! transport is an external collaborator and stays out of this repository.
//! These adapters implement the driven ports against process memory with
//! the same observable semantics: individual document writes are
//! serialised (one lock per collection), there is no cross-document
//! transaction, and email uniqueness is enforced at write time.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{DirectoryError, SpaceRepository, SpaceStoreError, UserDirectory};
use crate::domain::preferences::Preferences;
use crate::domain::space::{Space, SpaceId};
use crate::domain::user::{EmailAddress, UserId, UserRecord};

/// Shared backing state for the collection adapters.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, UserRecord>>,
    spaces: RwLock<HashMap<SpaceId, Space>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// User-record collection adapter.
#[derive(Clone)]
pub struct MemoryUserDirectory {
    store: Arc<MemoryStore>,
}

impl MemoryUserDirectory {
    /// Create an adapter over the shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    fn missing(id: &UserId) -> DirectoryError {
        DirectoryError::MissingRecord { id: id.to_string() }
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn insert(&self, record: &UserRecord) -> Result<(), DirectoryError> {
        let mut users = self.store.users.write().await;
        if users
            .values()
            .any(|existing| existing.email() == record.email())
        {
            return Err(DirectoryError::DuplicateEmail {
                email: record.email().to_string(),
            });
        }
        users.insert(record.id(), record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, DirectoryError> {
        Ok(self.store.users.read().await.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<UserRecord>, DirectoryError> {
        let users = self.store.users.read().await;
        let mut matches: Vec<UserRecord> = users
            .values()
            .filter(|record| record.email() == email)
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(matches)
    }

    async fn attach_space(&self, id: &UserId, space: &SpaceId) -> Result<(), DirectoryError> {
        let mut users = self.store.users.write().await;
        let record = users.get_mut(id).ok_or_else(|| Self::missing(id))?;
        record.attach_space(*space);
        Ok(())
    }

    async fn detach_space(&self, id: &UserId, space: &SpaceId) -> Result<(), DirectoryError> {
        let mut users = self.store.users.write().await;
        let record = users.get_mut(id).ok_or_else(|| Self::missing(id))?;
        record.detach_space(space);
        Ok(())
    }

    async fn update_names(
        &self,
        id: &UserId,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), DirectoryError> {
        let mut users = self.store.users.write().await;
        let record = users.get_mut(id).ok_or_else(|| Self::missing(id))?;
        record.set_names(first_name, last_name);
        Ok(())
    }

    async fn update_preferences(
        &self,
        id: &UserId,
        preferences: &Preferences,
    ) -> Result<(), DirectoryError> {
        let mut users = self.store.users.write().await;
        let record = users.get_mut(id).ok_or_else(|| Self::missing(id))?;
        record.set_preferences(preferences.clone());
        Ok(())
    }
}

/// Space collection adapter.
#[derive(Clone)]
pub struct MemorySpaceRepository {
    store: Arc<MemoryStore>,
}

impl MemorySpaceRepository {
    /// Create an adapter over the shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SpaceRepository for MemorySpaceRepository {
    async fn insert(&self, space: &Space) -> Result<(), SpaceStoreError> {
        self.store
            .spaces
            .write()
            .await
            .insert(space.id(), space.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SpaceId) -> Result<Option<Space>, SpaceStoreError> {
        Ok(self.store.spaces.read().await.get(id).cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Space>, SpaceStoreError> {
        let spaces = self.store.spaces.read().await;
        let mut owned: Vec<Space> = spaces
            .values()
            .filter(|space| space.owner_id() == *owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(owned)
    }

    async fn delete(&self, id: &SpaceId) -> Result<(), SpaceStoreError> {
        self.store.spaces.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::IdentityService;
    use crate::domain::ports::{IdentityResolver, ProfileHint};
    use rstest::rstest;

    fn directory() -> MemoryUserDirectory {
        MemoryUserDirectory::new(Arc::new(MemoryStore::new()))
    }

    fn email() -> EmailAddress {
        EmailAddress::new("a@x.com").expect("valid email")
    }

    #[rstest]
    #[tokio::test]
    async fn inserts_enforce_email_uniqueness() {
        let directory = directory();
        let first = UserRecord::new(UserId::random(), email(), "First");
        let second = UserRecord::new(UserId::random(), email(), "Second");

        directory.insert(&first).await.expect("first insert");
        let err = directory.insert(&second).await.expect_err("duplicate");
        assert!(matches!(err, DirectoryError::DuplicateEmail { .. }));

        let matches = directory.find_by_email(&email()).await.expect("lookup");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id(), first.id());
    }

    #[rstest]
    #[tokio::test]
    async fn attach_is_idempotent_through_the_adapter() {
        let directory = directory();
        let record = UserRecord::new(UserId::random(), email(), "First");
        directory.insert(&record).await.expect("insert");
        let space = SpaceId::random();

        directory
            .attach_space(&record.id(), &space)
            .await
            .expect("first attach");
        directory
            .attach_space(&record.id(), &space)
            .await
            .expect("second attach");

        let stored = directory
            .find_by_id(&record.id())
            .await
            .expect("lookup")
            .expect("record exists");
        assert_eq!(stored.spaces(), &[space]);
        assert!(!stored.needs_onboarding());
    }

    #[rstest]
    #[tokio::test]
    async fn membership_writes_against_missing_records_fail() {
        let directory = directory();
        let err = directory
            .attach_space(&UserId::random(), &SpaceId::random())
            .await
            .expect_err("missing record");
        assert!(matches!(err, DirectoryError::MissingRecord { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_resolution_creates_exactly_one_record() {
        let directory = Arc::new(directory());
        let service = IdentityService::new(directory.clone());
        let hint = ProfileHint::default();

        let addr = email();
        let (left, right) = tokio::join!(
            service.resolve(&addr, &hint),
            service.resolve(&addr, &hint),
        );
        let left = left.expect("left resolution");
        let right = right.expect("right resolution");

        assert_eq!(left, right);
        let matches = directory.find_by_email(&email()).await.expect("lookup");
        assert_eq!(matches.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn listing_by_owner_is_scoped_and_ordered() {
        let store = Arc::new(MemoryStore::new());
        let repo = MemorySpaceRepository::new(store);
        let owner = UserId::random();
        let other = UserId::random();

        let mine = Space::new(
            SpaceId::random(),
            crate::domain::space::SpaceName::new("Mine").expect("valid name"),
            owner,
        );
        let theirs = Space::new(
            SpaceId::random(),
            crate::domain::space::SpaceName::new("Theirs").expect("valid name"),
            other,
        );
        repo.insert(&mine).await.expect("insert mine");
        repo.insert(&theirs).await.expect("insert theirs");

        let listed = repo.list_by_owner(&owner).await.expect("listing");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), mine.id());
    }

    #[rstest]
    #[tokio::test]
    async fn deleted_spaces_are_unfetchable() {
        let store = Arc::new(MemoryStore::new());
        let repo = MemorySpaceRepository::new(store);
        let space = Space::new(
            SpaceId::random(),
            crate::domain::space::SpaceName::new("Doomed").expect("valid name"),
            UserId::random(),
        );
        repo.insert(&space).await.expect("insert");
        repo.delete(&space.id()).await.expect("delete");
        repo.delete(&space.id()).await.expect("second delete is a no-op");

        assert!(
            repo.find_by_id(&space.id())
                .await
                .expect("lookup")
                .is_none()
        );
    }
}
