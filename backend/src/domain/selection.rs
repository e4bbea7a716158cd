//! Client-side selection state and its change signal.
//!
//! One running client instance holds a single [`SessionSelection`]; every
//! open view holds a [`SelectionView`]. Changing the selected space
//! persists the id to the injected storage and broadcasts the full new
//! selection over the [`SelectionBus`], so views converge without a
//! reload. Views only fetch when a notification names a space they do not
//! already know locally.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::domain::error::Error;
use crate::domain::ports::{SelectionStore, SelectionStoreError, SpaceQuery};
use crate::domain::space::{Space, SpaceId};

/// Broadcast channel depth; late views re-read the store, so a shallow
/// buffer is enough.
const BUS_CAPACITY: usize = 16;

/// The slice of a space a view needs to render its chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSummary {
    /// Space identifier.
    pub id: SpaceId,
    /// Space name.
    pub name: String,
}

impl From<&Space> for SpaceSummary {
    fn from(space: &Space) -> Self {
        Self {
            id: space.id(),
            name: space.name().to_string(),
        }
    }
}

/// Notification payload: always the full new selection, never a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    /// The newly selected space.
    pub space: SpaceSummary,
}

/// In-process subject for selection changes.
#[derive(Debug, Clone)]
pub struct SelectionBus {
    sender: broadcast::Sender<SelectionChanged>,
}

impl SelectionBus {
    /// Create a bus with no subscribers yet.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender }
    }

    /// Subscribe; the receiver observes every change published afterwards.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SelectionChanged> {
        self.sender.subscribe()
    }

    /// Publish a change to all current subscribers. Publishing with no
    /// subscribers is a no-op.
    pub fn publish(&self, change: SelectionChanged) {
        let _ = self.sender.send(change);
    }
}

impl Default for SelectionBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A view's local mirror of the selection.
#[derive(Debug, Default)]
pub struct SelectionView {
    current: Option<SpaceSummary>,
    known: Vec<SpaceSummary>,
}

impl SelectionView {
    /// Create an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the locally-known spaces, as the sidebar does after its
    /// initial listing.
    pub fn seed(&mut self, spaces: impl IntoIterator<Item = SpaceSummary>) {
        for summary in spaces {
            self.remember(summary);
        }
    }

    /// The view's current selection.
    #[must_use]
    pub fn current(&self) -> Option<&SpaceSummary> {
        self.current.as_ref()
    }

    /// The spaces this view knows locally.
    #[must_use]
    pub fn known(&self) -> &[SpaceSummary] {
        &self.known
    }

    fn remember(&mut self, summary: SpaceSummary) {
        if !self.known.iter().any(|known| known.id == summary.id) {
            self.known.push(summary);
        }
    }

    /// Apply a change notification.
    ///
    /// A known id updates the local copy straight from the payload; an
    /// unknown id is fetched through `spaces` once and remembered before
    /// the update.
    pub async fn apply(
        &mut self,
        change: &SelectionChanged,
        spaces: &dyn SpaceQuery,
    ) -> Result<(), Error> {
        if self.known.iter().any(|known| known.id == change.space.id) {
            self.current = Some(change.space.clone());
            return Ok(());
        }

        let fetched = spaces.fetch(&change.space.id).await?;
        let summary = SpaceSummary::from(&fetched);
        self.remember(summary.clone());
        self.current = Some(summary);
        Ok(())
    }

    /// Drop a deleted space from the local state.
    pub fn forget(&mut self, id: &SpaceId) {
        self.known.retain(|known| &known.id != id);
        if self.current.as_ref().is_some_and(|current| &current.id == id) {
            self.current = None;
        }
    }
}

fn map_store_error(error: SelectionStoreError) -> Error {
    let SelectionStoreError::Storage { message } = error;
    Error::internal(format!("selection storage failed: {message}"))
}

/// Session-scoped owner of the persisted selection and its bus.
#[derive(Clone)]
pub struct SessionSelection {
    store: Arc<dyn SelectionStore>,
    bus: SelectionBus,
}

impl SessionSelection {
    /// Create a session selection over the injected storage.
    pub fn new(store: Arc<dyn SelectionStore>) -> Self {
        Self {
            store,
            bus: SelectionBus::new(),
        }
    }

    /// The bus views subscribe to.
    #[must_use]
    pub const fn bus(&self) -> &SelectionBus {
        &self.bus
    }

    /// The persisted selection, surviving reloads.
    pub fn current(&self) -> Result<Option<SpaceId>, Error> {
        self.store.load().map_err(map_store_error)
    }

    /// Persist a new selection and notify every view.
    pub fn select(&self, space: SpaceSummary) -> Result<(), Error> {
        self.store.save(&space.id).map_err(map_store_error)?;
        self.bus.publish(SelectionChanged { space });
        Ok(())
    }

    /// Clear the persisted selection.
    pub fn clear(&self) -> Result<(), Error> {
        self.store.clear().map_err(map_store_error)
    }

    /// React to a deletion: when the deleted space was the current
    /// selection, fall back to the first remaining owned space, or clear
    /// the selection when none remains. Returns the new selection.
    pub fn handle_deletion(
        &self,
        deleted: &SpaceId,
        remaining: &[Space],
    ) -> Result<Option<SpaceSummary>, Error> {
        let current = self.current()?;
        if current.as_ref() != Some(deleted) {
            return Ok(current.and_then(|id| {
                remaining
                    .iter()
                    .find(|space| space.id() == id)
                    .map(SpaceSummary::from)
            }));
        }

        match remaining.first() {
            Some(fallback) => {
                let summary = SpaceSummary::from(fallback);
                self.select(summary.clone())?;
                Ok(Some(summary))
            }
            None => {
                self.clear()?;
                Ok(None)
            }
        }
    }
}
