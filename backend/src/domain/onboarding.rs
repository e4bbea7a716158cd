//! First-run routing: decide between onboarding and the dashboard.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::Error;
use crate::domain::ports::{DirectoryError, OnboardingQuery, UserDirectory};
use crate::domain::user::{UserId, UserRecord};

/// Where a dashboard entry routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingRoute {
    /// The user must create a first space before anything else.
    Onboarding,
    /// The user may enter the dashboard.
    Dashboard,
}

/// Stateless routing gate.
///
/// A user is routed to onboarding when the membership list is empty or the
/// onboarding flag is still pending. The decision is a pure function of
/// the record snapshot; callers must re-read the record on every dashboard
/// entry because membership can change between visits.
#[derive(Debug, Default, Clone, Copy)]
pub struct OnboardingGate;

impl OnboardingGate {
    /// Routing decision for a record snapshot.
    #[must_use]
    pub fn route(record: &UserRecord) -> OnboardingRoute {
        if record.spaces().is_empty() || record.needs_onboarding() {
            OnboardingRoute::Onboarding
        } else {
            OnboardingRoute::Dashboard
        }
    }
}

/// Directory-backed onboarding query; re-reads the record per call.
#[derive(Clone)]
pub struct OnboardingService<D> {
    directory: Arc<D>,
}

impl<D> OnboardingService<D> {
    /// Create a new service over the given directory.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D> OnboardingQuery for OnboardingService<D>
where
    D: UserDirectory,
{
    async fn route_for(&self, id: &UserId) -> Result<OnboardingRoute, Error> {
        let record = self
            .directory
            .find_by_id(id)
            .await
            .map_err(|err| match err {
                DirectoryError::Connection { message } => {
                    Error::service_unavailable(format!("user directory unavailable: {message}"))
                }
                other => Error::internal(format!("user directory error: {other}")),
            })?
            .ok_or_else(|| Error::not_found(format!("no user record with id {id}")))?;
        Ok(OnboardingGate::route(&record))
    }
}
