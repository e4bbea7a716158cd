//! Driving port for the dashboard-entry routing decision.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::onboarding::OnboardingRoute;
use crate::domain::user::UserId;

/// Domain use-case port deciding where a dashboard entry routes.
///
/// Implementations must re-read the user record on every call; membership
/// can change between visits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OnboardingQuery: Send + Sync {
    /// Routing decision for the given user.
    async fn route_for(&self, id: &UserId) -> Result<OnboardingRoute, Error>;
}

/// Fixture query that always allows the dashboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOnboardingQuery;

#[async_trait]
impl OnboardingQuery for FixtureOnboardingQuery {
    async fn route_for(&self, _id: &UserId) -> Result<OnboardingRoute, Error> {
        Ok(OnboardingRoute::Dashboard)
    }
}
