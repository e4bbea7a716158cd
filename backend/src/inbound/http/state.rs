//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureAuthProvider, IdentityResolver, LoginService, OnboardingQuery, SettingsCommand,
    SpaceCommand, SpaceQuery, UserProfileQuery,
};
use crate::domain::{
    IdentityService, LoginFlow, OnboardingService, SettingsService, SpaceService,
};
use crate::outbound::{MemorySpaceRepository, MemoryStore, MemoryUserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Login use-case.
    pub login: Arc<dyn LoginService>,
    /// Email-to-record resolution.
    pub identity: Arc<dyn IdentityResolver>,
    /// Space mutations.
    pub spaces: Arc<dyn SpaceCommand>,
    /// Space reads.
    pub spaces_query: Arc<dyn SpaceQuery>,
    /// Dashboard-entry routing.
    pub onboarding: Arc<dyn OnboardingQuery>,
    /// Current-user reads.
    pub profile: Arc<dyn UserProfileQuery>,
    /// Settings mutations.
    pub settings: Arc<dyn SettingsCommand>,
}

impl HttpState {
    /// Wire the full service stack over the in-memory store adapters.
    ///
    /// This is the default wiring until a real document-store adapter is
    /// available; integration tests run against it unchanged.
    #[must_use]
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        let directory = Arc::new(MemoryUserDirectory::new(store.clone()));
        let repository = Arc::new(MemorySpaceRepository::new(store));

        let login = Arc::new(LoginFlow::new(
            Arc::new(FixtureAuthProvider),
            directory.clone(),
        ));
        let identity = Arc::new(IdentityService::new(directory.clone()));
        let space_service = Arc::new(SpaceService::new(directory.clone(), repository));
        let onboarding = Arc::new(OnboardingService::new(directory.clone()));
        let settings = Arc::new(SettingsService::new(directory));

        Self {
            login,
            identity,
            spaces: space_service.clone(),
            spaces_query: space_service,
            onboarding,
            profile: settings.clone(),
            settings,
        }
    }
}
