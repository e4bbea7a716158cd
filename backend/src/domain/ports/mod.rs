//! Domain ports for the hexagonal boundary.
//!
//! Driving ports are the use-cases inbound adapters call; driven ports are
//! the collaborators (managed store, authentication provider, client-local
//! storage) that outbound adapters implement.

mod auth_provider;
mod identity_resolver;
mod login_service;
mod onboarding_query;
mod selection_store;
mod settings;
mod space_command;
mod space_query;
mod space_repository;
mod user_directory;

#[cfg(test)]
pub use auth_provider::MockAuthProvider;
pub use auth_provider::{AuthProvider, AuthProviderError, FixtureAuthProvider, ProviderPrincipal};
#[cfg(test)]
pub use identity_resolver::MockIdentityResolver;
pub use identity_resolver::{FixtureIdentityResolver, IdentityResolver, ProfileHint};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use onboarding_query::MockOnboardingQuery;
pub use onboarding_query::{FixtureOnboardingQuery, OnboardingQuery};
#[cfg(test)]
pub use selection_store::MockSelectionStore;
pub use selection_store::{SelectionStore, SelectionStoreError};
#[cfg(test)]
pub use settings::{MockSettingsCommand, MockUserProfileQuery};
pub use settings::{ProfileUpdate, SettingsCommand, UserProfileQuery};
#[cfg(test)]
pub use space_command::MockSpaceCommand;
pub use space_command::{
    CreateSpaceRequest, DeleteSpaceRequest, FixtureSpaceCommand, SpaceCommand, SpaceDeletion,
};
#[cfg(test)]
pub use space_query::MockSpaceQuery;
pub use space_query::{FixtureSpaceQuery, SpaceQuery};
#[cfg(test)]
pub use space_repository::MockSpaceRepository;
pub use space_repository::{SpaceRepository, SpaceStoreError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{DirectoryError, UserDirectory};
