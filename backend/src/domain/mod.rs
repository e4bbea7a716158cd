//! Domain aggregates, services, and ports.
//!
//! Everything here is transport- and storage-agnostic: inbound adapters
//! map HTTP onto the driving ports, outbound adapters implement the driven
//! ports against the managed collaborators.

pub mod auth;
pub mod error;
pub mod identity;
pub mod login;
pub mod onboarding;
pub mod ports;
pub mod preferences;
pub mod selection;
pub mod settings;
pub mod space;
pub mod spaces;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, SessionPrincipal};
pub use self::error::{Error, ErrorCode};
pub use self::identity::IdentityService;
pub use self::login::LoginFlow;
pub use self::onboarding::{OnboardingGate, OnboardingRoute, OnboardingService};
pub use self::preferences::{LanguageCode, ParseLanguageCodeError, Preferences};
pub use self::selection::{
    SelectionBus, SelectionChanged, SelectionView, SessionSelection, SpaceSummary,
};
pub use self::settings::SettingsService;
pub use self::space::{
    SPACE_NAME_MAX, Space, SpaceId, SpaceName, SpaceSettings, SpaceValidationError,
};
pub use self::spaces::SpaceService;
pub use self::user::{EmailAddress, UserId, UserRecord, UserValidationError};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
