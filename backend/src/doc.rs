//! OpenAPI surface used by Swagger UI and tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, OnboardingRoute, SpaceSettings};
use crate::inbound::http::onboarding::OnboardingResponse;
use crate::inbound::http::spaces::{
    CreateSpaceBody, CreateSpaceResponse, DeleteSpaceResponse, SpacePayload, SpaceResponse,
};
use crate::inbound::http::users::{
    LoginRequest, PreferencesRequest, PreferencesResponse, ProfileRequest, SessionUserResponse,
    UserResponse,
};

/// Aggregated API documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::update_preferences,
        crate::inbound::http::onboarding::onboarding_route,
        crate::inbound::http::spaces::create_space,
        crate::inbound::http::spaces::list_spaces,
        crate::inbound::http::spaces::get_space,
        crate::inbound::http::spaces::delete_space,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        OnboardingRoute,
        OnboardingResponse,
        SpaceSettings,
        CreateSpaceBody,
        CreateSpaceResponse,
        DeleteSpaceResponse,
        SpacePayload,
        SpaceResponse,
        LoginRequest,
        SessionUserResponse,
        UserResponse,
        ProfileRequest,
        PreferencesRequest,
        PreferencesResponse,
    )),
    tags(
        (name = "users", description = "Login, session, and settings"),
        (name = "spaces", description = "Workspace management"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/v1/login",
            "/api/v1/logout",
            "/api/v1/users/me",
            "/api/v1/users/me/profile",
            "/api/v1/users/me/preferences",
            "/api/v1/users/me/onboarding",
            "/api/v1/spaces",
            "/api/v1/spaces/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|path| path.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
