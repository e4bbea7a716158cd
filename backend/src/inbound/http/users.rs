//! User-facing handlers: login, logout, current user, settings.
//!
//! ```text
//! POST /api/v1/login {"email":"admin@example.com","password":"password"}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! PUT  /api/v1/users/me/profile
//! PUT  /api/v1/users/me/preferences
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{ProfileHint, ProfileUpdate};
use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Preferences, SessionPrincipal, UserId,
    UserRecord,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_field_error, missing_field_error};

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Session fields exposed to the client after login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserResponse {
    /// Resolved user-record id.
    pub id: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
}

impl From<SessionPrincipal> for SessionUserResponse {
    fn from(principal: SessionPrincipal) -> Self {
        Self {
            id: principal.user_id.to_string(),
            email: principal.email.to_string(),
            name: principal.display_name,
        }
    }
}

/// Preference bag as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    /// Activity notifications on/off.
    pub notifications: bool,
    /// Interface language code.
    pub language: String,
    /// Autosave on/off.
    pub auto_save: bool,
}

impl From<&Preferences> for PreferencesResponse {
    fn from(preferences: &Preferences) -> Self {
        Self {
            notifications: preferences.notifications,
            language: preferences.language.to_string(),
            auto_save: preferences.auto_save,
        }
    }
}

/// Current-user payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Stable record id.
    pub id: String,
    /// Email lookup key.
    pub email: String,
    /// Given name, possibly empty.
    pub first_name: String,
    /// Family name, possibly empty.
    pub last_name: String,
    /// Name shown in the dashboard shell.
    pub display_name: String,
    /// Owned/joined space ids.
    pub spaces: Vec<String>,
    /// Whether the first-run flow is still pending.
    pub needs_onboarding: bool,
    /// Preference bag.
    pub preferences: PreferencesResponse,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id().to_string(),
            email: record.email().to_string(),
            first_name: record.first_name().to_owned(),
            last_name: record.last_name().to_owned(),
            display_name: record.display_name(),
            spaces: record.spaces().iter().map(ToString::to_string).collect(),
            needs_onboarding: record.needs_onboarding(),
            preferences: PreferencesResponse::from(record.preferences()),
        }
    }
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail(inner) => Error::invalid_request(inner.to_string())
            .with_details(json!({ "field": "email", "code": "invalid_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Resolve the session principal's email to its record id.
///
/// Handlers key every store operation by the record id the directory
/// yields for the email, not by whatever id the cookie carries.
pub(crate) async fn resolve_record_id(
    state: &HttpState,
    principal: &SessionPrincipal,
) -> Result<UserId, Error> {
    let hint = ProfileHint {
        display_name: Some(principal.display_name.clone()),
    };
    state.identity.resolve(&principal.email, &hint).await
}

/// Authenticate and establish an enriched session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionUserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Authentication provider unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionUserResponse>> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(|err| map_login_validation_error(&err))?;
    let principal = state.login.login(&credentials).await?;
    session.persist_principal(&principal)?;
    Ok(web::Json(SessionUserResponse::from(principal)))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session ended")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

/// Fetch the authenticated user's record.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let principal = session.require_principal()?;
    let user_id = resolve_record_id(&state, &principal).await?;
    let record = state.profile.fetch_profile(&user_id).await?;
    Ok(web::Json(UserResponse::from(record)))
}

/// Profile update request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}

/// Update the authenticated user's profile names.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Record vanished", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/me/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let principal = session.require_principal()?;
    let payload = payload.into_inner();
    let first_name = payload
        .first_name
        .ok_or_else(|| missing_field_error("firstName"))?;
    let last_name = payload
        .last_name
        .ok_or_else(|| missing_field_error("lastName"))?;

    let user_id = resolve_record_id(&state, &principal).await?;
    let record = state
        .settings
        .update_profile(
            &user_id,
            ProfileUpdate {
                first_name,
                last_name,
            },
        )
        .await?;

    // Keep the cookie's display name in step with the record.
    session.persist_principal(&SessionPrincipal {
        user_id,
        email: principal.email,
        display_name: record.display_name(),
    })?;
    Ok(web::Json(UserResponse::from(record)))
}

/// Preferences update request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    /// Activity notifications on/off.
    pub notifications: Option<bool>,
    /// Interface language code.
    pub language: Option<String>,
    /// Autosave on/off.
    pub auto_save: Option<bool>,
}

fn parse_preferences_request(payload: PreferencesRequest) -> Result<Preferences, Error> {
    let notifications = payload
        .notifications
        .ok_or_else(|| missing_field_error("notifications"))?;
    let language = payload
        .language
        .ok_or_else(|| missing_field_error("language"))?;
    let auto_save = payload
        .auto_save
        .ok_or_else(|| missing_field_error("autoSave"))?;

    let language = language.parse().map_err(|_| {
        invalid_field_error(
            "language",
            "language must be a two-letter lowercase code",
            &language,
        )
    })?;

    Ok(Preferences {
        notifications,
        language,
        auto_save,
    })
}

/// Replace the authenticated user's preference bag.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/preferences",
    request_body = PreferencesRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Record vanished", body = Error)
    ),
    tags = ["users"],
    operation_id = "updatePreferences"
)]
#[put("/users/me/preferences")]
pub async fn update_preferences(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PreferencesRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let principal = session.require_principal()?;
    let preferences = parse_preferences_request(payload.into_inner())?;
    let user_id = resolve_record_id(&state, &principal).await?;
    let record = state
        .settings
        .update_preferences(&user_id, preferences)
        .await?;
    Ok(web::Json(UserResponse::from(record)))
}
