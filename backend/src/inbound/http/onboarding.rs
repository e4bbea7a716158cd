//! Dashboard-entry routing handler.
//!
//! The dashboard shell asks where to send the user on every entry; the
//! decision is never cached server-side because membership can change
//! between visits.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, OnboardingRoute};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::resolve_record_id;

/// Routing decision payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OnboardingResponse {
    /// `onboarding` or `dashboard`.
    pub route: OnboardingRoute,
}

/// Decide whether the user enters onboarding or the dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/onboarding",
    responses(
        (status = 200, description = "Routing decision", body = OnboardingResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "onboardingRoute"
)]
#[get("/users/me/onboarding")]
pub async fn onboarding_route(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OnboardingResponse>> {
    let principal = session.require_principal()?;
    let user_id = resolve_record_id(&state, &principal).await?;
    let route = state.onboarding.route_for(&user_id).await?;
    Ok(web::Json(OnboardingResponse { route }))
}
