//! Space handlers.
//!
//! ```text
//! POST   /api/v1/spaces {"name":"Acme"}
//! GET    /api/v1/spaces
//! GET    /api/v1/spaces/{id}
//! DELETE /api/v1/spaces/{id}
//! ```
//!
//! The create response keeps the original wire contract:
//! `{ "success": true, "space": { "id", "name", "ownerId" } }`.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateSpaceRequest, DeleteSpaceRequest};
use crate::domain::{Error, Space, SpaceId, SpaceSettings};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::resolve_record_id;
use crate::inbound::http::validation::{invalid_field_error, missing_field_error};

/// Create-space request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSpaceBody {
    /// Space name; required, trimmed server-side.
    pub name: Option<String>,
}

/// The space slice returned from creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpacePayload {
    /// Space id.
    pub id: String,
    /// Space name.
    pub name: String,
    /// Owning user-record id.
    pub owner_id: String,
}

/// Create-space response envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSpaceResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// The created space.
    pub space: SpacePayload,
}

/// Full space payload for listing and fetching.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceResponse {
    /// Space id.
    pub id: String,
    /// Space name.
    pub name: String,
    /// Owning user-record id.
    pub owner_id: String,
    /// Member record ids, owner included.
    pub members: Vec<String>,
    /// Presentation settings, when saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SpaceSettings>,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<&Space> for SpaceResponse {
    fn from(space: &Space) -> Self {
        Self {
            id: space.id().to_string(),
            name: space.name().to_string(),
            owner_id: space.owner_id().to_string(),
            members: space.members().iter().map(ToString::to_string).collect(),
            settings: space.settings().cloned(),
            created_at: space.created_at().to_rfc3339(),
        }
    }
}

/// Delete-space response envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSpaceResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Identifier of the deleted space.
    pub deleted: String,
    /// Spaces the requester still owns; clients fall back to the first
    /// entry when the deleted space was their selection.
    pub remaining: Vec<SpaceResponse>,
}

fn parse_space_id(raw: &str) -> Result<SpaceId, Error> {
    SpaceId::parse(raw)
        .map_err(|_| invalid_field_error("id", "space id must be a valid UUID", raw))
}

/// Create a space owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/spaces",
    request_body = CreateSpaceBody,
    responses(
        (status = 200, description = "Space created", body = CreateSpaceResponse),
        (status = 400, description = "Missing or blank name", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["spaces"],
    operation_id = "createSpace"
)]
#[post("/spaces")]
pub async fn create_space(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateSpaceBody>,
) -> ApiResult<web::Json<CreateSpaceResponse>> {
    let principal = session.require_principal()?;
    let name = payload
        .into_inner()
        .name
        .ok_or_else(|| missing_field_error("name"))?;

    let owner = resolve_record_id(&state, &principal).await?;
    let space = state.spaces.create(CreateSpaceRequest { owner, name }).await?;

    Ok(web::Json(CreateSpaceResponse {
        success: true,
        space: SpacePayload {
            id: space.id().to_string(),
            name: space.name().to_string(),
            owner_id: space.owner_id().to_string(),
        },
    }))
}

/// List the authenticated user's spaces, deduplicated.
#[utoipa::path(
    get,
    path = "/api/v1/spaces",
    responses(
        (status = 200, description = "Owned spaces", body = [SpaceResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["spaces"],
    operation_id = "listSpaces"
)]
#[get("/spaces")]
pub async fn list_spaces(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SpaceResponse>>> {
    let principal = session.require_principal()?;
    let owner = resolve_record_id(&state, &principal).await?;
    let spaces = state.spaces_query.list(&owner).await?;
    Ok(web::Json(spaces.iter().map(SpaceResponse::from).collect()))
}

/// Fetch a single space by id.
#[utoipa::path(
    get,
    path = "/api/v1/spaces/{id}",
    params(("id" = String, Path, description = "Space id")),
    responses(
        (status = 200, description = "The space", body = SpaceResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown space", body = Error)
    ),
    tags = ["spaces"],
    operation_id = "getSpace"
)]
#[get("/spaces/{id}")]
pub async fn get_space(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SpaceResponse>> {
    session.require_principal()?;
    let id = parse_space_id(&path.into_inner())?;
    let space = state.spaces_query.fetch(&id).await?;
    Ok(web::Json(SpaceResponse::from(&space)))
}

/// Delete an owned space.
#[utoipa::path(
    delete,
    path = "/api/v1/spaces/{id}",
    params(("id" = String, Path, description = "Space id")),
    responses(
        (status = 200, description = "Space deleted", body = DeleteSpaceResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Unknown space", body = Error)
    ),
    tags = ["spaces"],
    operation_id = "deleteSpace"
)]
#[delete("/spaces/{id}")]
pub async fn delete_space(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteSpaceResponse>> {
    let principal = session.require_principal()?;
    let id = parse_space_id(&path.into_inner())?;
    let requester = resolve_record_id(&state, &principal).await?;

    let deletion = state
        .spaces
        .delete(DeleteSpaceRequest { id, requester })
        .await?;

    Ok(web::Json(DeleteSpaceResponse {
        success: true,
        deleted: deletion.deleted.to_string(),
        remaining: deletion.remaining.iter().map(SpaceResponse::from).collect(),
    }))
}
