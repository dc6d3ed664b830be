//! User assignment endpoints
//!
//! Reads return the joined variant; creates echo only the stored row.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::variants::VariantResponse;
use crate::db::{User, UserWithVariant};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, PathId};
use crate::http::server::AppState;
use crate::models::NewUser;

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user_id: Option<String>,
    pub variant_id: Option<Uuid>,
}

/// Created user response (no variant detail)
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub variant_id: Uuid,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            user_id: u.user_id,
            variant_id: u.variant_id,
        }
    }
}

/// User with assigned variant response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserWithVariantResponse {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub variant_id: Uuid,
    pub variant: Option<VariantResponse>,
}

impl From<UserWithVariant> for UserWithVariantResponse {
    fn from(u: UserWithVariant) -> Self {
        Self {
            id: u.id,
            user_id: u.user_id,
            variant_id: u.variant_id,
            variant: u.variant.map(VariantResponse::from),
        }
    }
}

/// GET /api/user/{id} - fetch a user with its variant
async fn get_user(
    State(state): State<AppState>,
    id: PathId,
) -> Result<Json<UserWithVariantResponse>, ApiError> {
    let id = id.resolve("user")?;
    let user = state.store().get_user(id).await?;

    if user.variant.is_none() {
        tracing::warn!(user = %user.id, variant_id = %user.variant_id, "user has no matching variant row");
    }
    Ok(Json(UserWithVariantResponse::from(user)))
}

/// POST /api/user - assign a user to an existing variant
async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let new = NewUser::new(req.user_id, req.variant_id)?;
    let user = state.store().create_user(new).await?;

    tracing::info!(user = %user.id, variant_id = %user.variant_id, "user assigned");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route("/user/{id}", get(get_user))
}
