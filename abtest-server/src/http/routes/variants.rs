//! Variant endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::Variant;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, PathId};
use crate::http::server::AppState;
use crate::models::NewVariant;

/// Create variant request
///
/// Required fields are optional here so a missing or `null` value gets a
/// validation message naming the field.
#[derive(Debug, Deserialize)]
pub struct CreateVariantRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub percent: Option<i32>,
}

/// Variant response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub percent: i32,
}

impl From<Variant> for VariantResponse {
    fn from(v: Variant) -> Self {
        Self {
            id: v.id,
            name: v.name,
            description: v.description,
            percent: v.percent,
        }
    }
}

/// GET /api/variant/{id} - fetch a single variant
async fn get_variant(
    State(state): State<AppState>,
    id: PathId,
) -> Result<Json<VariantResponse>, ApiError> {
    let id = id.resolve("variant")?;
    let variant = state.store().get_variant(id).await?;
    Ok(Json(VariantResponse::from(variant)))
}

/// POST /api/variant - create a new variant
async fn create_variant(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateVariantRequest>,
) -> Result<(StatusCode, Json<VariantResponse>), ApiError> {
    let new = NewVariant::new(req.name, req.description, req.percent)?;
    let variant = state.store().create_variant(new).await?;

    tracing::info!(variant_id = %variant.id, name = %variant.name, "variant created");
    Ok((StatusCode::CREATED, Json(VariantResponse::from(variant))))
}

/// Variant routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/variant", post(create_variant))
        .route("/variant/{id}", get(get_variant))
}
