//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::ApiError;

/// JSON body whose parse failures become `400 invalid_request`.
///
/// Rejection happens before the handler body runs, so a malformed request
/// never reaches the datastore.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "rejected request body");
                Err(ApiError::InvalidRequest {
                    message: rejection.body_text(),
                })
            }
        }
    }
}

/// Raw `{id}` path segment, parsed as a UUID when possible.
///
/// A segment that isn't a UUID can't name a stored row, so it resolves to
/// the same 404 as an unknown id.
pub struct PathId {
    raw: String,
    id: Option<Uuid>,
}

impl PathId {
    /// Resolve to a UUID or a not-found error for `resource`.
    pub fn resolve(self, resource: &'static str) -> Result<Uuid, ApiError> {
        self.id.ok_or(ApiError::NotFound {
            resource,
            id: self.raw,
        })
    }
}

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidRequest {
                message: e.body_text(),
            })?;

        let id = Uuid::parse_str(&raw).ok();
        Ok(Self { raw, id })
    }
}
