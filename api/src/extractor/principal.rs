use axum::{
    extract::{FromRequestParts, Extension},
    http::request::Parts,
};
use models::schemas::user::Principal;

use crate::error::ApiError;

/// The caller identity, trusted verbatim from the `Principal` extension an
/// upstream auth layer attaches to the request — the core never verifies a
/// token itself (spec.md §6).
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(principal) = Extension::<Principal>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::new(
                    axum::http::StatusCode::UNAUTHORIZED,
                    "missing authenticated principal",
                )
            })?;
        Ok(CurrentUser(principal))
    }
}
