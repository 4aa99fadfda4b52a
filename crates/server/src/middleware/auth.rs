//! Admin gate for mutating catalog and user-management routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gamevault_core::Role;

use crate::error::AppError;

/// Header carrying the caller's claimed role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor that rejects requests whose `x-user-role` header is not `admin`.
///
/// The header is client-asserted and carries no proof of identity.
/// TODO: replace with session-backed authorization once login issues a
/// server-side session instead of returning the role to the client.
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<Role>().ok());

        match role {
            Some(Role::Admin) => Ok(Self),
            _ => Err(AppError::Forbidden),
        }
    }
}
