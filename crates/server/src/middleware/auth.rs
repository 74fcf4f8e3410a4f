use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use services::services::auth::{AdminSession, SESSION_COOKIE_NAME};
use tracing::debug;

use crate::error::ApiError;

/// Admin identity taken from the signed session cookie. Handlers that take
/// this extractor answer 401 when the cookie is missing, tampered with or
/// malformed.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin(pub AdminSession);

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Unauthorized)?;

        let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
            debug!(path = %parts.uri.path(), "No admin session");
            return Err(ApiError::Unauthorized);
        };

        AdminSession::decode(cookie.value())
            .map(Self)
            .ok_or(ApiError::Unauthorized)
    }
}
