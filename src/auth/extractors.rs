use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use super::jwt::{JwtKeys, TokenError};
use crate::{
    error::{ApiError, AuthRejection},
    state::AppState,
    users::PublicUser,
};

/// Identity resolved from a bearer token; handlers taking it are protected.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());
        let token = bearer_token(header).ok_or_else(|| {
            warn!("missing or malformed Authorization header");
            ApiError::Unauthenticated(AuthRejection::MissingToken)
        })?;

        let claims = JwtKeys::from_ref(&state).verify(token).map_err(|e| {
            warn!(reason = %e, "token rejected");
            ApiError::Unauthenticated(match e {
                TokenError::Expired => AuthRejection::ExpiredToken,
                TokenError::Invalid => AuthRejection::InvalidToken,
            })
        })?;

        let user = match state.users.find_by_id(claims.id).await {
            Ok(Some(u)) => u,
            Ok(None) => {
                warn!(user_id = %claims.id, "token subject no longer exists");
                return Err(ApiError::Unauthenticated(AuthRejection::UserNotFound));
            }
            Err(e) => return Err(ApiError::internal("Token verification failed.", e)),
        };

        Ok(CurrentUser(user.into()))
    }
}
