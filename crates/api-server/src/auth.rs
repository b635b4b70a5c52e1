use crate::error::ApiError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::{RequestContext, UserId};

/// Header through which the authentication gateway forwards the verified caller.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Acting identity of the request, as established upstream.
///
/// Tokens are verified before requests reach this server; this extractor
/// only turns the forwarded identity into a [`RequestContext`].
pub struct ActingUser(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthenticated("Missing authenticated user"))?;

        let user_id: UserId = raw
            .parse()
            .map_err(|_| ApiError::unauthenticated("Malformed authenticated user id"))?;

        Ok(ActingUser(RequestContext::new(user_id)))
    }
}
