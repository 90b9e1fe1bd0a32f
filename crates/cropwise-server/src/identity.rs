use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use cropwise_core::model::UserId;
use std::convert::Infallible;

/// Header carrying the opaque user id issued by the identity provider.
pub const USER_HEADER: &str = "x-user-id";

/// The caller's identity, if the request carries one.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<UserId>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(UserId::new);
        Ok(CurrentUser(user))
    }
}
