use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};

use crate::{auth::repo_types::User, error::ApiError, state::AppState};

const NOT_AUTHORIZED: &str = "Request is not authorized";

/// Identity resolved from a verified token, attached to the request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = auth
        .strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Rejects the request unless it carries a valid token for an existing user.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(req.headers()) else {
        warn!("missing or malformed Authorization header");
        return Err(ApiError::Auth(NOT_AUTHORIZED.into()));
    };

    let claims = state.keys.verify(token).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        ApiError::Auth(NOT_AUTHORIZED.into())
    })?;

    let user = match state.users.find_by_id(claims.sub).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(user_id = %claims.sub, "token subject no longer exists");
            return Err(ApiError::Auth(NOT_AUTHORIZED.into()));
        }
        Err(e) => {
            error!(error = %e, user_id = %claims.sub, "user lookup failed");
            return Err(ApiError::Auth(NOT_AUTHORIZED.into()));
        }
    };

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::Auth(NOT_AUTHORIZED.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::bearer_token;
    use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

    fn headers(v: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_static(v));
        h
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer abc.def")), Some("abc.def"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
