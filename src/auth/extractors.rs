use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::{jwt::JwtKeys, repo_types::User};
use crate::{error::AppError, state::AppState};

/// Normalized caller identity, resolved once per request. Downstream code
/// only ever sees this shape, never the channel that produced it.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Bearer header for API clients, token cookie for the browser
        // channel; both resolve to the same identity.
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or(AppError::Unauthenticated("authentication required"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(&token).map_err(|_| {
            warn!("invalid or expired token");
            AppError::Unauthenticated("invalid or expired token")
        })?;

        let user = User::find_by_email(&state.db, &claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(email = %claims.sub, "token subject has no user record");
                AppError::Unauthenticated("invalid or expired token")
            })?;

        if !user.approved {
            warn!(user_id = user.id, "user not approved");
            return Err(AppError::Unauthenticated("invalid or expired token"));
        }

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

fn cookie_token(parts: &Parts) -> Option<String> {
    let cookies = parts
        .headers
        .get(axum::http::header::COOKIE)?
        .to_str()
        .ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("token=").map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts_with(name: axum::http::header::HeaderName, value: &str) -> Parts {
        let request = axum::http::Request::builder()
            .header(name, value)
            .body(())
            .unwrap();
        request.into_parts().0
    }

    #[test]
    fn bearer_token_extracted_from_authorization_header() {
        let parts = parts_with(axum::http::header::AUTHORIZATION, "Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes() {
        let parts = parts_with(axum::http::header::AUTHORIZATION, "Basic dXNlcg==");
        assert!(bearer_token(&parts).is_none());
    }

    #[test]
    fn cookie_token_found_among_other_cookies() {
        let parts = parts_with(
            axum::http::header::COOKIE,
            "theme=dark; token=abc.def.ghi; lang=de",
        );
        assert_eq!(cookie_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn cookie_token_absent_when_no_token_cookie() {
        let parts = parts_with(axum::http::header::COOKIE, "theme=dark");
        assert!(cookie_token(&parts).is_none());
    }
}
