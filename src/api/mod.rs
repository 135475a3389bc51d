//! API handlers for Upkeep REST endpoints

pub mod auth;
pub mod calendar;
pub mod dashboard;
pub mod equipment;
pub mod equipment_categories;
pub mod health;
pub mod openapi;
pub mod reports;
pub mod requests;
pub mod technicians;
pub mod users;
pub mod work_centers;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{error::AppError, models::user::SessionClaims, AppState};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// Extractor for the signed-in user, from a Bearer token or the session cookie
pub struct AuthenticatedUser(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                value
                    .strip_prefix("Bearer ")
                    .map(str::to_string)
                    .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))
            })
            .transpose()?;

        let token = match bearer {
            Some(token) => token,
            None => CookieJar::from_headers(&parts.headers)
                .get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .ok_or_else(|| AppError::Authentication("Unauthorized".to_string()))?,
        };

        let claims = SessionClaims::from_token(&token, &state.config.auth.session_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}
