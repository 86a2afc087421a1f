// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mock login routes.
//!
//! No credentials are checked. Each login issues a session token for the
//! found or created user, both as a cookie and in the response body.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::User;
use crate::routes::api::UserResponse;
use crate::AppState;

const SESSION_COOKIE_DAYS: i64 = 30;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/social", post(social_login))
        .route("/auth/logout", post(logout))
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    email: String,
    #[validate(length(min = 1, max = 100))]
    name: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    email: String,
}

#[derive(Deserialize, Validate)]
pub struct SocialLoginRequest {
    #[validate(length(min = 1, max = 32))]
    provider: String,
}

/// Session established by any login route.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub token: String,
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.frontend_url.starts_with("https://"))
        .max_age(time::Duration::days(SESSION_COOKIE_DAYS))
        .build()
}

/// Issue a session for `user`.
fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: User,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let token = create_jwt(&user.id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "Session started");

    let jar = jar.add(session_cookie(state, token.clone()));
    Ok((
        jar,
        Json(SessionResponse {
            user: user.into(),
            token,
        }),
    ))
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>)> {
    req.validate()?;
    let user = state.users.register(&req.email, &req.name)?;
    let (jar, body) = start_session(&state, jar, user)?;
    Ok((StatusCode::CREATED, jar, body))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    req.validate()?;
    let user = state.users.login(&req.email)?;
    start_session(&state, jar, user)
}

async fn social_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<SocialLoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    req.validate()?;
    let valid_provider = req
        .provider
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid_provider {
        return Err(AppError::BadRequest(format!(
            "Invalid provider '{}'",
            req.provider
        )));
    }
    let user = state.users.social_login(&req.provider)?;
    start_session(&state, jar, user)
}

/// Logout - clears the session cookie.
async fn logout(jar: CookieJar) -> (StatusCode, CookieJar) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (StatusCode::NO_CONTENT, jar)
}
