// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Guest session routes.
//!
//! EcoLog does not run its own credential flow; identity arrives from the
//! surrounding deployment. For local and demo use these routes mint a guest
//! identity, upsert its profile, and hand out a session JWT as a cookie.

use axum::{
    extract::State,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::ids;
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::{AccountType, User};
use crate::AppState;

const SESSION_DAYS: i64 = 30;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/login", get(login))
        .route("/api/auth/guest", post(guest_login))
        .route("/api/auth/logout", get(logout))
}

/// Response for guest session creation.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GuestSessionResponse {
    pub user_id: String,
    pub message: String,
}

/// Build a fresh guest profile.
fn new_guest_user() -> Result<User> {
    let now = Utc::now();
    Ok(User {
        id: ids::guest_id()?,
        email: None,
        first_name: Some("Guest".to_string()),
        last_name: Some("User".to_string()),
        profile_image_url: None,
        account_type: AccountType::Individual,
        company_name: None,
        eco_points: 0,
        created_at: now,
        updated_at: now,
    })
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_DAYS))
        .build()
}

/// Create a guest session and return the new user id.
async fn guest_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<GuestSessionResponse>)> {
    let user = new_guest_user()?;
    state.store.upsert_user(&user).await?;

    let token = create_jwt(&user.id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "Guest session created");

    let jar = jar.add(session_cookie(token));
    Ok((
        jar,
        Json(GuestSessionResponse {
            user_id: user.id,
            message: "Guest session created".to_string(),
        }),
    ))
}

/// Landing-page login: create a guest session and bounce to the frontend.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect)> {
    let user = new_guest_user()?;
    state.store.upsert_user(&user).await?;

    let token = create_jwt(&user.id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "Guest session created via login redirect");

    let jar = jar.add(session_cookie(token));
    Ok((jar, Redirect::temporary(&state.config.frontend_url)))
}

/// Clear the session cookie and bounce to the frontend.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");
    let jar = jar.remove(removal);

    (jar, Redirect::temporary(&state.config.frontend_url))
}
