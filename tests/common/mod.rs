// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::Utc;
use ecolog::config::Config;
use ecolog::models::{AccountType, User};
use ecolog::routes::create_router;
use ecolog::store::{MemoryStore, Store};
use ecolog::AppState;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Create a test JWT token.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

/// Create a test app backed by an isolated in-process store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = Store::Memory(MemoryStore::new());

    let state = Arc::new(AppState { config, store });

    (create_router(state.clone()), state)
}

/// Build a user profile for seeding the store.
#[allow(dead_code)]
pub fn make_user(id: &str, account_type: AccountType) -> User {
    User {
        id: id.to_string(),
        email: Some(format!("{}@example.com", id)),
        first_name: Some("Test".to_string()),
        last_name: Some(id.to_string()),
        profile_image_url: None,
        account_type,
        company_name: None,
        eco_points: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
