// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EcoLog: Track eco-friendly actions and their environmental impact
//!
//! This crate provides the backend API for logging sustainability actions,
//! deriving impact metrics from them, and serving personal dashboards,
//! corporate dashboards, and leaderboards.

pub mod config;
pub mod error;
pub mod ids;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use store::Store;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Store,
}
