// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregated metric types returned by the dashboard and leaderboard APIs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Personal dashboard metrics.
///
/// The environmental sums and the action count respect the requested time
/// window; `eco_points` is always the stored all-time total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserMetrics {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub co2_reduced: Decimal,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub water_saved: Decimal,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub waste_diverted: Decimal,
    pub eco_points: i64,
    pub action_count: u32,
}

/// Corporate dashboard metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CorporateMetrics {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub co2_reduced: Decimal,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub water_saved: Decimal,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub waste_diverted: Decimal,
    pub eco_points: i64,
    pub action_count: u32,
    pub active_employees: u32,
}

/// One row of a leaderboard, ranked by lifetime CO2 reduced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardEntry {
    /// 1-based position in the sorted, truncated listing
    pub rank: u32,
    pub user_id: String,
    pub name: String,
    /// Empty string when the user has no email
    pub email: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub co2_reduced: Decimal,
    pub eco_points: i64,
}
