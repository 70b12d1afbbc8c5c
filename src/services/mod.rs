// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod impact;
pub mod leaderboard;
pub mod metrics;

pub use impact::{calculate_impact, parse_quantity, ImpactMetrics};
pub use leaderboard::rank;
pub use metrics::{summarize, ActionTotals};
