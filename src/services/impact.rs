// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Impact calculation: maps (category, quantity) to derived metrics.
//!
//! This is the single source of truth for how much an action is worth.
//! The result is computed once when an action is logged and frozen on the
//! record, so later formula changes never alter existing history.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Derived environmental metrics for one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactMetrics {
    /// CO2 reduced in kg, 2 fractional digits
    pub co2_reduced: Decimal,
    /// Water saved in liters, 2 fractional digits
    pub water_saved: Decimal,
    /// Waste diverted in kg, 2 fractional digits
    pub waste_diverted: Decimal,
    /// EcoPoints earned, rounded to the nearest integer
    pub points_earned: i64,
}

impl ImpactMetrics {
    fn zero() -> Self {
        Self {
            co2_reduced: two_dp(Decimal::ZERO),
            water_saved: two_dp(Decimal::ZERO),
            waste_diverted: two_dp(Decimal::ZERO),
            points_earned: 0,
        }
    }
}

/// Parse a raw quantity string. Missing or unparseable input defaults to 1.
pub fn parse_quantity(raw: Option<&str>) -> Decimal {
    raw.and_then(|q| q.trim().parse::<Decimal>().ok())
        .unwrap_or(Decimal::ONE)
}

/// Compute the impact of an action from its category and raw quantity.
///
/// Pure and total: an unknown category yields the all-zero row rather than
/// an error. Callers that need a closed category set must enforce it at
/// their own boundary.
pub fn calculate_impact(category: &str, quantity: Option<&str>) -> ImpactMetrics {
    let qty = parse_quantity(quantity);

    match category {
        // 1 kWh saved: 0.5 kg CO2, 10 L water, 5 points
        "energy_saving" => ImpactMetrics {
            co2_reduced: scale(qty, Decimal::new(5, 1)),
            water_saved: scale(qty, Decimal::from(10)),
            waste_diverted: two_dp(Decimal::ZERO),
            points_earned: points(qty, Decimal::from(5)),
        },

        // 1 kg recycled: 2 kg CO2, 50 L water, 1 kg waste diverted, 10 points
        "recycling" => ImpactMetrics {
            co2_reduced: scale(qty, Decimal::from(2)),
            water_saved: scale(qty, Decimal::from(50)),
            waste_diverted: scale(qty, Decimal::ONE),
            points_earned: points(qty, Decimal::from(10)),
        },

        // 1 kg upcycled: 3 kg CO2, 75 L water, 1 kg waste diverted, 15 points
        "upcycling" => ImpactMetrics {
            co2_reduced: scale(qty, Decimal::from(3)),
            water_saved: scale(qty, Decimal::from(75)),
            waste_diverted: scale(qty, Decimal::ONE),
            points_earned: points(qty, Decimal::from(15)),
        },

        // 1 km by bike/foot/transit: 0.15 kg CO2, 2 L water, 3 points
        "sustainable_commute" => ImpactMetrics {
            co2_reduced: scale(qty, Decimal::new(15, 2)),
            water_saved: scale(qty, Decimal::from(2)),
            waste_diverted: two_dp(Decimal::ZERO),
            points_earned: points(qty, Decimal::from(3)),
        },

        _ => ImpactMetrics::zero(),
    }
}

/// Multiply and round to 2 fractional digits, half away from zero.
fn scale(qty: Decimal, rate: Decimal) -> Decimal {
    two_dp(qty.checked_mul(rate).unwrap_or(Decimal::MAX))
}

fn two_dp(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Multiply and round to the nearest whole point, half away from zero.
fn points(qty: Decimal, rate: Decimal) -> i64 {
    qty.checked_mul(rate)
        .unwrap_or(Decimal::MAX)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}
