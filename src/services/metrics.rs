// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Metrics aggregation: rolls per-action records up into totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::Action;

/// Environmental sums over a set of actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTotals {
    pub co2_reduced: Decimal,
    pub water_saved: Decimal,
    pub waste_diverted: Decimal,
    pub action_count: u32,
}

impl Default for ActionTotals {
    fn default() -> Self {
        Self {
            co2_reduced: Decimal::ZERO,
            water_saved: Decimal::ZERO,
            waste_diverted: Decimal::ZERO,
            action_count: 0,
        }
    }
}

/// Sum a user's actions, optionally restricted to `created_at >= window_start`.
///
/// EcoPoints are intentionally not part of this fold: the all-time total
/// lives on the user record and is reported unwindowed.
pub fn summarize(actions: &[Action], window_start: Option<DateTime<Utc>>) -> ActionTotals {
    let mut totals = ActionTotals::default();

    for action in actions {
        if let Some(start) = window_start {
            if action.created_at < start {
                continue;
            }
        }

        totals.co2_reduced += action.co2_reduced;
        totals.water_saved += action.water_saved;
        totals.waste_diverted += action.waste_diverted;
        totals.action_count += 1;
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionCategory;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn make_action(id: &str, co2: &str, water: &str, waste: &str, created_at: &str) -> Action {
        Action {
            id: id.to_string(),
            user_id: "u1".to_string(),
            category: ActionCategory::Recycling,
            title: format!("Action {}", id),
            description: None,
            quantity: Decimal::ONE,
            unit: Some("kg".to_string()),
            co2_reduced: dec(co2),
            water_saved: dec(water),
            waste_diverted: dec(waste),
            points_earned: 10,
            verified: false,
            proof_url: None,
            created_at: chrono::DateTime::parse_from_rfc3339(created_at)
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn test_summarize_all_time() {
        let actions = vec![
            make_action("a", "2.25", "30.00", "0.00", "2026-01-10T08:00:00Z"),
            make_action("b", "5.00", "100.00", "0.00", "2026-02-01T09:00:00Z"),
        ];

        let totals = summarize(&actions, None);

        assert_eq!(totals.co2_reduced, dec("7.25"));
        assert_eq!(totals.water_saved, dec("130.00"));
        assert_eq!(totals.waste_diverted, dec("0.00"));
        assert_eq!(totals.action_count, 2);
    }

    #[test]
    fn test_summarize_window_filters_older_actions() {
        let actions = vec![
            make_action("a", "2.00", "50.00", "1.00", "2026-01-10T08:00:00Z"),
            make_action("b", "4.00", "100.00", "2.00", "2026-02-15T09:00:00Z"),
        ];
        let window_start = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

        let totals = summarize(&actions, Some(window_start));

        assert_eq!(totals.co2_reduced, dec("4.00"));
        assert_eq!(totals.action_count, 1);
    }

    #[test]
    fn test_summarize_window_boundary_is_inclusive() {
        let actions = vec![make_action("a", "2.00", "50.00", "1.00", "2026-02-01T00:00:00Z")];
        let window_start = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

        let totals = summarize(&actions, Some(window_start));

        assert_eq!(totals.action_count, 1);
    }

    #[test]
    fn test_summarize_empty() {
        let totals = summarize(&[], None);
        assert_eq!(totals, ActionTotals::default());
    }
}
