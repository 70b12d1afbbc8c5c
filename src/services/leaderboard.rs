// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard ranking: orders users of one account type by lifetime CO2.

use rust_decimal::Decimal;

use crate::models::{LeaderboardEntry, User};

/// Rank users by lifetime CO2 reduced, descending.
///
/// Ties are broken by user id ascending so the ordering is deterministic
/// regardless of how the underlying store iterates. Users with no actions
/// stay in the listing with a zero total. Ranks are the 1-based position
/// in the sorted, truncated listing.
pub fn rank(mut rows: Vec<(User, Decimal)>, limit: usize) -> Vec<LeaderboardEntry> {
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
    rows.truncate(limit);

    rows.into_iter()
        .enumerate()
        .map(|(index, (user, co2_reduced))| LeaderboardEntry {
            rank: index as u32 + 1,
            name: user.display_name(),
            email: user.email.clone().unwrap_or_default(),
            user_id: user.id,
            co2_reduced,
            eco_points: user.eco_points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;
    use chrono::Utc;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn make_user(id: &str, first: Option<&str>, email: Option<&str>, points: i64) -> User {
        User {
            id: id.to_string(),
            email: email.map(String::from),
            first_name: first.map(String::from),
            last_name: None,
            profile_image_url: None,
            account_type: AccountType::Individual,
            company_name: None,
            eco_points: points,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_rank_orders_descending() {
        let rows = vec![
            (make_user("a", Some("Low"), None, 10), dec("1.00")),
            (make_user("b", Some("High"), None, 90), dec("9.00")),
            (make_user("c", Some("Mid"), None, 50), dec("5.00")),
        ];

        let entries = rank(rows, 10);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].user_id, "b");
        assert_eq!(entries[1].user_id, "c");
        assert_eq!(entries[2].user_id, "a");
        let ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_rank_tie_break_by_user_id() {
        let rows = vec![
            (make_user("zeta", None, None, 0), dec("3.00")),
            (make_user("alpha", None, None, 0), dec("3.00")),
        ];

        let entries = rank(rows, 10);

        assert_eq!(entries[0].user_id, "alpha");
        assert_eq!(entries[1].user_id, "zeta");
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let rows = (0..20)
            .map(|i| (make_user(&format!("u{:02}", i), None, None, 0), Decimal::from(i)))
            .collect();

        let entries = rank(rows, 5);

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].co2_reduced, Decimal::from(19));
        assert_eq!(entries[4].rank, 5);
    }

    #[test]
    fn test_rank_keeps_zero_action_users_last() {
        let rows = vec![
            (make_user("idle", None, None, 0), Decimal::ZERO),
            (make_user("busy", None, None, 40), dec("8.00")),
        ];

        let entries = rank(rows, 10);

        assert_eq!(entries[1].user_id, "idle");
        assert_eq!(entries[1].co2_reduced, Decimal::ZERO);
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn test_rank_name_and_email_fallbacks() {
        let rows = vec![
            (make_user("a", Some("Named"), Some("a@example.com"), 0), dec("3.00")),
            (make_user("b", None, Some("b@example.com"), 0), dec("2.00")),
            (make_user("c", None, None, 0), dec("1.00")),
        ];

        let entries = rank(rows, 10);

        assert_eq!(entries[0].name, "Named");
        assert_eq!(entries[0].email, "a@example.com");
        assert_eq!(entries[1].name, "b@example.com");
        assert_eq!(entries[2].name, "Anonymous");
        assert_eq!(entries[2].email, "");
    }
}
