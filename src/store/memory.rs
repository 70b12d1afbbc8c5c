// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process action store.
//!
//! Each user's profile and action history live in one map entry, so the
//! entry guard is the critical section required for action creation: the
//! append and the points increment become visible together.

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::AppError;
use crate::models::{Action, AccountType, User};

/// In-process store over a concurrent map, keyed by user id.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, UserRecord>,
}

struct UserRecord {
    user: User,
    actions: Vec<Action>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get_user(&self, id: &str) -> Option<User> {
        self.users.get(id).map(|record| record.user.clone())
    }

    pub(crate) fn upsert_user(&self, user: &User) {
        match self.users.entry(user.id.clone()) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                let eco_points = record.user.eco_points;
                let created_at = record.user.created_at;
                record.user = user.clone();
                // Points and creation time belong to the store, not the caller.
                record.user.eco_points = eco_points;
                record.user.created_at = created_at;
                record.user.updated_at = Utc::now();
            }
            Entry::Vacant(vacant) => {
                vacant.insert(UserRecord {
                    user: user.clone(),
                    actions: Vec::new(),
                });
            }
        }
    }

    pub(crate) fn users_by_account_type(&self, account_type: AccountType) -> Vec<User> {
        self.users
            .iter()
            .filter(|record| record.user.account_type == account_type)
            .map(|record| record.user.clone())
            .collect()
    }

    pub(crate) fn create_action(&self, action: &Action) -> Result<(), AppError> {
        let mut record =
            self.users
                .get_mut(&action.user_id)
                .ok_or_else(|| AppError::Validation {
                    field: "user_id".to_string(),
                    message: format!("unknown user '{}'", action.user_id),
                })?;

        record.user.eco_points += action.points_earned;
        record.user.updated_at = action.created_at;
        record.actions.push(action.clone());
        Ok(())
    }

    pub(crate) fn actions_for_user(&self, user_id: &str, limit: Option<u32>) -> Vec<Action> {
        let mut actions = self
            .users
            .get(user_id)
            .map(|record| record.actions.clone())
            .unwrap_or_default();

        sort_newest_first(&mut actions);
        if let Some(limit) = limit {
            actions.truncate(limit as usize);
        }
        actions
    }

    pub(crate) fn recent_actions(&self, limit: u32) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .users
            .iter()
            .flat_map(|record| record.actions.clone())
            .collect();

        sort_newest_first(&mut actions);
        actions.truncate(limit as usize);
        actions
    }
}

fn sort_newest_first(actions: &mut [Action]) {
    actions.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionCategory;
    use rust_decimal::Decimal;

    fn make_user(id: &str, account_type: AccountType) -> User {
        User {
            id: id.to_string(),
            email: None,
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            profile_image_url: None,
            account_type,
            company_name: None,
            eco_points: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_action(id: &str, user_id: &str, points: i64) -> Action {
        Action {
            id: id.to_string(),
            user_id: user_id.to_string(),
            category: ActionCategory::Recycling,
            title: "Test".to_string(),
            description: None,
            quantity: Decimal::ONE,
            unit: Some("kg".to_string()),
            co2_reduced: Decimal::new(200, 2),
            water_saved: Decimal::new(5000, 2),
            waste_diverted: Decimal::new(100, 2),
            points_earned: points,
            verified: false,
            proof_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_preserves_points_and_created_at() {
        let store = MemoryStore::new();
        let user = make_user("u1", AccountType::Individual);
        store.upsert_user(&user);

        store
            .create_action(&make_action("a1", "u1", 25))
            .expect("create should succeed");

        // Re-upsert with a stale profile copy (points 0)
        let mut updated = user.clone();
        updated.account_type = AccountType::Corporate;
        updated.company_name = Some("Acme".to_string());
        store.upsert_user(&updated);

        let stored = store.get_user("u1").expect("user exists");
        assert_eq!(stored.eco_points, 25);
        assert_eq!(stored.account_type, AccountType::Corporate);
        assert_eq!(stored.created_at, user.created_at);
    }

    #[test]
    fn test_create_action_unknown_user() {
        let store = MemoryStore::new();
        let err = store
            .create_action(&make_action("a1", "ghost", 10))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_actions_sorted_newest_first_with_limit() {
        let store = MemoryStore::new();
        store.upsert_user(&make_user("u1", AccountType::Individual));

        for i in 0..5 {
            let mut action = make_action(&format!("a{}", i), "u1", 10);
            action.created_at = Utc::now() + chrono::Duration::seconds(i);
            store.create_action(&action).unwrap();
        }

        let actions = store.actions_for_user("u1", Some(3));
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].id, "a4");
        assert_eq!(actions[1].id, "a3");

        let all = store.recent_actions(100);
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_users_by_account_type_filters() {
        let store = MemoryStore::new();
        store.upsert_user(&make_user("ind", AccountType::Individual));
        store.upsert_user(&make_user("corp", AccountType::Corporate));

        let corporate = store.users_by_account_type(AccountType::Corporate);
        assert_eq!(corporate.len(), 1);
        assert_eq!(corporate[0].id, "corp");
    }
}
