// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Action store: persistence plus the aggregation read paths.
//!
//! The backend is selected once at process start. Both backends expose the
//! same primitive operations; the derived operations (logging an action,
//! metrics, leaderboards) are implemented once on top of them.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use rust_decimal::Decimal;

use crate::error::{AppError, Result};
use crate::ids;
use crate::models::{
    Action, ActionCategory, AccountType, CorporateMetrics, LeaderboardEntry, NewAction, User,
    UserMetrics,
};
use crate::services::{impact, leaderboard, metrics};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACTIONS: &str = "actions";
}

const MAX_CONCURRENT_STORE_OPS: usize = 50;

/// Largest accepted quantity, matching the store's decimal(10,2) shape.
const MAX_QUANTITY: i64 = 100_000_000;

/// Corporate dashboards report a single member until employee links exist.
const ACTIVE_EMPLOYEES: u32 = 1;

/// Action store with the backend chosen at startup.
pub enum Store {
    Firestore(FirestoreStore),
    Memory(MemoryStore),
}

impl Store {
    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by id.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        match self {
            Store::Firestore(db) => db.get_user(id).await,
            Store::Memory(mem) => Ok(mem.get_user(id)),
        }
    }

    /// Create or update a user profile.
    ///
    /// For an existing user the profile fields are replaced but the points
    /// total and creation time are preserved; those belong to the store.
    pub async fn upsert_user(&self, user: &User) -> Result<()> {
        match self {
            Store::Firestore(db) => db.upsert_user(user).await,
            Store::Memory(mem) => {
                mem.upsert_user(user);
                Ok(())
            }
        }
    }

    /// All users of one account type, in store iteration order.
    pub async fn users_by_account_type(&self, account_type: AccountType) -> Result<Vec<User>> {
        match self {
            Store::Firestore(db) => db.users_by_account_type(account_type).await,
            Store::Memory(mem) => Ok(mem.users_by_account_type(account_type)),
        }
    }

    // ─── Action Operations ───────────────────────────────────────

    /// One user's actions, newest first, optionally limited.
    pub async fn actions_for_user(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Action>> {
        match self {
            Store::Firestore(db) => db.actions_for_user(user_id, limit).await,
            Store::Memory(mem) => Ok(mem.actions_for_user(user_id, limit)),
        }
    }

    /// Most recent actions across all users, newest first.
    pub async fn recent_actions(&self, limit: u32) -> Result<Vec<Action>> {
        match self {
            Store::Firestore(db) => db.recent_actions(limit).await,
            Store::Memory(mem) => Ok(mem.recent_actions(limit)),
        }
    }

    /// Persist an action and increment the owner's points in one atomic step.
    async fn create_action(&self, action: &Action) -> Result<()> {
        match self {
            Store::Firestore(db) => db.create_action(action).await,
            Store::Memory(mem) => mem.create_action(action),
        }
    }

    // ─── Derived Operations ──────────────────────────────────────

    /// Log a new action for a user.
    ///
    /// Validates the category against the closed set and the quantity
    /// against the store's bounds, computes the impact metrics once, then
    /// atomically appends the record and credits the earned points.
    pub async fn log_action(&self, user_id: &str, input: NewAction) -> Result<Action> {
        let category =
            ActionCategory::parse(&input.category).ok_or_else(|| AppError::Validation {
                field: "category".to_string(),
                message: format!("unknown category '{}'", input.category),
            })?;

        let quantity = impact::parse_quantity(input.quantity.as_deref());
        if quantity < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "quantity must be non-negative".to_string(),
            });
        }
        if quantity > Decimal::from(MAX_QUANTITY) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: format!("quantity must not exceed {}", MAX_QUANTITY),
            });
        }

        let computed = impact::calculate_impact(category.as_str(), input.quantity.as_deref());

        let action = Action {
            id: ids::opaque_id()?,
            user_id: user_id.to_string(),
            category,
            title: input.title,
            description: input.description,
            quantity,
            unit: input
                .unit
                .or_else(|| Some(category.canonical_unit().to_string())),
            co2_reduced: computed.co2_reduced,
            water_saved: computed.water_saved,
            waste_diverted: computed.waste_diverted,
            points_earned: computed.points_earned,
            verified: false,
            proof_url: input.proof_url,
            created_at: Utc::now(),
        };

        self.create_action(&action).await?;

        tracing::info!(
            user_id,
            action_id = %action.id,
            category = category.as_str(),
            points = action.points_earned,
            "Action logged"
        );

        Ok(action)
    }

    /// Personal metrics, optionally windowed by a start timestamp.
    ///
    /// The window applies to the environmental sums and the action count
    /// only; `eco_points` is always the stored all-time total. A user id
    /// with no stored identity yields zero-valued metrics.
    pub async fn user_metrics(
        &self,
        user_id: &str,
        window_start: Option<DateTime<Utc>>,
    ) -> Result<UserMetrics> {
        let actions = self.actions_for_user(user_id, None).await?;
        let totals = metrics::summarize(&actions, window_start);

        let eco_points = self
            .get_user(user_id)
            .await?
            .map(|user| user.eco_points)
            .unwrap_or(0);

        Ok(UserMetrics {
            co2_reduced: totals.co2_reduced,
            water_saved: totals.water_saved,
            waste_diverted: totals.waste_diverted,
            eco_points,
            action_count: totals.action_count,
        })
    }

    /// Corporate metrics: the account's own totals plus a member count.
    pub async fn corporate_metrics(
        &self,
        user_id: &str,
        window_start: Option<DateTime<Utc>>,
    ) -> Result<CorporateMetrics> {
        let personal = self.user_metrics(user_id, window_start).await?;

        Ok(CorporateMetrics {
            co2_reduced: personal.co2_reduced,
            water_saved: personal.water_saved,
            waste_diverted: personal.waste_diverted,
            eco_points: personal.eco_points,
            action_count: personal.action_count,
            active_employees: ACTIVE_EMPLOYEES,
        })
    }

    /// Leaderboard for one account type.
    ///
    /// Sums each matching user's lifetime CO2 from their full action
    /// history (zero-action users included), then ranks descending with a
    /// deterministic tie-break on user id.
    pub async fn leaderboard(
        &self,
        account_type: AccountType,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>> {
        let users = self.users_by_account_type(account_type).await?;

        let rows = stream::iter(users)
            .map(|user| async move {
                let actions = self.actions_for_user(&user.id, None).await?;
                let total = metrics::summarize(&actions, None).co2_reduced;
                Ok::<_, AppError>((user, total))
            })
            .buffer_unordered(MAX_CONCURRENT_STORE_OPS)
            .collect::<Vec<std::result::Result<_, AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        Ok(leaderboard::rank(rows, limit as usize))
    }
}
