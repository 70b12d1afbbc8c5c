// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Eco-action model for storage and API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Action category, a closed set. The interpretation of `quantity`
/// is fixed by the category (kWh, kg, or km).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    EnergySaving,
    Recycling,
    Upcycling,
    SustainableCommute,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 4] = [
        ActionCategory::EnergySaving,
        ActionCategory::Recycling,
        ActionCategory::Upcycling,
        ActionCategory::SustainableCommute,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "energy_saving" => Some(Self::EnergySaving),
            "recycling" => Some(Self::Recycling),
            "upcycling" => Some(Self::Upcycling),
            "sustainable_commute" => Some(Self::SustainableCommute),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnergySaving => "energy_saving",
            Self::Recycling => "recycling",
            Self::Upcycling => "upcycling",
            Self::SustainableCommute => "sustainable_commute",
        }
    }

    /// Unit the quantity is measured in when the caller does not supply one.
    pub fn canonical_unit(&self) -> &'static str {
        match self {
            Self::EnergySaving => "kWh",
            Self::Recycling | Self::Upcycling => "kg",
            Self::SustainableCommute => "km",
        }
    }
}

/// Stored action record.
///
/// The impact fields are computed once at creation time and frozen;
/// they are never recomputed from the quantity afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Opaque id (also used as document ID)
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Action category
    pub category: ActionCategory,
    /// Short human-readable title
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Quantity in the category's unit (defaulted to 1 when not supplied)
    pub quantity: Decimal,
    /// Unit label shown to the user
    pub unit: Option<String>,
    /// CO2 reduced in kg, 2 fractional digits
    pub co2_reduced: Decimal,
    /// Water saved in liters, 2 fractional digits
    pub water_saved: Decimal,
    /// Waste diverted in kg, 2 fractional digits
    pub waste_diverted: Decimal,
    /// EcoPoints earned by this action
    pub points_earned: i64,
    /// Whether the action has been verified (external workflow only)
    pub verified: bool,
    /// Optional proof URL
    pub proof_url: Option<String>,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
}

/// Input for logging a new action. Category and quantity arrive as raw
/// strings; they are validated and resolved when the action is created.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAction {
    pub category: String,
    pub title: String,
    pub description: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub proof_url: Option<String>,
}
