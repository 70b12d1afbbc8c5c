// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account type, fixed at two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Individual,
    Corporate,
}

impl AccountType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "individual" => Some(Self::Individual),
            "corporate" => Some(Self::Corporate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Corporate => "corporate",
        }
    }
}

/// User profile stored in the action store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque externally issued id (also used as document ID)
    pub id: String,
    /// Email address (may be None for guest identities)
    pub email: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Profile picture URL
    pub profile_image_url: Option<String>,
    /// Account type (individual or corporate)
    pub account_type: AccountType,
    /// Company name, present only for corporate accounts
    pub company_name: Option<String>,
    /// Lifetime EcoPoints total, incremented on every action creation
    pub eco_points: i64,
    /// When the user first connected
    pub created_at: DateTime<Utc>,
    /// Last profile or points update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display name for leaderboards: first + last name trimmed,
    /// falling back to email, falling back to "Anonymous".
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string();

        if !full.is_empty() {
            return full;
        }

        self.email
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or("Anonymous")
            .to_string()
    }
}
