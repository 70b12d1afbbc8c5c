// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    Action, ActionCategory, AccountType, CorporateMetrics, LeaderboardEntry, NewAction, User,
    UserMetrics,
};
use crate::services::impact;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_LIMIT: u32 = 100;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/user", get(current_user))
        .route("/api/auth/account-type", post(update_account_type))
        .route("/api/actions", post(create_action).get(list_actions))
        .route("/api/impact", get(impact_preview))
        .route("/api/metrics/personal", get(personal_metrics))
        .route("/api/metrics/corporate", get(corporate_metrics))
        .route("/api/leaderboard", get(get_leaderboard))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub account_type: AccountType,
    pub company_name: Option<String>,
    pub eco_points: i64,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_image_url: user.profile_image_url,
            account_type: user.account_type,
            company_name: user.company_name,
            eco_points: user.eco_points,
            created_at: format_utc_rfc3339(user.created_at),
        }
    }
}

/// Get current user profile.
async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .store
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(profile.into()))
}

/// Request to switch the account type.
#[derive(Deserialize)]
struct UpdateAccountTypeRequest {
    account_type: String,
    company_name: Option<String>,
}

/// Switch the account between individual and corporate.
async fn update_account_type(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateAccountTypeRequest>,
) -> Result<Json<UserResponse>> {
    let account_type =
        AccountType::parse(&payload.account_type).ok_or_else(|| AppError::Validation {
            field: "account_type".to_string(),
            message: format!("unknown account type '{}'", payload.account_type),
        })?;

    let mut profile = state
        .store
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    profile.account_type = account_type;
    // Company names only make sense on corporate accounts
    profile.company_name = match account_type {
        AccountType::Corporate => payload.company_name,
        AccountType::Individual => None,
    };

    state.store.upsert_user(&profile).await?;

    tracing::info!(
        user_id = %user.user_id,
        account_type = account_type.as_str(),
        "Account type updated"
    );

    Ok(Json(profile.into()))
}

// ─── Actions ─────────────────────────────────────────────────

/// Request to log a new action.
#[derive(Deserialize, Validate)]
pub struct CreateActionRequest {
    pub category: String,
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub quantity: Option<String>,
    #[validate(length(max = 20, message = "unit must be at most 20 characters"))]
    pub unit: Option<String>,
    #[validate(url(message = "proof_url must be a valid URL"))]
    pub proof_url: Option<String>,
}

/// Stored action as returned by the API.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActionResponse {
    pub id: String,
    pub user_id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub category: ActionCategory,
    pub title: String,
    pub description: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub quantity: Decimal,
    pub unit: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub co2_reduced: Decimal,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub water_saved: Decimal,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub waste_diverted: Decimal,
    pub points_earned: i64,
    pub verified: bool,
    pub proof_url: Option<String>,
    pub created_at: String,
}

impl From<Action> for ActionResponse {
    fn from(action: Action) -> Self {
        Self {
            id: action.id,
            user_id: action.user_id,
            category: action.category,
            title: action.title,
            description: action.description,
            quantity: action.quantity,
            unit: action.unit,
            co2_reduced: action.co2_reduced,
            water_saved: action.water_saved,
            waste_diverted: action.waste_diverted,
            points_earned: action.points_earned,
            verified: action.verified,
            proof_url: action.proof_url,
            created_at: format_utc_rfc3339(action.created_at),
        }
    }
}

/// Log a new eco-action for the current user.
async fn create_action(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateActionRequest>,
) -> Result<(StatusCode, Json<ActionResponse>)> {
    payload.validate()?;

    let action = state
        .store
        .log_action(
            &user.user_id,
            NewAction {
                category: payload.category,
                title: payload.title,
                description: payload.description,
                quantity: payload.quantity,
                unit: payload.unit,
                proof_url: payload.proof_url,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(action.into())))
}

#[derive(Deserialize)]
struct ActionsQuery {
    /// Maximum number of actions to return
    #[serde(default = "default_actions_limit")]
    limit: u32,
}

fn default_actions_limit() -> u32 {
    50
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActionsResponse {
    pub actions: Vec<ActionResponse>,
    pub limit: u32,
}

/// Get the current user's actions, newest first.
async fn list_actions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActionsQuery>,
) -> Result<Json<ActionsResponse>> {
    let limit = params.limit.min(MAX_LIMIT);

    tracing::debug!(user_id = %user.user_id, limit, "Fetching actions");

    let actions = state
        .store
        .actions_for_user(&user.user_id, Some(limit))
        .await?;

    Ok(Json(ActionsResponse {
        actions: actions.into_iter().map(Into::into).collect(),
        limit,
    }))
}

// ─── Impact Preview ──────────────────────────────────────────

#[derive(Deserialize)]
struct ImpactQuery {
    category: Option<String>,
    quantity: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ImpactResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub co2_reduced: Decimal,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub water_saved: Decimal,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub waste_diverted: Decimal,
    pub points_earned: i64,
}

/// Preview the impact of an action without logging it.
///
/// Never fails: an unrecognized category yields the all-zero row.
async fn impact_preview(Query(params): Query<ImpactQuery>) -> Json<ImpactResponse> {
    let computed = impact::calculate_impact(
        params.category.as_deref().unwrap_or_default(),
        params.quantity.as_deref(),
    );

    Json(ImpactResponse {
        co2_reduced: computed.co2_reduced,
        water_saved: computed.water_saved,
        waste_diverted: computed.waste_diverted,
        points_earned: computed.points_earned,
    })
}

// ─── Metrics ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct MetricsQuery {
    /// Named window: "month" (personal) or "quarter" (corporate)
    period: Option<String>,
    /// Explicit window start (RFC3339); takes precedence over `period`
    start: Option<String>,
}

fn parse_start_timestamp(start: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    start
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| {
                    AppError::BadRequest(
                        "Invalid 'start' parameter: must be RFC3339 datetime".to_string(),
                    )
                })
        })
        .transpose()
}

/// First instant of the current month (UTC).
fn month_window_start(now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("invalid month window")))
}

/// Midnight three months back (UTC).
fn quarter_window_start(now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    now.checked_sub_months(chrono::Months::new(3))
        .and_then(|shifted| shifted.date_naive().and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("invalid quarter window")))
}

fn resolve_window(params: &MetricsQuery) -> Result<Option<DateTime<Utc>>> {
    if params.start.is_some() {
        return parse_start_timestamp(params.start.as_deref());
    }

    match params.period.as_deref() {
        Some("month") => month_window_start(Utc::now()).map(Some),
        Some("quarter") => quarter_window_start(Utc::now()).map(Some),
        _ => Ok(None),
    }
}

/// Personal dashboard metrics.
async fn personal_metrics(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<MetricsQuery>,
) -> Result<Json<UserMetrics>> {
    let window_start = resolve_window(&params)?;

    tracing::debug!(
        user_id = %user.user_id,
        window_start = ?window_start,
        "Fetching personal metrics"
    );

    let metrics = state.store.user_metrics(&user.user_id, window_start).await?;
    Ok(Json(metrics))
}

/// Corporate dashboard metrics. Corporate accounts only.
async fn corporate_metrics(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<MetricsQuery>,
) -> Result<Json<CorporateMetrics>> {
    let profile = state.store.get_user(&user.user_id).await?;
    if profile.map(|u| u.account_type) != Some(AccountType::Corporate) {
        return Err(AppError::Forbidden(
            "Only corporate accounts can access this endpoint".to_string(),
        ));
    }

    let window_start = resolve_window(&params)?;
    let metrics = state
        .store
        .corporate_metrics(&user.user_id, window_start)
        .await?;
    Ok(Json(metrics))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Deserialize)]
struct LeaderboardQuery {
    /// Account type to rank: "individual" (default) or "corporate"
    #[serde(rename = "type")]
    account_type: Option<String>,
    #[serde(default = "default_leaderboard_limit")]
    limit: u32,
}

fn default_leaderboard_limit() -> u32 {
    10
}

/// Ranked listing of users by lifetime CO2 reduced.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let account_type = match params.account_type.as_deref() {
        None => AccountType::Individual,
        Some(raw) => AccountType::parse(raw).ok_or_else(|| {
            AppError::BadRequest(
                "Invalid 'type' parameter: must be 'individual' or 'corporate'".to_string(),
            )
        })?,
    };
    let limit = params.limit.min(MAX_LIMIT);

    let entries = state.store.leaderboard(account_type, limit).await?;
    Ok(Json(entries))
}
