// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    recommendations_for, BreakSchedule, CalendarDay, ContentCategory, NewStressEntry,
    Recommendation, SourceCount, StressCategory, StressEntry, StressSummary, TimelinePoint, User,
};
use crate::services::{aggregation, NewBreakSchedule};
use crate::time_utils::offset_from_minutes;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use chrono::{Datelike, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DEFAULT_SOURCES_LIMIT: usize = 10;
const MAX_SOURCES_LIMIT: usize = 50;
/// Average used to pick recommendations before anything has been logged.
const NO_DATA_RECOMMENDATION_LEVEL: f64 = 5.0;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/stress", get(list_stress).post(create_stress))
        .route("/api/stats/summary", get(get_summary))
        .route("/api/stats/sources", get(get_sources))
        .route("/api/stats/timeline", get(get_timeline))
        .route("/api/stats/calendar", get(get_calendar))
        .route("/api/recommendations", get(get_recommendations))
        .route("/api/schedules", get(list_schedules).post(create_schedule))
        .route(
            "/api/schedules/{id}",
            put(rename_schedule).delete(delete_schedule),
        )
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
    pub email: String,
    pub name: String,
    pub provider: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: String,
    pub last_login: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            provider: user.provider,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .users
        .get(&user.user_id)?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;
    Ok(Json(profile.into()))
}

#[derive(Deserialize, Validate)]
struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    name: String,
}

/// Change the display name of an email account.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    req.validate()?;
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }
    let profile = state.users.rename(&user.user_id, &req.name)?;
    Ok(Json(profile.into()))
}

// ─── Stress Entries ──────────────────────────────────────────

#[derive(Serialize)]
struct StressListResponse {
    entries: Vec<StressEntry>,
    total: usize,
}

/// Log a stress entry for the current user.
async fn create_stress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(entry): Json<NewStressEntry>,
) -> Result<(StatusCode, Json<StressEntry>)> {
    entry.validate()?;
    let saved = state
        .stress
        .save(&user, entry)?
        .ok_or(AppError::Unauthorized)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// All of the current user's entries, in the order they were logged.
async fn list_stress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StressListResponse>> {
    let entries = state.stress.load_all(&user)?;
    Ok(Json(StressListResponse {
        total: entries.len(),
        entries,
    }))
}

// ─── Stats ───────────────────────────────────────────────────

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StressSummary>> {
    let entries = state.stress.load_all(&user)?;
    let average = aggregation::average_stress_level(&entries);
    Ok(Json(StressSummary::new(average, entries.len())))
}

#[derive(Deserialize)]
struct SourcesQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct SourcesResponse {
    sources: Vec<SourceCount>,
}

/// Most frequent stress sources, most common first.
async fn get_sources(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<SourcesQuery>,
) -> Result<Json<SourcesResponse>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SOURCES_LIMIT)
        .clamp(1, MAX_SOURCES_LIMIT);
    let frequency = state.stress.stress_source_frequency(&user)?;
    Ok(Json(SourcesResponse {
        sources: aggregation::top_sources(&frequency, limit),
    }))
}

#[derive(Serialize)]
struct TimelineResponse {
    points: Vec<TimelinePoint>,
}

async fn get_timeline(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TimelineResponse>> {
    let entries = state.stress.load_all(&user)?;
    Ok(Json(TimelineResponse {
        points: aggregation::timeline(&entries),
    }))
}

#[derive(Deserialize)]
struct CalendarQuery {
    year: Option<i32>,
    month: Option<u32>,
    /// Client's offset from UTC; days are grouped in this local time
    #[serde(default)]
    tz_offset_minutes: i32,
}

#[derive(Serialize)]
struct CalendarResponse {
    year: i32,
    month: u32,
    days: Vec<CalendarDay>,
}

/// Resolve the requested month, defaulting to the current month in `tz`.
fn calendar_month_for(query: &CalendarQuery) -> Result<(i32, u32, FixedOffset)> {
    let tz = offset_from_minutes(query.tz_offset_minutes).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid tz_offset_minutes: {}",
            query.tz_offset_minutes
        ))
    })?;
    let today = Utc::now().with_timezone(&tz).date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());
    if !(1..=12).contains(&month) {
        return Err(AppError::BadRequest(format!("Invalid month: {month}")));
    }
    Ok((year, month, tz))
}

/// Per-day averages for one month.
async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>> {
    let (year, month, tz) = calendar_month_for(&params)?;
    let entries = state.stress.load_all(&user)?;
    let days = aggregation::calendar_month(&entries, year, month, &tz)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month: {year}-{month}")))?;
    Ok(Json(CalendarResponse { year, month, days }))
}

// ─── Recommendations ─────────────────────────────────────────

#[derive(Deserialize)]
struct RecommendationsQuery {
    category: Option<ContentCategory>,
}

#[derive(Serialize)]
struct RecommendationsResponse {
    average_stress: f64,
    stress_category: StressCategory,
    items: Vec<&'static Recommendation>,
}

async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationsResponse>> {
    let average = state.stress.average_stress_level(&user)?;
    let level = if average == 0.0 {
        NO_DATA_RECOMMENDATION_LEVEL
    } else {
        average
    };
    let stress_category = StressCategory::from_level(level);
    Ok(Json(RecommendationsResponse {
        average_stress: average,
        stress_category,
        items: recommendations_for(stress_category, params.category),
    }))
}

// ─── Break Schedules ─────────────────────────────────────────

#[derive(Serialize)]
struct SchedulesResponse {
    schedules: Vec<BreakSchedule>,
}

async fn list_schedules(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SchedulesResponse>> {
    Ok(Json(SchedulesResponse {
        schedules: state.schedules.list(&user.user_id)?,
    }))
}

async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<NewBreakSchedule>,
) -> Result<(StatusCode, Json<BreakSchedule>)> {
    let schedule = state.schedules.create(&user.user_id, req)?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

#[derive(Deserialize)]
struct RenameScheduleRequest {
    title: String,
}

async fn rename_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<RenameScheduleRequest>,
) -> Result<Json<BreakSchedule>> {
    Ok(Json(state.schedules.rename(&user.user_id, &id, &req.title)?))
}

async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.schedules.delete(&user.user_id, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
