// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Break scheduler: per-user recurring stress-relief breaks.

use crate::db::{collections, DocumentStore, Storage};
use crate::error::{AppError, Result};
use crate::models::{BreakFrequency, BreakSchedule};
use crate::services::ids;
use chrono::{Days, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

const ID_PREFIX: &str = "break";
const DEFAULT_TITLE: &str = "Stress Relief Breaks";
/// Schedules run for this many days after their start date.
const SCHEDULE_LENGTH_DAYS: u64 = 10;
const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Schedule as submitted by the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBreakSchedule {
    #[serde(default)]
    pub title: Option<String>,
    pub start_date: NaiveDate,
    pub frequency: BreakFrequency,
    pub times: Vec<String>,
    #[serde(default)]
    pub days: Vec<String>,
}

fn normalize_times(times: &[String]) -> Result<Vec<String>> {
    let times: Vec<String> = times
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| {
            NaiveTime::parse_from_str(t, "%H:%M")
                .map(|parsed| parsed.format("%H:%M").to_string())
                .map_err(|_| AppError::BadRequest(format!("Invalid time '{t}', expected HH:MM")))
        })
        .collect::<Result<_>>()?;

    if times.is_empty() {
        return Err(AppError::BadRequest(
            "At least one break time is required".to_string(),
        ));
    }
    Ok(times)
}

fn normalize_days(frequency: BreakFrequency, days: &[String]) -> Result<Vec<String>> {
    let days = days
        .iter()
        .map(|d| {
            let day = d.trim().to_lowercase();
            if WEEKDAYS.contains(&day.as_str()) {
                Ok(day)
            } else {
                Err(AppError::BadRequest(format!("Unknown weekday '{d}'")))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    match frequency {
        BreakFrequency::Custom if days.is_empty() => Err(AppError::BadRequest(
            "Custom schedules need at least one day".to_string(),
        )),
        BreakFrequency::Custom => Ok(days),
        BreakFrequency::Weekdays => Ok(WEEKDAYS[..5].iter().map(|d| d.to_string()).collect()),
        BreakFrequency::Daily => Ok(WEEKDAYS.iter().map(|d| d.to_string()).collect()),
    }
}

#[derive(Clone)]
pub struct ScheduleService {
    store: DocumentStore<BreakSchedule>,
}

impl ScheduleService {
    pub fn new(storage: Storage) -> Self {
        Self {
            store: DocumentStore::new(storage, collections::BREAK_SCHEDULES),
        }
    }

    pub fn create(&self, user_id: &str, request: NewBreakSchedule) -> Result<BreakSchedule> {
        let times = normalize_times(&request.times)?;
        let days = normalize_days(request.frequency, &request.days)?;
        let end_date = request
            .start_date
            .checked_add_days(Days::new(SCHEDULE_LENGTH_DAYS))
            .ok_or_else(|| AppError::BadRequest("Start date out of range".to_string()))?;

        let title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        let schedule = self.store.insert(BreakSchedule {
            id: ids::timestamped_id(ID_PREFIX)?,
            user_id: user_id.to_string(),
            title,
            start_date: request.start_date,
            end_date,
            frequency: request.frequency,
            times,
            days,
            created_at: crate::time_utils::format_utc_iso_millis(Utc::now()),
        })?;

        tracing::info!(user_id, schedule_id = %schedule.id, "Break schedule created");
        Ok(schedule)
    }

    pub fn list(&self, user_id: &str) -> Result<Vec<BreakSchedule>> {
        Ok(self.store.find_by("userId", &Value::from(user_id))?)
    }

    fn owned(&self, user_id: &str, schedule_id: &str) -> Result<BreakSchedule> {
        self.store
            .find_by_id(schedule_id)?
            .filter(|s| s.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Schedule {schedule_id} not found")))
    }

    pub fn rename(&self, user_id: &str, schedule_id: &str, title: &str) -> Result<BreakSchedule> {
        self.owned(user_id, schedule_id)?;

        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("Title must not be empty".to_string()));
        }

        let patch = Map::from_iter([("title".to_string(), json!(title))]);
        self.store
            .update(schedule_id, patch)?
            .ok_or_else(|| AppError::NotFound(format!("Schedule {schedule_id} not found")))
    }

    pub fn delete(&self, user_id: &str, schedule_id: &str) -> Result<()> {
        self.owned(user_id, schedule_id)?;
        if !self.store.delete(schedule_id)? {
            return Err(AppError::NotFound(format!(
                "Schedule {schedule_id} not found"
            )));
        }
        tracing::info!(user_id, schedule_id, "Break schedule deleted");
        Ok(())
    }
}
