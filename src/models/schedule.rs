// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Break schedule model for storage and API.

use crate::db::Document;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakFrequency {
    Daily,
    /// Monday through Friday
    Weekdays,
    /// Only the listed days
    Custom,
}

/// A recurring set of stress-relief breaks, stored in `break_schedules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakSchedule {
    #[serde(rename = "_id")]
    pub id: String,
    /// Owner's user ID
    pub user_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: BreakFrequency,
    /// Times of day ("HH:MM")
    pub times: Vec<String>,
    /// Lowercase weekday names
    pub days: Vec<String>,
    /// When the schedule was created (ISO 8601)
    pub created_at: String,
}

impl Document for BreakSchedule {
    fn id(&self) -> &str {
        &self.id
    }
}
