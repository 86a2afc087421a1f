// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Stress entry model for storage and API.

use crate::db::Document;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MIN_STRESS_LEVEL: u8 = 1;
pub const MAX_STRESS_LEVEL: u8 = 10;

/// One self-reported stress observation, stored in `stress_data`.
///
/// Entries are written once and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressEntry {
    #[serde(rename = "_id")]
    pub id: String,
    /// Owner's user ID
    pub user_id: String,
    /// Stress level, 1..=10 (validated at capture time)
    pub stress_level: u8,
    /// Perceived cause; may be empty
    #[serde(default)]
    pub stress_source: String,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub activity: String,
    /// When the entry applies (stored as ISO 8601 with milliseconds)
    #[serde(with = "crate::time_utils::iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl StressEntry {
    /// Stamp a captured entry with its id and owner.
    ///
    /// The timestamp is truncated to the millisecond precision it is stored
    /// with, so the returned entry equals the one read back later.
    pub fn from_new(id: String, user_id: String, entry: NewStressEntry) -> Self {
        Self {
            id,
            user_id,
            stress_level: entry.stress_level,
            stress_source: entry.stress_source,
            symptoms: entry.symptoms,
            location: entry.location,
            activity: entry.activity,
            timestamp: entry.timestamp.trunc_subsecs(3),
        }
    }
}

impl Document for StressEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A stress entry as captured from the user, before id and owner are assigned.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewStressEntry {
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[validate(range(min = 1, max = 10))]
    pub stress_level: u8,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub stress_source: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub symptoms: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub location: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub activity: String,
}

impl NewStressEntry {
    /// Entry at `timestamp` with only a level and source filled in.
    pub fn new(timestamp: DateTime<Utc>, stress_level: u8, stress_source: &str) -> Self {
        Self {
            timestamp,
            stress_level,
            stress_source: stress_source.to_string(),
            symptoms: String::new(),
            location: String::new(),
            activity: String::new(),
        }
    }
}
