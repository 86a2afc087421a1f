//! Derived stress views for the dashboard, charts, and calendar.
//!
//! These are computed on read from a user's entries; nothing here is stored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Coarse band of a (possibly averaged) stress level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StressCategory {
    /// 3 and below
    Low,
    /// Above 3, up to 7
    Moderate,
    /// Above 7
    High,
}

impl StressCategory {
    pub fn from_level(level: f64) -> Self {
        if level <= 3.0 {
            Self::Low
        } else if level <= 7.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low stress - Keep it up!",
            Self::Moderate => "Moderate stress - Monitor closely",
            Self::High => "High stress - Take action",
        }
    }
}

/// Dashboard tips for an overall average.
///
/// The thresholds differ from [`StressCategory`]: anything above 4 already
/// gets the mindfulness set.
pub fn dashboard_tips(average: f64) -> [&'static str; 3] {
    if average > 7.0 {
        [
            "Try deep breathing exercises",
            "Schedule regular breaks throughout your day",
            "Listen to calming music",
        ]
    } else if average > 4.0 {
        [
            "Practice mindfulness for 5 minutes",
            "Take short walks during the day",
            "Consider scheduling regular breaks",
        ]
    } else {
        [
            "Maintain your current stress management practices",
            "Continue tracking your stress levels",
            "Explore new relaxation techniques",
        ]
    }
}

/// Overall summary for one user.
#[derive(Debug, Clone, Serialize)]
pub struct StressSummary {
    /// Mean level rounded to one decimal; 0 with no entries
    pub average_stress: f64,
    pub total_entries: usize,
    pub category: StressCategory,
    pub status: &'static str,
    pub tips: Vec<&'static str>,
}

impl StressSummary {
    pub fn new(average_stress: f64, total_entries: usize) -> Self {
        let category = StressCategory::from_level(average_stress);
        Self {
            average_stress,
            total_entries,
            category,
            status: category.label(),
            tips: dashboard_tips(average_stress).to_vec(),
        }
    }
}

/// One bar in the stress sources chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCount {
    pub source: String,
    pub count: u32,
}

/// One cell of the calendar month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// `None` means no entries that day, which is not the same as 0.
    pub average: Option<f64>,
    pub category: Option<StressCategory>,
}

/// One point on the stress-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    #[serde(with = "crate::time_utils::iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub stress_level: u8,
    pub source: String,
    pub activity: String,
}
