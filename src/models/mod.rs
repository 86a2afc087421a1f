// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod recommendation;
pub mod schedule;
pub mod stats;
pub mod stress;
pub mod user;

pub use recommendation::{recommendations_for, ContentCategory, Recommendation, RecommendationLevel};
pub use schedule::{BreakFrequency, BreakSchedule};
pub use stats::{CalendarDay, SourceCount, StressCategory, StressSummary, TimelinePoint};
pub use stress::{NewStressEntry, StressEntry};
pub use user::User;
