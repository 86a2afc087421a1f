// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pure aggregation over one user's stress entries.
//!
//! Callers are responsible for passing only a single user's entries; nothing
//! here filters by owner. Levels are assumed to be in 1..=10.

use crate::models::{CalendarDay, SourceCount, StressCategory, StressEntry, TimelinePoint};
use crate::time_utils::{first_day_of_month, last_day_of_month};
use chrono::{NaiveDate, TimeZone};
use std::collections::HashMap;

/// Mean of `count` integer levels summing to `sum`, rounded to one decimal.
///
/// Rounds half away from zero at the tenths digit using integer arithmetic,
/// so `[1, 2]` gives exactly 1.5. Returns 0 when `count` is 0.
pub fn round_mean_to_tenth(sum: u64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    // floor(sum * 10 / count + 1/2)
    let tenths = (sum * 20 + count) / (2 * count);
    tenths as f64 / 10.0
}

fn level_totals<'a>(entries: impl IntoIterator<Item = &'a StressEntry>) -> (u64, u64) {
    entries.into_iter().fold((0, 0), |(sum, count), entry| {
        (sum + u64::from(entry.stress_level), count + 1)
    })
}

/// Average stress level across all entries; 0 when there are none.
pub fn average_stress_level(entries: &[StressEntry]) -> f64 {
    let (sum, count) = level_totals(entries);
    round_mean_to_tenth(sum, count)
}

/// Count of entries per trimmed, non-empty stress source.
pub fn stress_source_frequency(entries: &[StressEntry]) -> HashMap<String, u32> {
    let mut sources = HashMap::new();
    for entry in entries {
        let source = entry.stress_source.trim();
        if !source.is_empty() {
            *sources.entry(source.to_string()).or_insert(0) += 1;
        }
    }
    sources
}

/// Most frequent sources first (ties by label), at most `limit` of them.
pub fn top_sources(frequency: &HashMap<String, u32>, limit: usize) -> Vec<SourceCount> {
    let mut counts: Vec<SourceCount> = frequency
        .iter()
        .map(|(source, count)| SourceCount {
            source: source.clone(),
            count: *count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.source.cmp(&b.source)));
    counts.truncate(limit);
    counts
}

/// Average level of entries falling on `day` as seen in `tz`.
///
/// `None` means there were no entries that day.
pub fn average_for_day<Tz: TimeZone>(
    entries: &[StressEntry],
    day: NaiveDate,
    tz: &Tz,
) -> Option<f64> {
    let (sum, count) = level_totals(
        entries
            .iter()
            .filter(|entry| entry.timestamp.with_timezone(tz).date_naive() == day),
    );
    (count > 0).then(|| round_mean_to_tenth(sum, count))
}

/// Every calendar day of a month, first to last inclusive.
///
/// `None` for an invalid month.
pub fn month_days(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = first_day_of_month(year, month)?;
    let last = last_day_of_month(year, month)?;
    Some(first.iter_days().take_while(|day| *day <= last).collect())
}

/// The month grid with each day's average and category.
///
/// Equivalent to calling [`average_for_day`] per day, but groups the
/// entries in one pass.
pub fn calendar_month<Tz: TimeZone>(
    entries: &[StressEntry],
    year: i32,
    month: u32,
    tz: &Tz,
) -> Option<Vec<CalendarDay>> {
    let days = month_days(year, month)?;

    let mut by_day: HashMap<NaiveDate, (u64, u64)> = HashMap::new();
    for entry in entries {
        let day = entry.timestamp.with_timezone(tz).date_naive();
        let totals = by_day.entry(day).or_insert((0, 0));
        totals.0 += u64::from(entry.stress_level);
        totals.1 += 1;
    }

    Some(
        days.into_iter()
            .map(|date| {
                let average = by_day
                    .get(&date)
                    .map(|&(sum, count)| round_mean_to_tenth(sum, count));
                CalendarDay {
                    date,
                    average,
                    category: average.map(StressCategory::from_level),
                }
            })
            .collect(),
    )
}

/// Chart points in entry order.
pub fn timeline(entries: &[StressEntry]) -> Vec<TimelinePoint> {
    entries
        .iter()
        .map(|entry| TimelinePoint {
            timestamp: entry.timestamp,
            stress_level: entry.stress_level,
            source: entry.stress_source.clone(),
            activity: entry.activity.clone(),
        })
        .collect()
}
