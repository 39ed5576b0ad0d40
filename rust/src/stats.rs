//! Study statistics derived from the log history.

use chrono::{Days, NaiveDate};
use pyo3::prelude::*;
use std::collections::BTreeMap;

use crate::calendar::week_start;
use crate::models::DailyLog;

/// Aggregated pages for one Sunday-started week.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct WeeklyStat {
    #[pyo3(get)]
    pub week_start: NaiveDate,
    #[pyo3(get)]
    pub total_pages: i32,
    #[pyo3(get)]
    pub days_studied: u32,
    /// Pages per studied day; 0 when nothing was studied.
    #[pyo3(get)]
    pub average_per_day: f64,
}

/// Headline numbers for a profile or dashboard.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudySummary {
    #[pyo3(get)]
    pub total_pages: i32,
    #[pyo3(get)]
    pub days_studied: u32,
    #[pyo3(get)]
    pub current_streak: u32,
    #[pyo3(get)]
    pub longest_streak: u32,
}

/// Pages learned per day, ignoring free-day markers. Totals saturate at `i32::MAX`.
pub fn daily_pages(logs: &[DailyLog]) -> BTreeMap<NaiveDate, i32> {
    let mut pages: BTreeMap<NaiveDate, i32> = BTreeMap::new();
    for log in logs.iter().filter(|l| !l.is_free_day) {
        let total = pages.entry(log.day()).or_default();
        *total = total.saturating_add(log.pages_learned);
    }
    pages
}

fn activity_days(logs: &[DailyLog]) -> Vec<NaiveDate> {
    daily_pages(logs)
        .into_iter()
        .filter(|(_, pages)| *pages > 0)
        .map(|(day, _)| day)
        .collect()
}

/// Consecutive study days ending today or yesterday.
///
/// A streak survives until a full day passes without activity, so studying
/// yesterday but not yet today still counts.
pub fn current_streak(logs: &[DailyLog], today: NaiveDate) -> u32 {
    let days: Vec<NaiveDate> = activity_days(logs)
        .into_iter()
        .filter(|d| *d <= today)
        .collect();

    let Some(&latest) = days.last() else {
        return 0;
    };
    if (today - latest).num_days() > 1 {
        return 0;
    }

    let mut streak = 1;
    let mut expected = latest;
    for &day in days.iter().rev().skip(1) {
        match expected.checked_sub_days(Days::new(1)) {
            Some(prev) if prev == day => {
                streak += 1;
                expected = day;
            }
            _ => break,
        }
    }
    streak
}

/// Longest run of consecutive study days in the whole history.
pub fn longest_streak(logs: &[DailyLog]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in activity_days(logs) {
        run = match previous {
            Some(prev) if (day - prev).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }
    longest
}

/// Weekly page totals, newest week first.
pub fn weekly_trends(logs: &[DailyLog]) -> Vec<WeeklyStat> {
    let mut weeks: BTreeMap<NaiveDate, WeeklyStat> = BTreeMap::new();

    for (day, pages) in daily_pages(logs) {
        let start = week_start(day);
        let stat = weeks.entry(start).or_insert_with(|| WeeklyStat {
            week_start: start,
            total_pages: 0,
            days_studied: 0,
            average_per_day: 0.0,
        });
        stat.total_pages = stat.total_pages.saturating_add(pages);
        if pages > 0 {
            stat.days_studied += 1;
        }
    }

    weeks
        .into_values()
        .rev()
        .map(|mut stat| {
            if stat.days_studied > 0 {
                stat.average_per_day = stat.total_pages as f64 / stat.days_studied as f64;
            }
            stat
        })
        .collect()
}

/// Pages per day for the last `days` days, today included. Days without logs map to 0.
pub fn heatmap(logs: &[DailyLog], today: NaiveDate, days: u32) -> BTreeMap<NaiveDate, i32> {
    let pages = daily_pages(logs);
    (0..days as u64)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|day| (day, pages.get(&day).copied().unwrap_or(0)))
        .collect()
}

pub fn study_summary(logs: &[DailyLog], today: NaiveDate) -> StudySummary {
    let pages = daily_pages(logs);
    StudySummary {
        total_pages: pages.values().fold(0, |sum, p| sum.saturating_add(*p)),
        days_studied: pages.values().filter(|p| **p > 0).count() as u32,
        current_streak: current_streak(logs, today),
        longest_streak: longest_streak(logs),
    }
}
