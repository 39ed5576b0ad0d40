//! Calendar helpers: day normalization, weekday codes and free-day lookup.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use rustc_hash::FxHashSet;

use crate::models::{DailyLog, StudyPlan};

/// Weekday code used by study plans: 1 = Sunday through 7 = Saturday.
pub fn weekday_code(weekday: Weekday) -> u32 {
    weekday.number_from_sunday()
}

/// The local calendar day right now.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// The day after `date`, or `None` at the end of the representable range.
pub fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(1))
}

/// Sunday that starts the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Every day of the given month, in order. Empty for an invalid month.
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first.iter_days().take_while(|d| d.month() == month).collect()
}

/// Logs recorded on `day`, regardless of time of day.
pub fn logs_for_day(logs: &[DailyLog], day: NaiveDate) -> impl Iterator<Item = &DailyLog> {
    logs.iter().filter(move |log| log.day() == day)
}

/// Free-day lookup combining recurring plan weekdays and per-day overrides.
///
/// Overrides are collected once so each per-day check is O(1).
#[derive(Clone, Debug, Default)]
pub struct FreeDayCalendar {
    free_weekdays: FxHashSet<u32>,
    overrides: FxHashSet<NaiveDate>,
}

impl FreeDayCalendar {
    pub fn new(plan: Option<&StudyPlan>, logs: &[DailyLog]) -> Self {
        let free_weekdays: FxHashSet<u32> = plan
            .map(|p| p.free_days.iter().copied().collect())
            .unwrap_or_default();
        let overrides: FxHashSet<NaiveDate> = logs
            .iter()
            .filter(|log| log.is_free_day)
            .map(DailyLog::day)
            .collect();
        Self {
            free_weekdays,
            overrides,
        }
    }

    pub fn is_override(&self, day: NaiveDate) -> bool {
        self.overrides.contains(&day)
    }

    pub fn is_recurring(&self, day: NaiveDate) -> bool {
        self.free_weekdays.contains(&weekday_code(day.weekday()))
    }

    pub fn is_free(&self, day: NaiveDate) -> bool {
        self.is_override(day) || self.is_recurring(day)
    }
}

/// Whether `day` is free, either by plan weekday or by a logged override.
pub fn is_free_day(day: NaiveDate, plan: Option<&StudyPlan>, logs: &[DailyLog]) -> bool {
    logs_for_day(logs, day).any(|log| log.is_free_day)
        || plan.is_some_and(|p| p.is_free_weekday(day.weekday()))
}
