//! Rust implementation of the study planner: schedule computation, calendar
//! day states, progress bookkeeping and study statistics.
//!
//! Everything here is a pure computation over snapshots; the host application
//! owns storage and calls back in whenever its data changes.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::collections::BTreeMap;

pub mod calendar;
mod config;
pub mod day_info;
pub mod logging;
mod models;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod store;

pub use config::{PlannerConfig, DEFAULT_DAILY_GOAL, MAX_SCHEDULE_DAYS};
pub use day_info::{day_info, month_day_infos, DayInfo, DayState};
pub use models::{Chapter, DailyLog, StudyPlan, StudySnapshot, StudyTask};
pub use scheduler::{compute_schedule, PlannerError, Schedule, StudyScheduler};
pub use session::PlannerSession;
pub use stats::{StudySummary, WeeklyStat};
pub use store::{InMemoryStore, StoreError, StudyStore};

fn value_error(err: PlannerError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Compute the day-by-day study schedule.
///
/// # Arguments
/// * `chapters` - All chapters, in any order
/// * `plan` - Active study plan; without one the schedule is empty
/// * `logs` - Full log history (progress entries and free-day markers)
/// * `today` - First day to schedule (defaults to the local date)
/// * `config` - Planner configuration
///
/// # Returns
/// * Dict mapping date to the list of tasks for that day
///
/// # Raises
/// * ValueError if the plan has a non-positive goal or invalid free days
#[pyfunction]
#[pyo3(name = "compute_schedule", signature = (chapters, plan, logs, today=None, config=None))]
fn py_compute_schedule(
    chapters: Vec<Chapter>,
    plan: Option<StudyPlan>,
    logs: Vec<DailyLog>,
    today: Option<NaiveDate>,
    config: Option<PlannerConfig>,
) -> PyResult<Schedule> {
    let config = config.unwrap_or_default();
    let today = today.unwrap_or_else(calendar::today_local);
    compute_schedule(&chapters, plan.as_ref(), &logs, today, &config).map_err(value_error)
}

/// Validate a study plan without scheduling anything.
///
/// # Raises
/// * ValueError describing the first problem found
#[pyfunction]
#[pyo3(name = "validate_plan")]
fn py_validate_plan(plan: StudyPlan) -> PyResult<()> {
    scheduler::validate_plan(&plan).map_err(value_error)
}

/// Derive the calendar state of a single day.
#[pyfunction]
#[pyo3(name = "day_info", signature = (date, schedule, logs, chapters, plan=None, today=None, config=None))]
#[allow(clippy::too_many_arguments)]
fn py_day_info(
    date: NaiveDate,
    schedule: BTreeMap<NaiveDate, Vec<StudyTask>>,
    logs: Vec<DailyLog>,
    chapters: Vec<Chapter>,
    plan: Option<StudyPlan>,
    today: Option<NaiveDate>,
    config: Option<PlannerConfig>,
) -> DayInfo {
    let snapshot = StudySnapshot {
        chapters,
        plan,
        logs,
    };
    day_info(
        date,
        &schedule,
        &snapshot,
        today.unwrap_or_else(calendar::today_local),
        &config.unwrap_or_default(),
    )
}

/// Derive the calendar state of every day in a month.
#[pyfunction]
#[pyo3(name = "month_day_infos", signature = (year, month, schedule, logs, chapters, plan=None, today=None, config=None))]
#[allow(clippy::too_many_arguments)]
fn py_month_day_infos(
    year: i32,
    month: u32,
    schedule: BTreeMap<NaiveDate, Vec<StudyTask>>,
    logs: Vec<DailyLog>,
    chapters: Vec<Chapter>,
    plan: Option<StudyPlan>,
    today: Option<NaiveDate>,
    config: Option<PlannerConfig>,
) -> Vec<DayInfo> {
    let snapshot = StudySnapshot {
        chapters,
        plan,
        logs,
    };
    month_day_infos(
        year,
        month,
        &schedule,
        &snapshot,
        today.unwrap_or_else(calendar::today_local),
        &config.unwrap_or_default(),
    )
}

/// Totals and streaks over the log history.
#[pyfunction]
#[pyo3(name = "study_summary", signature = (logs, today=None))]
fn py_study_summary(logs: Vec<DailyLog>, today: Option<NaiveDate>) -> StudySummary {
    stats::study_summary(&logs, today.unwrap_or_else(calendar::today_local))
}

/// Weekly page totals, newest week first.
#[pyfunction]
#[pyo3(name = "weekly_trends")]
fn py_weekly_trends(logs: Vec<DailyLog>) -> Vec<WeeklyStat> {
    stats::weekly_trends(&logs)
}

/// Pages per day over the configured heatmap window ending today.
#[pyfunction]
#[pyo3(name = "activity_heatmap", signature = (logs, today=None, config=None))]
fn py_activity_heatmap(
    logs: Vec<DailyLog>,
    today: Option<NaiveDate>,
    config: Option<PlannerConfig>,
) -> BTreeMap<NaiveDate, i32> {
    let config = config.unwrap_or_default();
    stats::heatmap(
        &logs,
        today.unwrap_or_else(calendar::today_local),
        config.heatmap_days,
    )
}

/// The studyplan.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Chapter>()?;
    m.add_class::<StudyPlan>()?;
    m.add_class::<DailyLog>()?;
    m.add_class::<StudyTask>()?;
    m.add_class::<DayInfo>()?;
    m.add_class::<DayState>()?;
    m.add_class::<StudySummary>()?;
    m.add_class::<WeeklyStat>()?;

    // Config types
    m.add_class::<PlannerConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_validate_plan, m)?)?;
    m.add_function(wrap_pyfunction!(py_day_info, m)?)?;
    m.add_function(wrap_pyfunction!(py_month_day_infos, m)?)?;
    m.add_function(wrap_pyfunction!(py_study_summary, m)?)?;
    m.add_function(wrap_pyfunction!(py_weekly_trends, m)?)?;
    m.add_function(wrap_pyfunction!(py_activity_heatmap, m)?)?;

    m.add("MAX_SCHEDULE_DAYS", MAX_SCHEDULE_DAYS)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_day_info_takes_logs_before_chapters() {
        let chapters = vec![Chapter {
            id: "a".to_string(),
            title: "Anatomy".to_string(),
            total_pages: 40,
            order_index: 0,
            pages_studied: 12,
            color_hex: "#AAA".to_string(),
        }];
        let logs = vec![DailyLog::progress(
            d(2025, 1, 6).and_hms_opt(9, 0, 0).unwrap(),
            12,
            "a",
        )];
        let plan = StudyPlan {
            daily_page_goal: 10,
            start_date: d(2025, 1, 1),
            free_days: vec![],
        };

        let info = py_day_info(
            d(2025, 1, 6),
            BTreeMap::new(),
            logs,
            chapters,
            Some(plan),
            Some(d(2025, 1, 6)),
            None,
        );
        assert_eq!(info.state, DayState::GoalAchieved);
        assert_eq!(info.total_pages_logged, 12);
        assert_eq!(info.chapter_title.as_deref(), Some("Anatomy"));
    }
}
