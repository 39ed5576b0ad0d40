//! Planner errors and plan validation.

use thiserror::Error;

use crate::models::StudyPlan;
use crate::store::StoreError;

/// Errors surfaced by the planner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Daily page goal must be positive, got {0}")]
    InvalidDailyGoal(i32),
    #[error("Invalid free weekday code {0} (expected 1=Sunday..7=Saturday)")]
    InvalidWeekday(u32),
    #[error("Every weekday is a free day; nothing can be scheduled")]
    NoStudyDays,
    #[error("No study plan configured")]
    MissingPlan,
    #[error("Chapter not found: {0}")]
    ChapterNotFound(String),
    #[error("Log not found: {0}")]
    LogNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reject plans that can never yield a task.
pub fn validate_plan(plan: &StudyPlan) -> Result<(), PlannerError> {
    if plan.daily_page_goal <= 0 {
        return Err(PlannerError::InvalidDailyGoal(plan.daily_page_goal));
    }

    let mut seen = [false; 7];
    for &code in &plan.free_days {
        if !(1..=7).contains(&code) {
            return Err(PlannerError::InvalidWeekday(code));
        }
        seen[(code - 1) as usize] = true;
    }
    if seen.iter().all(|&free| free) {
        return Err(PlannerError::NoStudyDays);
    }

    Ok(())
}
