//! Adaptive study-plan scheduler.
//!
//! Walks forward one calendar day at a time from today, skipping free days,
//! and assigns each study day a contiguous page range of the front chapter in
//! the priority queue.

mod core;
mod queue;
mod validation;

pub use self::core::{
    completion_date, compute_schedule, next_task, tasks_for, Schedule, StudyScheduler,
};
pub use self::queue::{Allocation, ChapterQueue, QueueEntry};
pub use self::validation::{validate_plan, PlannerError};
