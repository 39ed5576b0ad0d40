//! Day-by-day allocation of chapter pages.

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

use crate::calendar::{logs_for_day, next_day, FreeDayCalendar};
use crate::config::PlannerConfig;
use crate::models::{Chapter, DailyLog, StudyPlan, StudyTask};
use crate::{log_changes, log_checks, log_debug};

use super::queue::ChapterQueue;
use super::validation::{validate_plan, PlannerError};

/// Scheduled tasks keyed by calendar day. Free days never appear as keys.
pub type Schedule = BTreeMap<NaiveDate, Vec<StudyTask>>;

/// Stateless scheduler over one immutable snapshot.
///
/// Each call to [`StudyScheduler::schedule`] recomputes the whole plan; there is
/// no incremental mode.
pub struct StudyScheduler<'a> {
    chapters: &'a [Chapter],
    plan: &'a StudyPlan,
    logs: &'a [DailyLog],
    today: NaiveDate,
    config: &'a PlannerConfig,
    free_days: FreeDayCalendar,
}

impl<'a> StudyScheduler<'a> {
    /// Create a scheduler, rejecting plans that cannot produce any task.
    pub fn new(
        chapters: &'a [Chapter],
        plan: &'a StudyPlan,
        logs: &'a [DailyLog],
        today: NaiveDate,
        config: &'a PlannerConfig,
    ) -> Result<Self, PlannerError> {
        validate_plan(plan)?;
        Ok(Self {
            chapters,
            plan,
            logs,
            today,
            config,
            free_days: FreeDayCalendar::new(Some(plan), logs),
        })
    }

    /// Whether a progress log for today names a chapter that is now complete.
    ///
    /// Only exact matches against today count; earlier days are never affected.
    fn finished_chapter_today(&self) -> bool {
        let complete: FxHashSet<&str> = self
            .chapters
            .iter()
            .filter(|c| c.is_complete())
            .map(|c| c.id.as_str())
            .collect();

        logs_for_day(self.logs, self.today)
            .filter(|log| !log.is_free_day)
            .filter_map(DailyLog::chapter)
            .any(|id| complete.contains(id))
    }

    fn skip_reason(&self, day: NaiveDate, today_used_up: bool) -> Option<&'static str> {
        if self.free_days.is_free(day) {
            Some("is a free day")
        } else if day == self.today && today_used_up {
            Some("already finished a chapter today")
        } else {
            None
        }
    }

    /// Compute the full schedule starting today.
    pub fn schedule(&self) -> Schedule {
        let verbosity = self.config.verbosity;
        let mut schedule = Schedule::new();
        let mut queue = ChapterQueue::new(self.chapters);

        if queue.is_empty() {
            log_checks!(verbosity, "No chapter has remaining pages");
            return schedule;
        }

        log_debug!(
            verbosity,
            "Scheduling {} chapters ({} pages) at {} pages/day from {}",
            queue.len(),
            queue.total_remaining(),
            self.plan.daily_page_goal,
            self.today
        );

        let today_used_up = self.finished_chapter_today();
        let mut current = self.today;

        for _day in 0..self.config.max_horizon_days {
            if queue.is_empty() {
                break;
            }

            // One chapter per day, even when quota is left over.
            if let Some(reason) = self.skip_reason(current, today_used_up) {
                log_checks!(verbosity, "  {} {}, skipping", current, reason);
            } else if let Some(alloc) = queue.take(self.plan.daily_page_goal) {
                log_changes!(
                    verbosity,
                    "  {}: {} pages {}-{} of {}",
                    current,
                    alloc.pages,
                    alloc.start_page,
                    alloc.end_page,
                    alloc.chapter.id
                );
                if alloc.exhausted {
                    log_debug!(
                        verbosity,
                        "  Chapter {} fully assigned, {} left in queue",
                        alloc.chapter.id,
                        queue.len()
                    );
                }

                schedule.insert(
                    current,
                    vec![StudyTask {
                        date: current,
                        chapter_id: alloc.chapter.id.clone(),
                        chapter_title: alloc.chapter.title.clone(),
                        pages_to_read: alloc.pages,
                        start_page: alloc.start_page,
                        end_page: alloc.end_page,
                        color_hex: alloc.chapter.color_hex.clone(),
                    }],
                );
            }

            match next_day(current) {
                Some(next) => current = next,
                None => {
                    log_changes!(verbosity, "Reached the last representable date {}", current);
                    break;
                }
            }
        }

        if !queue.is_empty() {
            log_changes!(
                verbosity,
                "Horizon of {} days reached with {} pages unassigned",
                self.config.max_horizon_days,
                queue.total_remaining()
            );
        }

        schedule
    }
}

/// Compute the day-by-day study schedule for a snapshot.
///
/// Returns an empty schedule when there is no plan or nothing left to study.
///
/// # Errors
/// * `PlannerError::InvalidDailyGoal` if the plan's goal is not positive
/// * `PlannerError::InvalidWeekday` for a free-day code outside 1..=7
/// * `PlannerError::NoStudyDays` if every weekday is free
pub fn compute_schedule(
    chapters: &[Chapter],
    plan: Option<&StudyPlan>,
    logs: &[DailyLog],
    today: NaiveDate,
    config: &PlannerConfig,
) -> Result<Schedule, PlannerError> {
    let Some(plan) = plan else {
        return Ok(Schedule::new());
    };
    Ok(StudyScheduler::new(chapters, plan, logs, today, config)?.schedule())
}

/// Tasks scheduled for `date`, empty if none.
pub fn tasks_for(schedule: &Schedule, date: NaiveDate) -> &[StudyTask] {
    schedule.get(&date).map(Vec::as_slice).unwrap_or(&[])
}

/// First task on or after `from`.
pub fn next_task(schedule: &Schedule, from: NaiveDate) -> Option<&StudyTask> {
    schedule
        .range(from..)
        .find_map(|(_, tasks)| tasks.first())
}

/// Last day with scheduled work.
pub fn completion_date(schedule: &Schedule) -> Option<NaiveDate> {
    schedule.keys().next_back().copied()
}
