//! Planner session: owns a store and keeps the schedule in sync with it.

use chrono::{NaiveDate, NaiveDateTime};

use crate::calendar::is_free_day;
use crate::config::PlannerConfig;
use crate::day_info::{day_info, month_day_infos, DayInfo};
use crate::models::{StudyPlan, StudySnapshot, StudyTask};
use crate::progress::{apply_progress, revert_log, toggle_free_day, FreeDayChange};
use crate::scheduler::{compute_schedule, tasks_for, validate_plan, PlannerError, Schedule};
use crate::stats::{study_summary, StudySummary};
use crate::store::StudyStore;
use crate::{log_changes, log_debug};

/// Recompute-on-change orchestrator around a [`StudyStore`].
///
/// Every write goes through the store first and is followed by a full reload
/// and reschedule, so the cached schedule always matches the stored data.
pub struct PlannerSession<S: StudyStore> {
    store: S,
    config: PlannerConfig,
    today: NaiveDate,
    snapshot: StudySnapshot,
    schedule: Schedule,
}

impl<S: StudyStore> PlannerSession<S> {
    /// Load the store and compute the initial schedule.
    pub fn open(store: S, config: PlannerConfig, today: NaiveDate) -> Result<Self, PlannerError> {
        let mut session = Self {
            store,
            config,
            today,
            snapshot: StudySnapshot::default(),
            schedule: Schedule::new(),
        };
        session.refresh(today)?;
        Ok(session)
    }

    /// Reload the snapshot and recompute the schedule as of `today`.
    pub fn refresh(&mut self, today: NaiveDate) -> Result<(), PlannerError> {
        let snapshot = self.store.snapshot()?;
        let schedule = compute_schedule(
            &snapshot.chapters,
            snapshot.plan.as_ref(),
            &snapshot.logs,
            today,
            &self.config,
        )?;
        log_debug!(
            self.config.verbosity,
            "Refreshed at {}: {} chapters, {} logs, {} scheduled days",
            today,
            snapshot.chapters.len(),
            snapshot.logs.len(),
            schedule.len()
        );

        self.today = today;
        self.snapshot = snapshot;
        self.schedule = schedule;
        Ok(())
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn snapshot(&self) -> &StudySnapshot {
        &self.snapshot
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Today's goal.
    pub fn today_tasks(&self) -> &[StudyTask] {
        tasks_for(&self.schedule, self.today)
    }

    pub fn is_free_day(&self, date: NaiveDate) -> bool {
        is_free_day(date, self.snapshot.plan.as_ref(), &self.snapshot.logs)
    }

    pub fn is_finished(&self) -> bool {
        self.snapshot.is_finished()
    }

    pub fn day_info(&self, date: NaiveDate) -> DayInfo {
        day_info(date, &self.schedule, &self.snapshot, self.today, &self.config)
    }

    pub fn month(&self, year: i32, month: u32) -> Vec<DayInfo> {
        month_day_infos(
            year,
            month,
            &self.schedule,
            &self.snapshot,
            self.today,
            &self.config,
        )
    }

    pub fn summary(&self) -> StudySummary {
        study_summary(&self.snapshot.logs, self.today)
    }

    /// Set a chapter's studied total and log the pages gained at `at`.
    ///
    /// Returns the id of the new log, if one was written.
    pub fn log_progress(
        &mut self,
        chapter_id: &str,
        new_total: i32,
        at: NaiveDateTime,
    ) -> Result<Option<String>, PlannerError> {
        let chapter = self
            .snapshot
            .chapter(chapter_id)
            .ok_or_else(|| PlannerError::ChapterNotFound(chapter_id.to_string()))?;
        let update = apply_progress(chapter, new_total, at);

        log_changes!(
            self.config.verbosity,
            "Progress on {}: {} -> {} pages",
            chapter_id,
            chapter.pages_studied,
            update.chapter.pages_studied
        );

        self.store.save_chapter(update.chapter)?;
        let log_id = match update.log {
            Some(log) => Some(self.store.add_log(log)?),
            None => None,
        };

        self.refresh(self.today)?;
        Ok(log_id)
    }

    /// Flip the free-day status of `date`.
    pub fn toggle_free_day(&mut self, date: NaiveDate) -> Result<(), PlannerError> {
        match toggle_free_day(date, &self.snapshot.logs) {
            FreeDayChange::Remove(id) => {
                log_changes!(self.config.verbosity, "{} is no longer a free day", date);
                self.store.delete_log(&id)?;
            }
            FreeDayChange::Update(log) => {
                log_changes!(self.config.verbosity, "{} marked free (existing log)", date);
                self.store.update_log(log)?;
            }
            FreeDayChange::Insert(log) => {
                log_changes!(self.config.verbosity, "{} marked free", date);
                self.store.add_log(log)?;
            }
        }
        self.refresh(self.today)
    }

    /// Delete a log, taking its pages back out of the chapter.
    pub fn delete_log(&mut self, log_id: &str) -> Result<(), PlannerError> {
        let log = self
            .snapshot
            .logs
            .iter()
            .find(|l| l.id == log_id)
            .ok_or_else(|| PlannerError::LogNotFound(log_id.to_string()))?;

        if let Some(chapter) = revert_log(log, &self.snapshot.chapters) {
            log_changes!(
                self.config.verbosity,
                "Reverting {} pages on {}",
                log.pages_learned,
                chapter.id
            );
            self.store.save_chapter(chapter)?;
        }
        self.store.delete_log(log_id)?;
        self.refresh(self.today)
    }

    /// Replace the study plan after validating it.
    pub fn save_plan(&mut self, plan: StudyPlan) -> Result<(), PlannerError> {
        validate_plan(&plan)?;
        self.store.save_plan(plan)?;
        self.refresh(self.today)
    }
}
