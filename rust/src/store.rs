//! Persistence boundary for chapters, the study plan and daily logs.

use thiserror::Error;

use crate::models::{Chapter, DailyLog, StudyPlan, StudySnapshot};

/// Errors reported by a [`StudyStore`] backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Source of truth for planner inputs.
///
/// The planner only ever reads whole snapshots and writes back individual
/// records; sync and conflict handling belong to the implementation.
pub trait StudyStore {
    fn chapters(&self) -> Result<Vec<Chapter>, StoreError>;
    fn plan(&self) -> Result<Option<StudyPlan>, StoreError>;
    fn logs(&self) -> Result<Vec<DailyLog>, StoreError>;

    /// Insert or replace a chapter by id.
    fn save_chapter(&mut self, chapter: Chapter) -> Result<(), StoreError>;
    fn save_plan(&mut self, plan: StudyPlan) -> Result<(), StoreError>;
    /// Persist a new log and return its assigned id.
    fn add_log(&mut self, log: DailyLog) -> Result<String, StoreError>;
    fn update_log(&mut self, log: DailyLog) -> Result<(), StoreError>;
    fn delete_log(&mut self, id: &str) -> Result<(), StoreError>;

    /// Read everything the planner needs in one go.
    fn snapshot(&self) -> Result<StudySnapshot, StoreError> {
        Ok(StudySnapshot {
            chapters: self.chapters()?,
            plan: self.plan()?,
            logs: self.logs()?,
        })
    }
}

/// Store kept entirely in memory. Log ids are assigned as `log-1`, `log-2`, ...
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    chapters: Vec<Chapter>,
    plan: Option<StudyPlan>,
    logs: Vec<DailyLog>,
    next_log_id: u64,
}

impl InMemoryStore {
    pub fn new(chapters: Vec<Chapter>, plan: Option<StudyPlan>) -> Self {
        Self {
            chapters,
            plan,
            ..Self::default()
        }
    }
}

impl StudyStore for InMemoryStore {
    fn chapters(&self) -> Result<Vec<Chapter>, StoreError> {
        Ok(self.chapters.clone())
    }

    fn plan(&self) -> Result<Option<StudyPlan>, StoreError> {
        Ok(self.plan.clone())
    }

    fn logs(&self) -> Result<Vec<DailyLog>, StoreError> {
        Ok(self.logs.clone())
    }

    fn save_chapter(&mut self, chapter: Chapter) -> Result<(), StoreError> {
        match self.chapters.iter_mut().find(|c| c.id == chapter.id) {
            Some(existing) => *existing = chapter,
            None => self.chapters.push(chapter),
        }
        Ok(())
    }

    fn save_plan(&mut self, plan: StudyPlan) -> Result<(), StoreError> {
        self.plan = Some(plan);
        Ok(())
    }

    fn add_log(&mut self, mut log: DailyLog) -> Result<String, StoreError> {
        self.next_log_id += 1;
        log.id = format!("log-{}", self.next_log_id);
        let id = log.id.clone();
        self.logs.push(log);
        Ok(id)
    }

    fn update_log(&mut self, log: DailyLog) -> Result<(), StoreError> {
        let existing = self
            .logs
            .iter_mut()
            .find(|l| l.id == log.id)
            .ok_or_else(|| StoreError::NotFound(log.id.clone()))?;
        *existing = log;
        Ok(())
    }

    fn delete_log(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.logs.len();
        self.logs.retain(|l| l.id != id);
        if self.logs.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
