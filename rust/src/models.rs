//! Core data types for the study planner.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use pyo3::prelude::*;

use crate::calendar::weekday_code;

/// A unit of reading material with a page count and progress counter.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chapter {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    pub total_pages: i32,
    /// Priority key: lower values are studied first.
    #[pyo3(get, set)]
    pub order_index: i32,
    #[pyo3(get, set)]
    pub pages_studied: i32,
    /// Display color tag, opaque to the planner.
    #[pyo3(get, set)]
    pub color_hex: String,
}

impl Chapter {
    /// Pages studied, clamped into `0..=total_pages`.
    pub fn effective_pages_studied(&self) -> i32 {
        self.pages_studied.clamp(0, self.total_pages.max(0))
    }

    /// Pages left to study. Never negative.
    pub fn remaining_pages(&self) -> i32 {
        self.total_pages.max(0) - self.effective_pages_studied()
    }

    pub fn is_complete(&self) -> bool {
        self.pages_studied >= self.total_pages
    }

    /// Fraction of the chapter studied, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total_pages <= 0 {
            return 0.0;
        }
        self.effective_pages_studied() as f64 / self.total_pages as f64
    }
}

#[pymethods]
impl Chapter {
    #[new]
    #[pyo3(signature = (id, title, total_pages, order_index, pages_studied=0, color_hex="#FFB3BA".to_string()))]
    fn new(
        id: String,
        title: String,
        total_pages: i32,
        order_index: i32,
        pages_studied: i32,
        color_hex: String,
    ) -> Self {
        Self {
            id,
            title,
            total_pages,
            order_index,
            pages_studied,
            color_hex,
        }
    }

    #[pyo3(name = "remaining_pages")]
    fn py_remaining_pages(&self) -> i32 {
        self.remaining_pages()
    }

    fn __repr__(&self) -> String {
        format!(
            "Chapter(id={:?}, pages={}/{}, order={})",
            self.id, self.pages_studied, self.total_pages, self.order_index
        )
    }
}

/// Pacing configuration: daily page quota plus recurring free weekdays.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct StudyPlan {
    #[pyo3(get, set)]
    pub daily_page_goal: i32,
    /// Informational only; scheduling always starts from today.
    #[pyo3(get, set)]
    pub start_date: NaiveDate,
    /// Weekday codes, 1 = Sunday through 7 = Saturday.
    #[pyo3(get, set)]
    pub free_days: Vec<u32>,
}

impl StudyPlan {
    pub fn is_free_weekday(&self, weekday: Weekday) -> bool {
        self.free_days.contains(&weekday_code(weekday))
    }
}

#[pymethods]
impl StudyPlan {
    #[new]
    #[pyo3(signature = (daily_page_goal, start_date, free_days=None))]
    fn new(daily_page_goal: i32, start_date: NaiveDate, free_days: Option<Vec<u32>>) -> Self {
        Self {
            daily_page_goal,
            start_date,
            free_days: free_days.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "StudyPlan(daily_page_goal={}, free_days={:?})",
            self.daily_page_goal, self.free_days
        )
    }
}

/// A record of what happened on one calendar day, or a free-day override.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct DailyLog {
    /// Store-assigned identifier. Empty until persisted.
    #[pyo3(get, set)]
    pub id: String,
    /// Time of day is ignored; see [`DailyLog::day`].
    #[pyo3(get, set)]
    pub date: NaiveDateTime,
    #[pyo3(get, set)]
    pub pages_learned: i32,
    #[pyo3(get, set)]
    pub chapter_id: Option<String>,
    #[pyo3(get, set)]
    pub is_free_day: bool,
}

impl DailyLog {
    /// Progress entry for a chapter.
    pub fn progress(date: NaiveDateTime, pages_learned: i32, chapter_id: &str) -> Self {
        Self {
            id: String::new(),
            date,
            pages_learned,
            chapter_id: Some(chapter_id.to_string()),
            is_free_day: false,
        }
    }

    /// Free-day marker: zero pages and no chapter.
    pub fn free_day(date: NaiveDateTime) -> Self {
        Self {
            id: String::new(),
            date,
            pages_learned: 0,
            chapter_id: None,
            is_free_day: true,
        }
    }

    /// The calendar day this entry applies to.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// The associated chapter, treating an empty id as absent.
    pub fn chapter(&self) -> Option<&str> {
        self.chapter_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[pymethods]
impl DailyLog {
    #[new]
    #[pyo3(signature = (date, pages_learned, chapter_id=None, is_free_day=false, id=String::new()))]
    fn new(
        date: NaiveDateTime,
        pages_learned: i32,
        chapter_id: Option<String>,
        is_free_day: bool,
        id: String,
    ) -> Self {
        Self {
            id,
            date,
            pages_learned,
            chapter_id,
            is_free_day,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "DailyLog(date={}, pages={}, chapter={:?}, free={})",
            self.day(),
            self.pages_learned,
            self.chapter_id,
            self.is_free_day
        )
    }
}

/// One day's assignment of a contiguous page range within one chapter.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyTask {
    #[pyo3(get)]
    pub date: NaiveDate,
    #[pyo3(get)]
    pub chapter_id: String,
    #[pyo3(get)]
    pub chapter_title: String,
    #[pyo3(get)]
    pub pages_to_read: i32,
    /// Inclusive.
    #[pyo3(get)]
    pub start_page: i32,
    /// Inclusive.
    #[pyo3(get)]
    pub end_page: i32,
    #[pyo3(get)]
    pub color_hex: String,
}

#[pymethods]
impl StudyTask {
    fn __repr__(&self) -> String {
        format!(
            "StudyTask(date={}, chapter={:?}, pages={}-{})",
            self.date, self.chapter_id, self.start_page, self.end_page
        )
    }
}

/// One consistent read of everything the planner consumes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StudySnapshot {
    pub chapters: Vec<Chapter>,
    pub plan: Option<StudyPlan>,
    pub logs: Vec<DailyLog>,
}

impl StudySnapshot {
    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// True when every chapter has been fully studied.
    pub fn is_finished(&self) -> bool {
        self.chapters.iter().all(Chapter::is_complete)
    }
}
