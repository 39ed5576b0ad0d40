//! Snapshot transitions triggered by user activity.
//!
//! These functions compute what should be written back to the store; they do
//! not touch the store themselves.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::calendar::logs_for_day;
use crate::models::{Chapter, DailyLog, StudyTask};
use crate::scheduler::{tasks_for, Schedule};

/// Result of setting a chapter's studied-page total.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressUpdate {
    pub chapter: Chapter,
    /// Present only when pages were added.
    pub log: Option<DailyLog>,
}

/// Set a chapter's studied total, logging the positive delta at `at`.
///
/// `new_total` is clamped into `0..=total_pages`. Lowering the total updates
/// the chapter without writing a log.
pub fn apply_progress(chapter: &Chapter, new_total: i32, at: NaiveDateTime) -> ProgressUpdate {
    let new_total = new_total.clamp(0, chapter.total_pages.max(0));
    let delta = new_total - chapter.effective_pages_studied();

    let mut updated = chapter.clone();
    updated.pages_studied = new_total;

    ProgressUpdate {
        log: (delta > 0).then(|| DailyLog::progress(at, delta, &chapter.id)),
        chapter: updated,
    }
}

/// Store operation that toggles the free-day status of one day.
#[derive(Clone, Debug, PartialEq)]
pub enum FreeDayChange {
    /// Drop an existing free-day marker.
    Remove(String),
    /// Flag an existing progress log as a free day.
    Update(DailyLog),
    /// Add a new marker for a day without logs.
    Insert(DailyLog),
}

/// Decide how to toggle `date`, based on the first log recorded for that day.
pub fn toggle_free_day(date: NaiveDate, logs: &[DailyLog]) -> FreeDayChange {
    match logs_for_day(logs, date).next() {
        Some(existing) if existing.is_free_day => FreeDayChange::Remove(existing.id.clone()),
        Some(existing) => {
            let mut updated = existing.clone();
            updated.is_free_day = true;
            FreeDayChange::Update(updated)
        }
        None => FreeDayChange::Insert(DailyLog::free_day(date.and_time(NaiveTime::MIN))),
    }
}

/// Chapter with the progress of a deleted log taken back out.
///
/// Returns `None` for free-day markers and logs whose chapter no longer exists.
pub fn revert_log(log: &DailyLog, chapters: &[Chapter]) -> Option<Chapter> {
    if log.is_free_day {
        return None;
    }
    let id = log.chapter()?;
    let mut chapter = chapters.iter().find(|c| c.id == id)?.clone();
    chapter.pages_studied = (chapter.pages_studied - log.pages_learned).max(0);
    Some(chapter)
}

/// Chapter that progress logged on `date` should be attributed to.
///
/// An explicitly chosen task wins, then the day's scheduled task, then the
/// first unfinished chapter by order.
pub fn log_target<'a>(
    date: NaiveDate,
    schedule: &Schedule,
    chapters: &'a [Chapter],
    task: Option<&StudyTask>,
) -> Option<&'a Chapter> {
    let by_id = |id: &str| chapters.iter().find(|c| c.id == id);

    if let Some(chapter) = task.and_then(|t| by_id(&t.chapter_id)) {
        return Some(chapter);
    }
    if let Some(chapter) = tasks_for(schedule, date)
        .first()
        .and_then(|t| by_id(&t.chapter_id))
    {
        return Some(chapter);
    }
    chapters
        .iter()
        .filter(|c| c.pages_studied < c.total_pages)
        .min_by_key(|c| c.order_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn at(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(19, 0, 0).unwrap()
    }

    fn make_chapter(id: &str, order: i32, total: i32, studied: i32) -> Chapter {
        Chapter {
            id: id.to_string(),
            title: id.to_string(),
            total_pages: total,
            order_index: order,
            pages_studied: studied,
            color_hex: "#FFFFFF".to_string(),
        }
    }

    #[test]
    fn test_apply_progress_logs_delta() {
        let chapter = make_chapter("a", 0, 120, 45);
        let update = apply_progress(&chapter, 60, at(d(2025, 1, 6)));

        assert_eq!(update.chapter.pages_studied, 60);
        let log = update.log.unwrap();
        assert_eq!(log.pages_learned, 15);
        assert_eq!(log.chapter(), Some("a"));
        assert!(!log.is_free_day);
        assert_eq!(log.day(), d(2025, 1, 6));
    }

    #[test]
    fn test_apply_progress_from_negative_stored_total() {
        let chapter = make_chapter("a", 0, 50, -3);
        let update = apply_progress(&chapter, 5, at(d(2025, 1, 6)));

        assert_eq!(update.chapter.pages_studied, 5);
        assert_eq!(update.log.unwrap().pages_learned, 5);
    }

    #[test]
    fn test_apply_progress_clamps_and_skips_non_positive_delta() {
        let chapter = make_chapter("a", 0, 50, 45);

        let update = apply_progress(&chapter, 80, at(d(2025, 1, 6)));
        assert_eq!(update.chapter.pages_studied, 50);
        assert_eq!(update.log.unwrap().pages_learned, 5);

        let update = apply_progress(&chapter, 30, at(d(2025, 1, 6)));
        assert_eq!(update.chapter.pages_studied, 30);
        assert!(update.log.is_none());

        let update = apply_progress(&chapter, 45, at(d(2025, 1, 6)));
        assert!(update.log.is_none());
    }

    #[test]
    fn test_toggle_free_day_inserts_marker() {
        match toggle_free_day(d(2025, 1, 6), &[]) {
            FreeDayChange::Insert(log) => {
                assert!(log.is_free_day);
                assert_eq!(log.pages_learned, 0);
                assert_eq!(log.chapter(), None);
                assert_eq!(log.day(), d(2025, 1, 6));
            }
            other => panic!("unexpected change: {:?}", other),
        }
    }

    #[test]
    fn test_toggle_free_day_removes_marker() {
        let mut marker = DailyLog::free_day(at(d(2025, 1, 6)));
        marker.id = "log-3".to_string();
        assert_eq!(
            toggle_free_day(d(2025, 1, 6), &[marker]),
            FreeDayChange::Remove("log-3".to_string())
        );
    }

    #[test]
    fn test_toggle_free_day_flags_progress_log() {
        let mut log = DailyLog::progress(at(d(2025, 1, 6)), 4, "a");
        log.id = "log-1".to_string();
        let other_day = DailyLog::progress(at(d(2025, 1, 5)), 2, "a");

        match toggle_free_day(d(2025, 1, 6), &[other_day, log]) {
            FreeDayChange::Update(updated) => {
                assert_eq!(updated.id, "log-1");
                assert!(updated.is_free_day);
                assert_eq!(updated.pages_learned, 4);
            }
            other => panic!("unexpected change: {:?}", other),
        }
    }

    #[test]
    fn test_revert_log() {
        let chapters = vec![make_chapter("a", 0, 30, 12)];

        let log = DailyLog::progress(at(d(2025, 1, 6)), 5, "a");
        assert_eq!(revert_log(&log, &chapters).unwrap().pages_studied, 7);

        let big = DailyLog::progress(at(d(2025, 1, 6)), 50, "a");
        assert_eq!(revert_log(&big, &chapters).unwrap().pages_studied, 0);

        let marker = DailyLog::free_day(at(d(2025, 1, 6)));
        assert!(revert_log(&marker, &chapters).is_none());

        let orphan = DailyLog::progress(at(d(2025, 1, 6)), 5, "gone");
        assert!(revert_log(&orphan, &chapters).is_none());
    }

    #[test]
    fn test_log_target_priority() {
        let chapters = vec![
            make_chapter("done", 0, 10, 10),
            make_chapter("later", 2, 10, 0),
            make_chapter("next", 1, 10, 3),
        ];
        let date = d(2025, 1, 6);
        let task = StudyTask {
            date,
            chapter_id: "later".to_string(),
            chapter_title: "later".to_string(),
            pages_to_read: 5,
            start_page: 1,
            end_page: 5,
            color_hex: "#FFFFFF".to_string(),
        };
        let mut schedule = Schedule::new();
        schedule.insert(date, vec![task.clone()]);

        assert_eq!(
            log_target(date, &Schedule::new(), &chapters, Some(&task)).map(|c| c.id.as_str()),
            Some("later")
        );
        assert_eq!(
            log_target(date, &schedule, &chapters, None).map(|c| c.id.as_str()),
            Some("later")
        );
        assert_eq!(
            log_target(date, &Schedule::new(), &chapters, None).map(|c| c.id.as_str()),
            Some("next")
        );
        assert!(log_target(date, &Schedule::new(), &chapters[..1], None).is_none());
    }
}
