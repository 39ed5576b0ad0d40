//! Per-day calendar state derived from the schedule and the log history.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::calendar::{is_free_day, logs_for_day, month_days};
use crate::config::PlannerConfig;
use crate::models::{DailyLog, StudySnapshot, StudyTask};
use crate::scheduler::{tasks_for, Schedule};

/// Display state of one calendar cell.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DayState {
    /// Future day with a scheduled task
    NotStarted,
    NotScheduled,
    FreeDay,
    /// Today or earlier, scheduled, nothing logged
    Missed,
    PartialProgress,
    GoalAchieved,
}

/// Everything the calendar needs to render one day.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct DayInfo {
    #[pyo3(get)]
    pub date: NaiveDate,
    #[pyo3(get)]
    pub state: DayState,
    #[pyo3(get)]
    pub scheduled_task: Option<StudyTask>,
    #[pyo3(get)]
    pub logs: Vec<DailyLog>,
    #[pyo3(get)]
    pub total_pages_logged: i32,
    #[pyo3(get)]
    pub daily_goal: i32,
    #[pyo3(get)]
    pub chapter_color: Option<String>,
    #[pyo3(get)]
    pub chapter_title: Option<String>,
}

#[pymethods]
impl DayInfo {
    /// Logged pages as a fraction of the daily goal, capped at 1.0.
    pub fn progress_percentage(&self) -> f64 {
        if self.daily_goal <= 0 {
            return 0.0;
        }
        (self.total_pages_logged as f64 / self.daily_goal as f64).min(1.0)
    }

    fn __repr__(&self) -> String {
        format!(
            "DayInfo(date={}, state={:?}, logged={}/{})",
            self.date, self.state, self.total_pages_logged, self.daily_goal
        )
    }
}

fn progress_state(total_pages_logged: i32, daily_goal: i32) -> DayState {
    if total_pages_logged >= daily_goal {
        DayState::GoalAchieved
    } else {
        DayState::PartialProgress
    }
}

/// Classify a single day for calendar display.
pub fn day_info(
    date: NaiveDate,
    schedule: &Schedule,
    snapshot: &StudySnapshot,
    today: NaiveDate,
    config: &PlannerConfig,
) -> DayInfo {
    let plan = snapshot.plan.as_ref();
    let day_logs: Vec<DailyLog> = logs_for_day(&snapshot.logs, date).cloned().collect();
    let total_pages_logged: i32 = day_logs
        .iter()
        .filter(|log| !log.is_free_day)
        .map(|log| log.pages_learned)
        .fold(0, i32::saturating_add);
    let task = tasks_for(schedule, date).first().cloned();
    let daily_goal = plan.map_or(config.default_daily_goal, |p| p.daily_page_goal);

    // Logged activity wins over the plan
    let logged_chapter = day_logs
        .iter()
        .find(|log| !log.is_free_day)
        .and_then(DailyLog::chapter)
        .and_then(|id| snapshot.chapter(id));
    let (chapter_color, chapter_title) = match (logged_chapter, &task) {
        (Some(chapter), _) => (Some(chapter.color_hex.clone()), Some(chapter.title.clone())),
        (None, Some(task)) => (Some(task.color_hex.clone()), Some(task.chapter_title.clone())),
        (None, None) => (None, None),
    };

    let mut state = if is_free_day(date, plan, &snapshot.logs) {
        DayState::FreeDay
    } else if date > today {
        if task.is_some() {
            DayState::NotStarted
        } else {
            DayState::NotScheduled
        }
    } else if total_pages_logged > 0 {
        progress_state(total_pages_logged, daily_goal)
    } else if task.is_some() {
        DayState::Missed
    } else {
        DayState::NotScheduled
    };

    // Unscheduled extra study still counts
    if state == DayState::NotScheduled && total_pages_logged > 0 {
        state = progress_state(total_pages_logged, daily_goal);
    }

    DayInfo {
        date,
        state,
        scheduled_task: task,
        logs: day_logs,
        total_pages_logged,
        daily_goal,
        chapter_color,
        chapter_title,
    }
}

/// Day info for every day of a month, in date order.
pub fn month_day_infos(
    year: i32,
    month: u32,
    schedule: &Schedule,
    snapshot: &StudySnapshot,
    today: NaiveDate,
    config: &PlannerConfig,
) -> Vec<DayInfo> {
    month_days(year, month)
        .into_iter()
        .map(|date| day_info(date, schedule, snapshot, today, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chapter, StudyPlan};

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    // Wednesday
    fn today() -> NaiveDate {
        d(2025, 1, 15)
    }

    fn make_chapter(id: &str, color: &str) -> Chapter {
        Chapter {
            id: id.to_string(),
            title: format!("Title {}", id),
            total_pages: 100,
            order_index: 0,
            pages_studied: 0,
            color_hex: color.to_string(),
        }
    }

    fn make_task(date: NaiveDate, chapter_id: &str) -> StudyTask {
        StudyTask {
            date,
            chapter_id: chapter_id.to_string(),
            chapter_title: format!("Title {}", chapter_id),
            pages_to_read: 10,
            start_page: 1,
            end_page: 10,
            color_hex: "#PLAN".to_string(),
        }
    }

    fn progress_log(date: NaiveDate, pages: i32, chapter_id: &str) -> DailyLog {
        DailyLog::progress(date.and_hms_opt(12, 0, 0).unwrap(), pages, chapter_id)
    }

    fn snapshot(free_days: Vec<u32>, logs: Vec<DailyLog>) -> StudySnapshot {
        StudySnapshot {
            chapters: vec![make_chapter("a", "#AAA"), make_chapter("b", "#BBB")],
            plan: Some(StudyPlan {
                daily_page_goal: 10,
                start_date: d(2025, 1, 1),
                free_days,
            }),
            logs,
        }
    }

    fn schedule_on(dates: &[NaiveDate]) -> Schedule {
        dates
            .iter()
            .map(|&date| (date, vec![make_task(date, "b")]))
            .collect()
    }

    fn state(date: NaiveDate, schedule: &Schedule, snap: &StudySnapshot) -> DayState {
        day_info(date, schedule, snap, today(), &PlannerConfig::default()).state
    }

    #[test]
    fn test_free_day_wins() {
        let snap = snapshot(vec![4], vec![progress_log(today(), 12, "a")]);
        let schedule = schedule_on(&[today()]);
        // Wednesday is code 4
        assert_eq!(state(today(), &schedule, &snap), DayState::FreeDay);

        let override_day = d(2025, 1, 20);
        let snap = snapshot(
            vec![],
            vec![DailyLog::free_day(override_day.and_hms_opt(0, 0, 0).unwrap())],
        );
        assert_eq!(
            state(override_day, &schedule_on(&[override_day]), &snap),
            DayState::FreeDay
        );
    }

    #[test]
    fn test_future_days() {
        let snap = snapshot(vec![], vec![]);
        let tomorrow = d(2025, 1, 16);
        assert_eq!(
            state(tomorrow, &schedule_on(&[tomorrow]), &snap),
            DayState::NotStarted
        );
        assert_eq!(state(tomorrow, &Schedule::new(), &snap), DayState::NotScheduled);
    }

    #[test]
    fn test_past_and_today_progress() {
        let yesterday = d(2025, 1, 14);
        let schedule = schedule_on(&[yesterday, today()]);

        let snap = snapshot(vec![], vec![]);
        assert_eq!(state(yesterday, &schedule, &snap), DayState::Missed);
        assert_eq!(state(today(), &schedule, &snap), DayState::Missed);
        assert_eq!(state(d(2025, 1, 13), &schedule, &snap), DayState::NotScheduled);

        let snap = snapshot(
            vec![],
            vec![progress_log(yesterday, 4, "b"), progress_log(today(), 6, "b")],
        );
        assert_eq!(state(yesterday, &schedule, &snap), DayState::PartialProgress);

        let snap = snapshot(
            vec![],
            vec![progress_log(today(), 6, "b"), progress_log(today(), 4, "a")],
        );
        assert_eq!(state(today(), &schedule, &snap), DayState::GoalAchieved);
    }

    #[test]
    fn test_unscheduled_extra_study() {
        let past = d(2025, 1, 10);
        let snap = snapshot(vec![], vec![progress_log(past, 3, "a")]);
        assert_eq!(state(past, &Schedule::new(), &snap), DayState::PartialProgress);

        let snap = snapshot(vec![], vec![progress_log(past, 30, "a")]);
        assert_eq!(state(past, &Schedule::new(), &snap), DayState::GoalAchieved);
    }

    #[test]
    fn test_future_logged_study_is_reclassified() {
        let future = d(2025, 1, 20);
        let snap = snapshot(vec![], vec![progress_log(future, 5, "a")]);
        assert_eq!(state(future, &Schedule::new(), &snap), DayState::PartialProgress);
    }

    #[test]
    fn test_chapter_attribution_prefers_logged_chapter() {
        let schedule = schedule_on(&[today()]);
        let snap = snapshot(vec![], vec![progress_log(today(), 2, "a")]);
        let info = day_info(today(), &schedule, &snap, today(), &PlannerConfig::default());
        assert_eq!(info.chapter_color.as_deref(), Some("#AAA"));
        assert_eq!(info.chapter_title.as_deref(), Some("Title a"));

        let snap = snapshot(vec![], vec![]);
        let info = day_info(today(), &schedule, &snap, today(), &PlannerConfig::default());
        assert_eq!(info.chapter_color.as_deref(), Some("#PLAN"));
        assert_eq!(info.chapter_title.as_deref(), Some("Title b"));

        let info = day_info(today(), &Schedule::new(), &snap, today(), &PlannerConfig::default());
        assert_eq!(info.chapter_color, None);
        assert_eq!(info.chapter_title, None);
    }

    #[test]
    fn test_free_day_logs_excluded_from_total() {
        let mut marker = DailyLog::free_day(today().and_hms_opt(6, 0, 0).unwrap());
        marker.pages_learned = 7;
        let snap = snapshot(vec![], vec![marker, progress_log(today(), 3, "a")]);
        let info = day_info(today(), &Schedule::new(), &snap, today(), &PlannerConfig::default());

        assert_eq!(info.state, DayState::FreeDay);
        assert_eq!(info.total_pages_logged, 3);
        assert_eq!(info.logs.len(), 2);
    }

    #[test]
    fn test_large_logged_totals_saturate() {
        let snap = snapshot(
            vec![],
            vec![progress_log(today(), i32::MAX, "a"), progress_log(today(), 5, "a")],
        );
        let info = day_info(today(), &Schedule::new(), &snap, today(), &PlannerConfig::default());

        assert_eq!(info.total_pages_logged, i32::MAX);
        assert_eq!(info.state, DayState::GoalAchieved);
    }

    #[test]
    fn test_default_goal_without_plan() {
        let snap = StudySnapshot {
            chapters: vec![],
            plan: None,
            logs: vec![progress_log(today(), 5, "a")],
        };
        let config = PlannerConfig {
            default_daily_goal: 20,
            ..PlannerConfig::default()
        };
        let info = day_info(today(), &Schedule::new(), &snap, today(), &config);

        assert_eq!(info.daily_goal, 20);
        assert_eq!(info.state, DayState::PartialProgress);
        assert_eq!(info.progress_percentage(), 0.25);
    }

    #[test]
    fn test_progress_percentage_caps_at_one() {
        let snap = snapshot(vec![], vec![progress_log(today(), 25, "a")]);
        let info = day_info(today(), &Schedule::new(), &snap, today(), &PlannerConfig::default());
        assert_eq!(info.progress_percentage(), 1.0);
    }

    #[test]
    fn test_month_grid() {
        let snap = snapshot(vec![1], vec![]);
        let infos = month_day_infos(
            2025,
            2,
            &Schedule::new(),
            &snap,
            today(),
            &PlannerConfig::default(),
        );
        assert_eq!(infos.len(), 28);
        assert_eq!(infos[0].date, d(2025, 2, 1));
        // 2025-02-02 is a Sunday
        assert_eq!(infos[1].state, DayState::FreeDay);
        assert_eq!(infos[2].state, DayState::NotScheduled);
    }
}
