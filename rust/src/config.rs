//! Configuration types for the study planner.

use pyo3::prelude::*;

/// Upper bound on the number of calendar days a single scheduling run walks.
///
/// A plan whose every day ends up free (or a queue that never drains) stops
/// here instead of looping forever.
pub const MAX_SCHEDULE_DAYS: u32 = 365;

/// Daily goal used for calendar display when no plan exists.
pub const DEFAULT_DAILY_GOAL: i32 = 10;

/// Configuration for schedule computation and derived views.
#[pyclass]
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    /// Maximum number of days the scheduler iterates over
    #[pyo3(get, set)]
    pub max_horizon_days: u32,
    /// Daily goal for day-info derivation when there is no plan
    #[pyo3(get, set)]
    pub default_daily_goal: i32,
    /// Logging verbosity (0 = silent, 3 = debug)
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Number of days covered by the activity heatmap
    #[pyo3(get, set)]
    pub heatmap_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_horizon_days: MAX_SCHEDULE_DAYS,
            default_daily_goal: DEFAULT_DAILY_GOAL,
            verbosity: 0,
            heatmap_days: 90,
        }
    }
}

#[pymethods]
impl PlannerConfig {
    #[new]
    #[pyo3(signature = (
        max_horizon_days=None,
        default_daily_goal=None,
        verbosity=None,
        heatmap_days=None
    ))]
    fn new(
        max_horizon_days: Option<u32>,
        default_daily_goal: Option<i32>,
        verbosity: Option<u8>,
        heatmap_days: Option<u32>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            max_horizon_days: max_horizon_days.unwrap_or(defaults.max_horizon_days),
            default_daily_goal: default_daily_goal.unwrap_or(defaults.default_daily_goal),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            heatmap_days: heatmap_days.unwrap_or(defaults.heatmap_days),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PlannerConfig(max_horizon_days={}, default_daily_goal={}, verbosity={})",
            self.max_horizon_days, self.default_daily_goal, self.verbosity
        )
    }
}
