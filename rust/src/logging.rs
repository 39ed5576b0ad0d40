//! Planner trace output on stderr, gated by `PlannerConfig::verbosity`.
//!
//! Levels:
//! - 0: quiet
//! - 1: schedule changes (day assignments, progress writes, free-day toggles)
//! - 2: day checks (why a day was skipped)
//! - 3: queue and session internals

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Whether a message at `level` is printed under `verbosity`.
pub fn enabled(verbosity: u8, level: u8) -> bool {
    level > VERBOSITY_SILENT && verbosity >= level
}

#[doc(hidden)]
#[macro_export]
macro_rules! planner_log {
    ($level:expr, $verbosity:expr, $($arg:tt)*) => {
        if $crate::logging::enabled($verbosity, $level) {
            eprintln!("[studyplan] {}", format_args!($($arg)*));
        }
    };
}

/// A day was assigned or stored data changed.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::planner_log!($crate::logging::VERBOSITY_CHANGES, $verbosity, $($arg)*)
    };
}

/// A day was examined and skipped.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::planner_log!($crate::logging::VERBOSITY_CHECKS, $verbosity, $($arg)*)
    };
}

/// Queue sizes, refresh counts and similar internals.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::planner_log!($crate::logging::VERBOSITY_DEBUG, $verbosity, $($arg)*)
    };
}
