//! In-app activity log: a user-visible trail of what the client did and
//! what failed, next to the `tracing` output meant for developers.

use api::ApiError;
use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
}

impl ActivityLog {
    pub fn push(&mut self, level: LogLevel, message: &str) {
        self.entries.push(LogEntry {
            timestamp: current_time(),
            level,
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Error)
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    log.write().push(level, message);
}

/// Record a failed call and return the short string to show the user.
///
/// Validation failures are the user's to fix and are logged as warnings;
/// everything else is an error.
pub fn report_error(log: &mut Signal<ActivityLog>, err: &ApiError, fallback: &str) -> String {
    let message = err.user_message(fallback);
    match err {
        ApiError::Validation { .. } => {
            tracing::warn!("{}: {}", fallback, err);
            log_activity(log, LogLevel::Warning, &message);
        }
        _ => {
            tracing::error!("{}: {}", fallback, err);
            log_activity(log, LogLevel::Error, &format!("{fallback}: {err}"));
        }
    }
    message
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
