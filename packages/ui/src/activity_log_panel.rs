use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogEntry, LogLevel};

fn entry_class(level: &LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "activity-log-entry error",
        LogLevel::Warning => "activity-log-entry warning",
        LogLevel::Success => "activity-log-entry success",
        LogLevel::Info => "activity-log-entry info",
    }
}

/// Floating panel listing recent activity, newest first.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();
    let mut errors_only = use_signal(|| false);

    if !log().visible {
        return rsx! {};
    }

    let entries: Vec<LogEntry> = log()
        .entries
        .into_iter()
        .rev()
        .filter(|e| !errors_only() || e.level == LogLevel::Error)
        .collect();

    rsx! {
        aside {
            class: "activity-log-panel",
            header {
                class: "activity-log-header",
                span { "Activity" }
                label {
                    input {
                        r#type: "checkbox",
                        checked: errors_only(),
                        onchange: move |_| errors_only.set(!errors_only()),
                    }
                    " Errors only"
                }
                button {
                    onclick: move |_| log.write().entries.clear(),
                    "Clear"
                }
                button {
                    onclick: move |_| log.write().visible = false,
                    "Close"
                }
            }
            ul {
                class: "activity-log-entries",
                for entry in entries {
                    li {
                        class: entry_class(&entry.level),
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        " {entry.message}"
                    }
                }
                if log().entries.is_empty() {
                    li { class: "activity-log-entry info", "Nothing yet." }
                }
            }
        }
    }
}

/// Corner button showing the entry count; red when something failed.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let snapshot = log();
    let count = snapshot.entries.len();

    rsx! {
        button {
            class: if snapshot.has_errors() { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            title: "Activity log",
            onclick: move |_| {
                let mut log = log.write();
                log.visible = !log.visible;
            },
            if count > 0 { "Log ({count})" } else { "Log" }
        }
    }
}
