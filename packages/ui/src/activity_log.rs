//! In-app history of record operations, shown by [`crate::ActivityLogPanel`].

use chrono::Local;
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn class(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

/// Record operation an entry is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    Chargement,
    Ajout,
    Recherche,
    Modification,
    Suppression,
}

impl Activity {
    pub fn label(self) -> &'static str {
        match self {
            Activity::Chargement => "Chargement",
            Activity::Ajout => "Ajout",
            Activity::Recherche => "Recherche",
            Activity::Modification => "Modification",
            Activity::Suppression => "Suppression",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub activity: Activity,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
    /// Show failed operations only.
    pub errors_only: bool,
}

impl ActivityLog {
    pub fn push(&mut self, activity: Activity, level: LogLevel, message: &str) {
        self.entries.push(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            activity,
            level,
            message: message.to_string(),
        });
    }

    pub fn error_count(&self) -> usize {
        self.count(LogLevel::Error)
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    /// Entries to display, newest first.
    pub fn visible_entries(&self) -> Vec<LogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| !self.errors_only || e.level == LogLevel::Error)
            .cloned()
            .collect()
    }

    /// One-line summary for the panel header, e.g. `2 réussies, 1 échouée`.
    pub fn summary(&self) -> String {
        let failed = self.error_count();
        let succeeded = self.count(LogLevel::Success);
        match failed {
            0 => format!("{succeeded} réussie(s)"),
            _ => format!("{succeeded} réussie(s), {failed} échouée(s)"),
        }
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

pub fn log_activity(
    log: &mut Signal<ActivityLog>,
    activity: Activity,
    level: LogLevel,
    message: &str,
) {
    log.write().push(activity, level, message);
}
