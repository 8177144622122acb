//! Persisted state of the update checker

use crate::domain::UpdateType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage key for [UpdateSettings]
pub const SETTINGS_KEY: &str = "update-notifier.settings";
/// Storage key for the RFC 3339 timestamp of the last check
pub const LAST_CHECKED_KEY: &str = "update-notifier.last-checked";
/// Storage key for the list of [UpdateRecord]s
pub const HISTORY_KEY: &str = "update-notifier.history";

fn enabled() -> bool {
    true
}

/// User-controlled settings, persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettings {
    /// Whether scheduled checks run at all
    #[serde(default = "enabled")]
    pub auto_check: bool,

    /// Whether actionable results should notify the user
    #[serde(default = "enabled")]
    pub notifications: bool,

    /// Latest version the user chose to ignore
    #[serde(default)]
    pub dismissed_version: Option<String>,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        UpdateSettings {
            auto_check: true,
            notifications: true,
            dismissed_version: None,
        }
    }
}

/// One completed check, newest first in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    pub checked_at: DateTime<Utc>,
    pub current: String,
    pub latest: String,
    pub update_type: UpdateType,
    pub update_available: bool,
}
