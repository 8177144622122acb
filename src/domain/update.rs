use crate::error::{Result, UpdateNotifierError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse magnitude of the change between two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    Major,
    Minor,
    Patch,
    #[default]
    None,
}

impl UpdateType {
    /// Lowercase name, as persisted and printed
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Major => "major",
            UpdateType::Minor => "minor",
            UpdateType::Patch => "patch",
            UpdateType::None => "none",
        }
    }

    /// Whether this classification calls for any action
    pub fn is_actionable(&self) -> bool {
        !matches!(self, UpdateType::None)
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateType {
    type Err = UpdateNotifierError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(UpdateType::Major),
            "minor" => Ok(UpdateType::Minor),
            "patch" => Ok(UpdateType::Patch),
            "none" => Ok(UpdateType::None),
            other => Err(UpdateNotifierError::settings(format!(
                "Unknown update type: '{}'",
                other
            ))),
        }
    }
}
