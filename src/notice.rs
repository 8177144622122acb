use crate::domain::UpdateType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-facing outcome of an update check.
/// Non-actionable variants are informational and never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateNotice {
    /// A newer version is available and classified
    Available {
        current: String,
        latest: String,
        update_type: UpdateType,
    },
    /// The latest version orders after the current one, but the change
    /// cannot be classified (for example a prerelease-only difference)
    UnclassifiedUpdate { current: String, latest: String },
    /// A newer prerelease exists but prereleases are not reported
    PrereleaseSkipped { current: String, latest: String },
    /// A version could not be read as `MAJOR.MINOR.PATCH`
    UnparsableVersion { version: String },
    /// Nothing newer is available
    UpToDate { current: String },
    /// The user already dismissed this version
    Dismissed { latest: String },
}

impl UpdateNotice {
    /// Whether this notice should be surfaced to the user
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            UpdateNotice::Available { .. } | UpdateNotice::UnclassifiedUpdate { .. }
        )
    }
}

impl fmt::Display for UpdateNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateNotice::Available {
                current,
                latest,
                update_type,
            } => write!(
                f,
                "A {} update is available: {} -> {}",
                update_type, current, latest
            ),
            UpdateNotice::UnclassifiedUpdate { current, latest } => {
                write!(f, "A newer version is available: {} -> {}", current, latest)
            }
            UpdateNotice::PrereleaseSkipped { current, latest } => write!(
                f,
                "Version {} is the latest release; prerelease {} is not reported",
                current, latest
            ),
            UpdateNotice::UnparsableVersion { version } => {
                write!(f, "Cannot parse version '{}'", version)
            }
            UpdateNotice::UpToDate { current } => {
                write!(f, "Version {} is up to date", current)
            }
            UpdateNotice::Dismissed { latest } => {
                write!(f, "Update to {} was dismissed", latest)
            }
        }
    }
}
