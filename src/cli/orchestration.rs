//! Check workflow orchestration
//!
//! Keeps the check flow out of main.rs so it can be driven programmatically
//! without depending on clap.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::checker::{UpdateCheck, VersionChecker};
use crate::config::Config;
use crate::storage::{FileStorage, Storage};

/// Arguments for the check workflow
#[derive(Debug, Clone, PartialEq)]
pub struct CheckWorkflowArgs {
    /// Latest available version, as obtained by the caller
    pub latest: String,

    /// Overrides the configured current version
    pub current: Option<String>,

    /// Check even when the schedule says it is not due
    pub force: bool,
}

/// Result of a check workflow run
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// A check ran
    Checked(UpdateCheck),
    /// The schedule was not due and `force` was not set
    Skipped { last_checked: Option<DateTime<Utc>> },
}

/// Open the configured state file
pub fn open_storage(config: &Config, override_path: Option<PathBuf>) -> Result<FileStorage> {
    let path = override_path
        .or_else(|| config.storage_path())
        .context("No storage path configured and no data directory available")?;
    Ok(FileStorage::open(path))
}

/// Build a checker from configuration, applying a current-version override
pub fn build_checker<S: Storage>(
    config: &Config,
    current: Option<String>,
    storage: S,
) -> Result<VersionChecker<S>> {
    let mut checker_config = config.checker_config()?;
    if let Some(current) = current {
        checker_config.current_version = current;
    }
    Ok(VersionChecker::new(checker_config, storage))
}

/// Main check workflow
///
/// 1. Build a checker from the config and the given storage
/// 2. Consult the schedule unless `force` is set
/// 3. Run and record the check
pub fn run_check_workflow<S: Storage>(
    args: CheckWorkflowArgs,
    config: &Config,
    storage: S,
    now: DateTime<Utc>,
) -> Result<WorkflowResult> {
    let checker = build_checker(config, args.current, storage)?;

    if !args.force && !checker.should_check(now)? {
        let last_checked = checker.last_checked()?;
        info!(?last_checked, "update check not due");
        return Ok(WorkflowResult::Skipped { last_checked });
    }

    let result = checker
        .check(&args.latest, now)
        .with_context(|| format!("Failed to record check against '{}'", args.latest))?;
    Ok(WorkflowResult::Checked(result))
}
