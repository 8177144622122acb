use crate::checker::state::{
    UpdateRecord, UpdateSettings, HISTORY_KEY, LAST_CHECKED_KEY, SETTINGS_KEY,
};
use crate::compare::{needs_update, update_type};
use crate::domain::{parse_version, ParsedVersion, UpdateType};
use crate::error::Result;
use crate::notice::UpdateNotice;
use crate::storage::Storage;
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Configuration for a [VersionChecker], supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerConfig {
    /// Version of the running application
    pub current_version: String,
    /// Minimum time between scheduled checks
    pub check_interval: Duration,
    /// Report prerelease versions as available updates
    pub include_prereleases: bool,
    /// Maximum number of history records kept
    pub history_limit: usize,
}

impl CheckerConfig {
    /// Create a config for `current_version` with a daily interval
    pub fn new(current_version: impl Into<String>) -> Self {
        CheckerConfig {
            current_version: current_version.into(),
            check_interval: Duration::hours(24),
            include_prereleases: false,
            history_limit: 20,
        }
    }

    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    pub fn with_prereleases(mut self, include: bool) -> Self {
        self.include_prereleases = include;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

/// Result of a single update check
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCheck {
    pub current: ParsedVersion,
    pub latest: ParsedVersion,
    /// The latest version orders after the current one and is not filtered out
    pub update_available: bool,
    /// Strict classification; may be `None` even when an update is available
    pub update_type: UpdateType,
    /// Whether the user should be notified
    pub notify: bool,
    pub notice: UpdateNotice,
    pub checked_at: DateTime<Utc>,
}

/// Decides when to check for updates and records the outcome
///
/// All persistent state goes through the injected [Storage]. Time is passed
/// in by the caller so schedules are deterministic under test.
pub struct VersionChecker<S: Storage> {
    config: CheckerConfig,
    storage: S,
}

impl<S: Storage> VersionChecker<S> {
    /// Create a new checker
    pub fn new(config: CheckerConfig, storage: S) -> Self {
        VersionChecker { config, storage }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read a JSON value, treating corrupt data as absent
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.storage.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "ignoring corrupt stored value");
                Ok(None)
            }
        }
    }

    /// Current settings, or defaults if none were saved
    pub fn settings(&self) -> Result<UpdateSettings> {
        Ok(self.load_json(SETTINGS_KEY)?.unwrap_or_default())
    }

    pub fn save_settings(&self, settings: &UpdateSettings) -> Result<()> {
        self.storage
            .set(SETTINGS_KEY, &serde_json::to_string(settings)?)
    }

    /// Time of the last completed check
    pub fn last_checked(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.storage.get(LAST_CHECKED_KEY)? else {
            return Ok(None);
        };
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(ts) => Ok(Some(ts.with_timezone(&Utc))),
            Err(e) => {
                warn!(key = LAST_CHECKED_KEY, error = %e, "ignoring corrupt timestamp");
                Ok(None)
            }
        }
    }

    /// Whether a scheduled check is due at `now`
    ///
    /// A timestamp in the future counts as stale so a skewed clock cannot
    /// suppress checks indefinitely.
    pub fn should_check(&self, now: DateTime<Utc>) -> Result<bool> {
        if !self.settings()?.auto_check {
            debug!("auto check disabled");
            return Ok(false);
        }

        let due = match self.last_checked()? {
            None => true,
            Some(last) if last > now => true,
            Some(last) => now - last >= self.config.check_interval,
        };
        debug!(due, "evaluated check schedule");
        Ok(due)
    }

    /// Evaluate `latest` against the current version without touching storage
    pub fn evaluate(
        &self,
        latest: &str,
        settings: &UpdateSettings,
        now: DateTime<Utc>,
    ) -> UpdateCheck {
        let current_raw = self.config.current_version.as_str();
        let current = parse_version(current_raw);
        let latest_parsed = parse_version(latest);

        let newer = needs_update(current_raw, latest);
        let filtered = newer && !self.config.include_prereleases && latest_parsed.is_prerelease();
        let update_available = newer && !filtered;
        let kind = update_type(current_raw, latest);

        let notice = if update_available {
            if settings.dismissed_version.as_deref() == Some(latest) {
                UpdateNotice::Dismissed {
                    latest: latest.to_string(),
                }
            } else if kind.is_actionable() {
                UpdateNotice::Available {
                    current: current_raw.to_string(),
                    latest: latest.to_string(),
                    update_type: kind,
                }
            } else {
                UpdateNotice::UnclassifiedUpdate {
                    current: current_raw.to_string(),
                    latest: latest.to_string(),
                }
            }
        } else if filtered {
            UpdateNotice::PrereleaseSkipped {
                current: current_raw.to_string(),
                latest: latest.to_string(),
            }
        } else if !current.is_parsed() {
            UpdateNotice::UnparsableVersion {
                version: current_raw.to_string(),
            }
        } else if !latest_parsed.is_parsed() {
            UpdateNotice::UnparsableVersion {
                version: latest.to_string(),
            }
        } else {
            UpdateNotice::UpToDate {
                current: current_raw.to_string(),
            }
        };

        let notify = settings.notifications && notice.is_actionable();

        debug!(
            current = current_raw,
            latest,
            newer,
            filtered,
            update_type = %kind,
            notify,
            "evaluated update"
        );

        UpdateCheck {
            current,
            latest: latest_parsed,
            update_available,
            update_type: kind,
            notify,
            notice,
            checked_at: now,
        }
    }

    /// Run a check against `latest`, then record it
    pub fn check(&self, latest: &str, now: DateTime<Utc>) -> Result<UpdateCheck> {
        let settings = self.settings()?;
        let result = self.evaluate(latest, &settings, now);

        self.storage.set(LAST_CHECKED_KEY, &now.to_rfc3339())?;
        self.record(UpdateRecord {
            checked_at: now,
            current: self.config.current_version.clone(),
            latest: latest.to_string(),
            update_type: result.update_type,
            update_available: result.update_available,
        })?;

        Ok(result)
    }

    /// Run [check](Self::check) only if [should_check](Self::should_check) says so
    pub fn check_if_due(&self, latest: &str, now: DateTime<Utc>) -> Result<Option<UpdateCheck>> {
        if self.should_check(now)? {
            self.check(latest, now).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Stop notifying about `version`
    pub fn dismiss(&self, version: &str) -> Result<()> {
        let mut settings = self.settings()?;
        settings.dismissed_version = Some(version.to_string());
        self.save_settings(&settings)
    }

    /// Recorded checks, newest first
    pub fn history(&self) -> Result<Vec<UpdateRecord>> {
        Ok(self.load_json(HISTORY_KEY)?.unwrap_or_default())
    }

    pub fn clear_history(&self) -> Result<()> {
        self.storage.remove(HISTORY_KEY)
    }

    /// Forget settings, schedule and history
    pub fn reset(&self) -> Result<()> {
        for key in [SETTINGS_KEY, LAST_CHECKED_KEY, HISTORY_KEY] {
            self.storage.remove(key)?;
        }
        Ok(())
    }

    fn record(&self, record: UpdateRecord) -> Result<()> {
        if self.config.history_limit == 0 {
            return self.clear_history();
        }

        let mut history = self.history()?;
        history.insert(0, record);
        history.truncate(self.config.history_limit);
        self.storage
            .set(HISTORY_KEY, &serde_json::to_string(&history)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn at(ts: &str) -> DateTime<Utc> {
        ts.parse().unwrap()
    }

    fn checker(current: &str) -> VersionChecker<MemoryStorage> {
        VersionChecker::new(CheckerConfig::new(current), MemoryStorage::new())
    }

    #[test]
    fn test_first_check_is_due() {
        let checker = checker("1.0.0");
        assert!(checker.should_check(at("2024-01-01T00:00:00Z")).unwrap());
    }

    #[test]
    fn test_check_respects_interval() {
        let checker = checker("1.0.0");
        checker.check("1.0.0", at("2024-01-01T00:00:00Z")).unwrap();

        assert!(!checker.should_check(at("2024-01-01T23:59:59Z")).unwrap());
        assert!(checker.should_check(at("2024-01-02T00:00:00Z")).unwrap());
    }

    #[test]
    fn test_future_timestamp_is_stale() {
        let checker = checker("1.0.0");
        checker.check("1.0.0", at("2030-01-01T00:00:00Z")).unwrap();
        assert!(checker.should_check(at("2024-01-01T00:00:00Z")).unwrap());
    }

    #[test]
    fn test_auto_check_disabled() {
        let checker = checker("1.0.0");
        checker
            .save_settings(&UpdateSettings {
                auto_check: false,
                ..Default::default()
            })
            .unwrap();
        assert!(!checker.should_check(at("2024-01-01T00:00:00Z")).unwrap());
        assert!(checker
            .check_if_due("2.0.0", at("2024-01-01T00:00:00Z"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_check_available() {
        let checker = checker("1.0.0");
        let result = checker.check("1.1.0", at("2024-01-01T00:00:00Z")).unwrap();

        assert!(result.update_available);
        assert_eq!(result.update_type, UpdateType::Minor);
        assert!(result.notify);
        assert!(matches!(result.notice, UpdateNotice::Available { .. }));
        assert_eq!(result.latest.triple(), Some((1, 1, 0)));
    }

    #[test]
    fn test_check_up_to_date() {
        let checker = checker("1.1.0");
        let result = checker.check("1.0.0", at("2024-01-01T00:00:00Z")).unwrap();
        assert!(!result.update_available);
        assert!(!result.notify);
        assert_eq!(
            result.notice,
            UpdateNotice::UpToDate {
                current: "1.1.0".to_string()
            }
        );
    }

    #[test]
    fn test_prerelease_only_difference_is_unclassified() {
        let checker = checker("1.0.0-beta");
        let result = checker.check("1.0.0", at("2024-01-01T00:00:00Z")).unwrap();
        assert!(result.update_available);
        assert_eq!(result.update_type, UpdateType::None);
        assert!(matches!(
            result.notice,
            UpdateNotice::UnclassifiedUpdate { .. }
        ));
        assert!(result.notify);
    }

    #[test]
    fn test_prerelease_latest_filtered_by_default() {
        let checker = checker("1.0.0");
        let result = checker
            .check("2.0.0-rc.1", at("2024-01-01T00:00:00Z"))
            .unwrap();
        assert!(!result.update_available);
        assert!(!result.notify);
        assert_eq!(
            result.notice,
            UpdateNotice::PrereleaseSkipped {
                current: "1.0.0".to_string(),
                latest: "2.0.0-rc.1".to_string(),
            }
        );
        // Classification is still reported
        assert_eq!(result.update_type, UpdateType::Major);
    }

    #[test]
    fn test_prerelease_latest_included_when_configured() {
        let checker = VersionChecker::new(
            CheckerConfig::new("1.0.0").with_prereleases(true),
            MemoryStorage::new(),
        );
        let result = checker
            .check("2.0.0-rc.1", at("2024-01-01T00:00:00Z"))
            .unwrap();
        assert!(result.update_available);
        assert!(result.notify);
    }

    #[test]
    fn test_dismissed_version_does_not_notify() {
        let checker = checker("1.0.0");
        checker.dismiss("2.0.0").unwrap();

        let result = checker.check("2.0.0", at("2024-01-01T00:00:00Z")).unwrap();
        assert!(result.update_available);
        assert!(!result.notify);
        assert_eq!(
            result.notice,
            UpdateNotice::Dismissed {
                latest: "2.0.0".to_string()
            }
        );

        // A newer release than the dismissed one notifies again
        let result = checker.check("2.0.1", at("2024-01-03T00:00:00Z")).unwrap();
        assert!(result.notify);
    }

    #[test]
    fn test_notifications_disabled() {
        let checker = checker("1.0.0");
        checker
            .save_settings(&UpdateSettings {
                notifications: false,
                ..Default::default()
            })
            .unwrap();
        let result = checker.check("2.0.0", at("2024-01-01T00:00:00Z")).unwrap();
        assert!(result.update_available);
        assert!(!result.notify);
    }

    #[test]
    fn test_unparsable_current() {
        let checker = checker("nightly");
        let result = checker.check("1.0.0", at("2024-01-01T00:00:00Z")).unwrap();
        assert_eq!(
            result.notice,
            UpdateNotice::UnparsableVersion {
                version: "nightly".to_string()
            }
        );
        assert!(!result.notify);
    }

    #[test]
    fn test_history_newest_first_and_limited() {
        let checker = VersionChecker::new(
            CheckerConfig::new("1.0.0").with_history_limit(2),
            MemoryStorage::new(),
        );
        checker.check("1.0.1", at("2024-01-01T00:00:00Z")).unwrap();
        checker.check("1.0.2", at("2024-01-02T00:00:00Z")).unwrap();
        checker.check("1.0.3", at("2024-01-03T00:00:00Z")).unwrap();

        let history = checker.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].latest, "1.0.3");
        assert_eq!(history[1].latest, "1.0.2");
        assert_eq!(history[0].update_type, UpdateType::Patch);
    }

    #[test]
    fn test_history_disabled() {
        let checker = VersionChecker::new(
            CheckerConfig::new("1.0.0").with_history_limit(0),
            MemoryStorage::new(),
        );
        checker.check("1.0.1", at("2024-01-01T00:00:00Z")).unwrap();
        assert!(checker.history().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_state_falls_back() {
        let storage = MemoryStorage::with_entries([
            (SETTINGS_KEY, "{broken"),
            (HISTORY_KEY, "not a list"),
            (LAST_CHECKED_KEY, "yesterday"),
        ]);
        let checker = VersionChecker::new(CheckerConfig::new("1.0.0"), storage);

        assert_eq!(checker.settings().unwrap(), UpdateSettings::default());
        assert!(checker.history().unwrap().is_empty());
        assert_eq!(checker.last_checked().unwrap(), None);

        // The next check overwrites the corrupt entries
        checker.check("1.0.1", at("2024-01-01T00:00:00Z")).unwrap();
        assert_eq!(checker.history().unwrap().len(), 1);
        assert_eq!(
            checker.last_checked().unwrap(),
            Some(at("2024-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let checker = checker("1.0.0");
        checker.dismiss("1.1.0").unwrap();
        checker.check("1.1.0", at("2024-01-01T00:00:00Z")).unwrap();

        checker.reset().unwrap();
        assert!(checker.storage().is_empty());
    }
}
