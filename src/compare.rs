//! Version ordering and update classification.
//!
//! Two independent views of a version pair live here:
//!
//! - [`compare_versions`] is a loose, syntactic ordering. It splits on the
//!   first hyphen and on dots, and accepts any number of components.
//! - [`update_type`] uses the strict parser from [`crate::domain`] and looks
//!   only at major, minor and patch.
//!
//! They are not interchangeable. A pair differing only by prerelease tag is
//! "newer" for [`needs_update`] but classified [`UpdateType::None`].

use std::cmp::Ordering;

use crate::domain::{parse_version, UpdateType};

/// Split a version into its main part and an optional prerelease part.
///
/// Strips a single leading lowercase `v` and splits on the first `-`. An
/// empty suffix counts as no prerelease.
fn split_version(version: &str) -> (&str, Option<&str>) {
    let version = version.strip_prefix('v').unwrap_or(version);
    match version.split_once('-') {
        Some((main, pre)) if !pre.is_empty() => (main, Some(pre)),
        Some((main, _)) => (main, None),
        None => (version, None),
    }
}

/// Numeric value of one dot-separated component.
///
/// Blank components count as zero. Anything other than a run of decimal
/// digits, optionally preceded by `+`, is NaN, which compares neither less
/// nor greater than any value.
fn component_value(component: &str) -> f64 {
    let trimmed = component.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Compare two version strings, returning `-1`, `0` or `1`.
///
/// Components are compared left to right with missing trailing components
/// treated as `0`. When every component is equal, a version carrying a
/// prerelease sorts before one without, and two prereleases compare as
/// plain strings.
///
/// Never fails: a non-numeric component is skipped as equal at its position.
///
/// # Example
/// ```
/// use update_notifier::compare::compare_versions;
///
/// assert_eq!(compare_versions("1.0.0", "1.0.1"), -1);
/// assert_eq!(compare_versions("v2.0.0", "1.9.9"), 1);
/// assert_eq!(compare_versions("1.2", "1.2.0"), 0);
/// assert_eq!(compare_versions("1.0.0-beta", "1.0.0"), -1);
/// ```
pub fn compare_versions(v1: &str, v2: &str) -> i32 {
    match version_ordering(v1, v2) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// [`compare_versions`] as an [`Ordering`], for use with `sort_by`.
pub fn version_ordering(v1: &str, v2: &str) -> Ordering {
    let (main1, pre1) = split_version(v1);
    let (main2, pre2) = split_version(v2);

    let parts1: Vec<f64> = main1.split('.').map(component_value).collect();
    let parts2: Vec<f64> = main2.split('.').map(component_value).collect();

    for i in 0..parts1.len().max(parts2.len()) {
        let a = parts1.get(i).copied().unwrap_or(0.0);
        let b = parts2.get(i).copied().unwrap_or(0.0);
        match a.partial_cmp(&b) {
            Some(Ordering::Less) => return Ordering::Less,
            Some(Ordering::Greater) => return Ordering::Greater,
            // Equal, or NaN on either side
            _ => {}
        }
    }

    match (pre1, pre2) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Whether `latest` is newer than `current` under [`compare_versions`].
pub fn needs_update(current: &str, latest: &str) -> bool {
    compare_versions(current, latest) < 0
}

/// Classify the update from `current` to `latest`.
///
/// Returns [`UpdateType::None`] when either side is not a
/// `MAJOR.MINOR.PATCH` version. Prerelease and build metadata are ignored.
///
/// # Example
/// ```
/// use update_notifier::compare::update_type;
/// use update_notifier::domain::UpdateType;
///
/// assert_eq!(update_type("1.0.0", "2.0.0"), UpdateType::Major);
/// assert_eq!(update_type("not-a-version", "1.0.0"), UpdateType::None);
/// ```
pub fn update_type(current: &str, latest: &str) -> UpdateType {
    let current = parse_version(current);
    let latest = parse_version(latest);

    let (Some((cur_major, cur_minor, cur_patch)), Some((new_major, new_minor, new_patch))) =
        (current.triple(), latest.triple())
    else {
        return UpdateType::None;
    };

    if new_major > cur_major {
        UpdateType::Major
    } else if new_minor > cur_minor {
        UpdateType::Minor
    } else if new_patch > cur_patch {
        UpdateType::Patch
    } else {
        UpdateType::None
    }
}
