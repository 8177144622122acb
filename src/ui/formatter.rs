//! Pure formatting functions for UI output.
//!
//! `format_*` functions build strings and are unit tested. `display_*`
//! functions print them.

use console::style;

use crate::checker::{UpdateCheck, UpdateRecord, UpdateSettings};
use crate::domain::ParsedVersion;
use crate::notice::UpdateNotice;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Render every field of a parsed version, one per line.
pub fn format_parsed_version(parsed: &ParsedVersion) -> String {
    let strict = match parsed.to_semver() {
        Some(_) => "yes",
        None => "no",
    };
    [
        format!("raw:        {}", parsed.raw),
        format!("display:    {}", parsed.display),
        format!("major:      {}", or_dash(parsed.major)),
        format!("minor:      {}", or_dash(parsed.minor)),
        format!("patch:      {}", or_dash(parsed.patch)),
        format!("prerelease: {}", or_dash(parsed.prerelease.as_deref())),
        format!("build:      {}", or_dash(parsed.build_meta.as_deref())),
        format!("hash:       {}", or_dash(parsed.hash.as_deref())),
        format!("semver 2.0: {}", strict),
    ]
    .join("\n")
}

/// One history entry on a single line.
pub fn format_history_line(record: &UpdateRecord) -> String {
    let marker = if record.update_available { "*" } else { " " };
    format!(
        "{} {}  {} -> {} ({})",
        marker,
        record.checked_at.format("%Y-%m-%d %H:%M"),
        record.current,
        record.latest,
        record.update_type
    )
}

/// Render the persisted settings.
pub fn format_settings(settings: &UpdateSettings) -> String {
    [
        format!("auto check:    {}", settings.auto_check),
        format!("notifications: {}", settings.notifications),
        format!(
            "dismissed:     {}",
            or_dash(settings.dismissed_version.as_deref())
        ),
    ]
    .join("\n")
}

/// Display the notice of a check.
///
/// Actionable notices are highlighted; informational ones are dimmed.
pub fn display_notice(notice: &UpdateNotice) {
    match notice {
        UpdateNotice::Available { .. } | UpdateNotice::UnclassifiedUpdate { .. } => {
            println!("{} {}", style("⬆").green().bold(), style(notice).bold());
        }
        UpdateNotice::UnparsableVersion { .. } => {
            eprintln!("{} {}", style("⚠ WARNING:").yellow(), notice);
        }
        UpdateNotice::UpToDate { .. }
        | UpdateNotice::Dismissed { .. }
        | UpdateNotice::PrereleaseSkipped { .. } => {
            println!("{} {}", style("✓").green(), style(notice).dim());
        }
    }
}

/// Display the full outcome of a check.
pub fn display_check_result(result: &UpdateCheck) {
    display_notice(&result.notice);
    println!(
        "  current: {}  latest: {}  type: {}",
        style(&result.current.raw).red(),
        style(&result.latest.raw).green(),
        result.update_type
    );
    if result.update_available && !result.notify {
        println!("  {}", style("(notification suppressed)").dim());
    }
}

/// Display a parsed version.
pub fn display_parsed_version(parsed: &ParsedVersion) {
    println!("{}", format_parsed_version(parsed));
}

/// Display recorded checks, newest first.
pub fn display_history(records: &[UpdateRecord]) {
    if records.is_empty() {
        display_status("No update checks recorded");
        return;
    }
    println!("{}", style("Update check history:").bold());
    for record in records {
        println!("  {}", format_history_line(record));
    }
}

/// Display the persisted settings.
pub fn display_settings(settings: &UpdateSettings) {
    println!("{}", style("Update settings:").bold());
    for line in format_settings(settings).lines() {
        println!("  {}", line);
    }
}
