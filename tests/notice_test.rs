use update_notifier::notice::UpdateNotice;
use update_notifier::ui;
use update_notifier::UpdateType;

// ============================================================================
// UpdateNotice Display Tests
// ============================================================================

#[test]
fn test_notice_unclassified_display() {
    let notice = UpdateNotice::UnclassifiedUpdate {
        current: "1.0.0-beta".to_string(),
        latest: "1.0.0".to_string(),
    };

    let display_msg = notice.to_string();
    assert!(
        display_msg.contains("newer version"),
        "Message should mention a newer version, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("1.0.0-beta -> 1.0.0"),
        "Message should show both versions, got: {}",
        display_msg
    );
}

#[test]
fn test_notice_unparsable_display() {
    let notice = UpdateNotice::UnparsableVersion {
        version: "nightly".to_string(),
    };
    assert_eq!(notice.to_string(), "Cannot parse version 'nightly'");
}

#[test]
fn test_notice_up_to_date_display() {
    let notice = UpdateNotice::UpToDate {
        current: "3.2.1".to_string(),
    };
    assert_eq!(notice.to_string(), "Version 3.2.1 is up to date");
}

#[test]
fn test_notice_prerelease_skipped_display() {
    let notice = UpdateNotice::PrereleaseSkipped {
        current: "1.0.0".to_string(),
        latest: "2.0.0-rc.1".to_string(),
    };
    assert_eq!(
        notice.to_string(),
        "Version 1.0.0 is the latest release; prerelease 2.0.0-rc.1 is not reported"
    );
    assert!(!notice.is_actionable());
}

#[test]
fn test_notice_dismissed_display() {
    let notice = UpdateNotice::Dismissed {
        latest: "4.0.0".to_string(),
    };
    assert!(notice.to_string().contains("4.0.0"));
    assert!(notice.to_string().contains("dismissed"));
}

#[test]
fn test_notice_clone_and_equality() {
    let notice = UpdateNotice::Available {
        current: "1.0.0".to_string(),
        latest: "1.0.1".to_string(),
        update_type: UpdateType::Patch,
    };
    assert_eq!(notice.clone(), notice);
}

#[test]
fn test_notice_json_round_trip() {
    let notice = UpdateNotice::Available {
        current: "1.0.0".to_string(),
        latest: "2.0.0".to_string(),
        update_type: UpdateType::Major,
    };
    let json = serde_json::to_value(&notice).unwrap();
    assert_eq!(json["kind"], "available");
    assert_eq!(json["update_type"], "major");

    let back: UpdateNotice = serde_json::from_value(json).unwrap();
    assert_eq!(back, notice);
}

// ============================================================================
// UI Display Function Tests
// ============================================================================

#[test]
fn test_display_notice_all_variants() {
    let notices = vec![
        UpdateNotice::Available {
            current: "1.0.0".to_string(),
            latest: "2.0.0".to_string(),
            update_type: UpdateType::Major,
        },
        UpdateNotice::UnclassifiedUpdate {
            current: "1.0.0-rc".to_string(),
            latest: "1.0.0".to_string(),
        },
        UpdateNotice::UnparsableVersion {
            version: "x".to_string(),
        },
        UpdateNotice::UpToDate {
            current: "1.0.0".to_string(),
        },
        UpdateNotice::Dismissed {
            latest: "2.0.0".to_string(),
        },
        UpdateNotice::PrereleaseSkipped {
            current: "1.0.0".to_string(),
            latest: "1.1.0-beta".to_string(),
        },
    ];

    // Should not panic for any variant
    for notice in &notices {
        ui::display_notice(notice);
    }
}
