//! Integration tests for calendar export through the application service.

use chrono::{DateTime, Duration, TimeZone, Utc};
use indoc::indoc;
use jubarte_core::{
    App, Config, CoreError, DuplicateTitlePolicy, EmptyExportPolicy, ExportError, FileStore,
    FixedHorizonScheduler, FixedReview, IcsExporter, MemoryStore, ReviewRecord, Store,
};
use tempfile::TempDir;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 3, 7, 45, 0).unwrap()
}

/// Unfold continuation lines and blank out the random part of each UID.
fn stable_lines(doc: &str) -> Vec<String> {
    doc.replace("\r\n ", "")
        .split("\r\n")
        .map(|line| match line.strip_prefix("UID:") {
            Some(uid) => {
                let item_id = &uid[..36];
                assert!(uid.ends_with("@jubarte"), "unexpected UID {uid}");
                format!("UID:{item_id}-<random>@jubarte")
            }
            None => line.to_string(),
        })
        .collect()
}

#[test]
fn test_fixed_plan_exports_full_document() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("data.json")).unwrap();
    let mut app = App::new(
        store,
        Box::new(FixedHorizonScheduler::with_offsets(&[1, 3])),
        IcsExporter::new(),
        DuplicateTitlePolicy::Reject,
    );
    let item = app
        .add_item("Neuroscience basics", "Read chapter 1, take notes; review", t0())
        .unwrap();

    let out = dir.path().join("calendar").join("reviews.ics");
    let summary = app.export_ics(&out, t0()).unwrap();
    assert!(summary.written);
    assert_eq!(summary.events, 2);

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.ends_with("END:VCALENDAR\r\n"));
    assert!(!content.replace("\r\n", "").contains('\n'), "bare LF in output");

    let expected = indoc! {"
        BEGIN:VCALENDAR
        VERSION:2.0
        PRODID:-//jubarte//EN
        BEGIN:VEVENT
        UID:{id}-<random>@jubarte
        DTSTAMP:20251103T074500Z
        DTSTART:20251104T074500Z
        SUMMARY:Review: Neuroscience basics
        DESCRIPTION:Read chapter 1\\, take notes\\; review
        END:VEVENT
        BEGIN:VEVENT
        UID:{id}-<random>@jubarte
        DTSTAMP:20251103T074500Z
        DTSTART:20251106T074500Z
        SUMMARY:Review: Neuroscience basics
        DESCRIPTION:Read chapter 1\\, take notes\\; review
        END:VEVENT
        END:VCALENDAR
    "}
    .replace("{id}", &item.id);
    let expected: Vec<String> = expected.split('\n').map(str::to_string).collect();

    assert_eq!(stable_lines(&content), expected);
}

#[test]
fn test_earliest_review_is_day_after_creation() {
    let mut app = App::from_config(MemoryStore::new(), &Config::default());
    let item = app.add_item("Neuroscience basics", "", t0()).unwrap();

    let reviews = app.store().load_reviews().unwrap();
    assert_eq!(reviews.len(), 10);
    let earliest = reviews.iter().filter_map(ReviewRecord::scheduled_at).min().unwrap();
    assert_eq!(earliest, t0() + Duration::days(1));
    assert!(reviews.iter().all(|r| r.item_id() == item.id));
}

#[test]
fn test_missing_date_keeps_previous_calendar() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reviews.ics");
    std::fs::write(&out, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();

    let mut store = MemoryStore::new();
    store
        .save_review(&ReviewRecord::Fixed(FixedReview {
            item_id: "dateless".to_string(),
            review_date: None,
        }))
        .unwrap();
    let app = App::from_config(store, &Config::default());

    let err = app.export_ics(&out, t0()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Export(ExportError::MissingDate { ref item_id }) if item_id == "dateless"
    ));
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"
    );
}

#[test]
fn test_skip_policy_leaves_destination_absent() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reviews.ics");
    let mut config = Config::default();
    config.export.empty_policy = EmptyExportPolicy::Skip;
    let app = App::from_config(MemoryStore::new(), &config);

    let summary = app.export_ics(&out, t0()).unwrap();

    assert!(!summary.written);
    assert!(!out.exists());
}
