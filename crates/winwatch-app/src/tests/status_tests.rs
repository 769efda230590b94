use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, TimeZone};
use tokio::time::timeout;
use winwatch_types::{MonitorEvent, StatusRecord, StopReason, TickOutcome};

use crate::status::{Presenter, SessionStats, present, render_status};

fn record(tick_index: u64, outcome: TickOutcome, streak: u32) -> StatusRecord {
    StatusRecord {
        tick_index,
        timestamp: Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 15).unwrap(),
        paused: matches!(outcome, TickOutcome::Paused),
        outcome,
        streak,
    }
}

fn text(presenter: Presenter<Vec<u8>>) -> String {
    String::from_utf8(presenter.into_inner()).unwrap()
}

#[test]
fn test_scan_line_shows_streak_and_bell() {
    let line = render_status(&record(3, TickOutcome::Found { alerted: true }, 1), false);

    assert!(line.contains("Scan #3"));
    assert!(line.contains("2024-05-01 09:30:15"));
    assert!(line.contains("FOUND 🔔"));
    assert!(line.contains("(streak: 1)"));
}

#[test]
fn test_silent_hit_has_no_bell() {
    let line = render_status(&record(4, TickOutcome::Found { alerted: false }, 2), false);

    assert!(line.contains("FOUND"));
    assert!(!line.contains('🔔'));
    assert!(line.contains("(streak: 2)"));
}

#[test]
fn test_miss_and_capture_failure() {
    let miss = render_status(&record(5, TickOutcome::NotFound, 0), false);
    assert!(miss.contains("Not found"));
    assert!(!miss.contains("streak"));

    let failed = render_status(
        &record(6, TickOutcome::CaptureFailed("gone".into()), 0),
        false,
    );
    assert!(failed.contains("Capture failed"));
}

#[test]
fn test_paused_heartbeat_keeps_last_index() {
    let line = render_status(&record(9, TickOutcome::Paused, 0), false);

    assert!(line.contains("PAUSED"));
    assert!(line.contains("Scan #9"));
}

#[test]
fn test_save_mode_lines() {
    let saved = render_status(
        &record(
            2,
            TickOutcome::Saved {
                index: 2,
                path: PathBuf::from("shots/screenshot_0002.png"),
            },
            0,
        ),
        true,
    );
    assert!(saved.contains("Screenshot #2 saved"));
    assert!(saved.contains("screenshot_0002.png"));

    let failed = render_status(
        &record(3, TickOutcome::CaptureFailed("window hidden".into()), 0),
        true,
    );
    assert!(failed.contains("Failed to capture screenshot #3: window hidden"));
}

#[test]
fn test_status_rewrites_line_and_notices_break_it() {
    let mut presenter = Presenter::new(Vec::new(), false);

    assert!(presenter
        .handle(&MonitorEvent::Status(record(1, TickOutcome::NotFound, 0)))
        .unwrap());
    assert!(presenter
        .handle(&MonitorEvent::PauseToggled { paused: true })
        .unwrap());
    assert!(presenter
        .handle(&MonitorEvent::PauseToggled { paused: false })
        .unwrap());

    let out = text(presenter);
    assert!(out.contains("Not found"));
    assert_eq!(out.matches("\r\n").count(), 3);
    assert!(out.contains("PAUSED - Press SPACE to resume (streak reset)"));
    assert!(out.contains("RESUMED - Scanning continues"));
    assert!(out.ends_with("\r\n"));
}

#[test]
fn test_save_failures_get_their_own_line() {
    let mut presenter = Presenter::new(Vec::new(), true);
    presenter
        .handle(&MonitorEvent::Status(record(
            1,
            TickOutcome::SaveFailed {
                index: 1,
                reason: "disk full".into(),
            },
            0,
        )))
        .unwrap();

    assert_eq!(presenter.stats().error_count, 1);
    let out = text(presenter);
    assert!(out.contains("Failed to save screenshot #1: disk full"));
    assert!(out.ends_with("\r\n"));
}

#[test]
fn test_each_saved_screenshot_keeps_its_line() {
    let mut presenter = Presenter::new(Vec::new(), true);
    for index in 1..=3 {
        presenter
            .handle(&MonitorEvent::Status(record(
                index,
                TickOutcome::Saved {
                    index,
                    path: PathBuf::from(format!("screenshot_{index:04}.png")),
                },
                0,
            )))
            .unwrap();
    }

    assert_eq!(presenter.stats().saved, 3);
    let out = text(presenter);
    assert_eq!(out.matches("\r\n").count(), 3);
    for index in 1..=3 {
        assert!(out.contains(&format!("Screenshot #{index} saved")));
    }
}

#[test]
fn test_stop_ends_presentation() {
    let mut presenter = Presenter::new(Vec::new(), false);

    let more = presenter
        .handle(&MonitorEvent::Stopped(StopReason::UserRequested))
        .unwrap();
    assert!(!more);
    assert!(text(presenter).contains("Monitoring stopped by user."));

    let mut presenter = Presenter::new(Vec::new(), false);
    presenter
        .handle(&MonitorEvent::Stopped(StopReason::WindowClosed))
        .unwrap();
    assert!(text(presenter).contains("Window closed or no longer available"));
}

#[tokio::test]
async fn test_present_counts_until_stopped() {
    let (tx, rx) = kanal::bounded_async(16);

    let events = [
        MonitorEvent::Status(record(1, TickOutcome::Found { alerted: true }, 1)),
        MonitorEvent::Status(record(2, TickOutcome::Found { alerted: false }, 2)),
        MonitorEvent::PauseToggled { paused: true },
        MonitorEvent::Status(record(2, TickOutcome::Paused, 0)),
        MonitorEvent::PauseToggled { paused: false },
        MonitorEvent::Status(record(3, TickOutcome::NotFound, 0)),
        MonitorEvent::Status(record(4, TickOutcome::CaptureFailed("x".into()), 0)),
        MonitorEvent::Stopped(StopReason::UserRequested),
    ];
    for event in events {
        tx.send(event).await.unwrap();
    }

    let stats = timeout(
        Duration::from_secs(2),
        present(rx, Presenter::new(Vec::new(), false)),
    )
    .await
    .expect("presenter did not stop")
    .unwrap();

    assert_eq!(
        stats,
        SessionStats {
            ticks: 4,
            found: 2,
            alerts: 1,
            saved: 0,
            error_count: 1,
        }
    );
}
