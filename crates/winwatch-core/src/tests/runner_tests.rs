use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use winwatch_types::{MonitorEvent, OcrTarget, StopReason, TickOutcome};

use super::fakes::*;
use crate::engine::MonitorEngine;
use crate::runner::run_monitor;
use crate::state::PauseControl;

const PERIOD: Duration = Duration::from_millis(5);

#[tokio::test]
async fn test_runner_stops_when_window_disappears() {
    let catalog = FakeCatalog::with(vec![window(4, "Cursor")]);
    // Window vanishes during the third capture
    let capture = FakeCapture::closing_after(3, 4, catalog.clone());

    let engine = MonitorEngine::scan_ocr(
        window(4, "Cursor"),
        OcrTarget::CursorPreset,
        catalog,
        Box::new(capture.clone()),
        ScriptedRecognizer::new(&[Some("Run this command?"); 3]),
        Box::new(CountingAlerter::default()),
        Arc::new(PauseControl::new()),
    );

    let (tx, rx) = kanal::unbounded_async();
    let reason = timeout(
        Duration::from_secs(2),
        run_monitor(engine, PERIOD, CancellationToken::new(), tx.clone()),
    )
    .await
    .expect("runner hung")
    .expect("runner failed");

    assert_eq!(reason, StopReason::WindowClosed);
    assert_eq!(capture.call_count(), 3);

    let mut streaks = Vec::new();
    while let Ok(Some(MonitorEvent::Status(record))) = rx.try_recv() {
        assert!(record.outcome.is_found());
        streaks.push(record.streak);
    }
    assert_eq!(streaks, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_runner_honours_cancellation() {
    let catalog = FakeCatalog::with(vec![window(5, "Notes")]);
    let sink = MemorySink::default();
    let saved = sink.saved.clone();

    let engine = MonitorEngine::save_pictures(
        window(5, "Notes"),
        catalog,
        Box::new(FakeCapture::new()),
        Box::new(sink),
        Arc::new(PauseControl::new()),
    );

    let cancel = CancellationToken::new();
    let (tx, rx) = kanal::unbounded_async();
    let runner = tokio::spawn(run_monitor(engine, PERIOD, cancel.clone(), tx));

    // First tick fires immediately
    let first = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("no status")
        .expect("channel closed");
    match first {
        MonitorEvent::Status(record) => {
            assert!(matches!(record.outcome, TickOutcome::Saved { index: 1, .. }))
        }
        other => panic!("unexpected {other:?}"),
    }

    cancel.cancel();
    let reason = timeout(Duration::from_secs(1), runner)
        .await
        .expect("runner hung")
        .unwrap()
        .unwrap();

    assert_eq!(reason, StopReason::UserRequested);
    assert!(!saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_runner_emits_heartbeat_while_paused() {
    let catalog = FakeCatalog::with(vec![window(6, "Cursor")]);
    let capture = FakeCapture::new();
    let pause = Arc::new(PauseControl::new());
    pause.toggle();

    let engine = MonitorEngine::scan_ocr(
        window(6, "Cursor"),
        OcrTarget::CursorPreset,
        catalog,
        Box::new(capture.clone()),
        ScriptedRecognizer::new(&[]),
        Box::new(CountingAlerter::default()),
        pause,
    );

    let cancel = CancellationToken::new();
    let (tx, rx) = kanal::unbounded_async();
    let runner = tokio::spawn(run_monitor(engine, PERIOD, cancel.clone(), tx));

    for _ in 0..3 {
        let event = timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
        match event {
            MonitorEvent::Status(record) => assert_eq!(record.outcome, TickOutcome::Paused),
            other => panic!("unexpected {other:?}"),
        }
    }

    cancel.cancel();
    let _ = timeout(Duration::from_secs(1), runner).await.unwrap();
    assert_eq!(capture.call_count(), 0);
}
