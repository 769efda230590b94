use std::sync::Arc;

use chrono::Local;
use winwatch_types::{MonitorMode, OcrTarget, StatusRecord, StopReason, TickOutcome, WindowHandle};

use crate::catalog::WindowCatalog;
use crate::provider::{Alerter, CaptureProvider, Image, ScreenshotSink, TextRecognizer, contains_phrase};
use crate::state::{MonitorState, PauseControl};
use crate::streak::StreakTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Paused,
    Stopped(StopReason),
}

/// What one call to [`MonitorEngine::tick`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Status(StatusRecord),
    Stopped(StopReason),
}

enum Pipeline {
    Save {
        sink: Box<dyn ScreenshotSink>,
        saved: u64,
    },
    Scan {
        target: OcrTarget,
        recognizer: Box<dyn TextRecognizer>,
        alerter: Box<dyn Alerter>,
        streak: StreakTracker,
    },
}

/// Poll-driven monitor for a single window.
///
/// All counters are touched only from [`tick`](Self::tick); the pause flag is
/// the one piece of state shared with other threads.
pub struct MonitorEngine {
    window: WindowHandle,
    catalog: Arc<dyn WindowCatalog>,
    capture: Box<dyn CaptureProvider>,
    pipeline: Pipeline,
    pause: Arc<PauseControl>,
    tick_count: u64,
    stopped: Option<StopReason>,
}

impl MonitorEngine {
    pub fn save_pictures(
        window: WindowHandle,
        catalog: Arc<dyn WindowCatalog>,
        capture: Box<dyn CaptureProvider>,
        sink: Box<dyn ScreenshotSink>,
        pause: Arc<PauseControl>,
    ) -> Self {
        Self::with_pipeline(window, catalog, capture, pause, Pipeline::Save { sink, saved: 0 })
    }

    pub fn scan_ocr(
        window: WindowHandle,
        target: OcrTarget,
        catalog: Arc<dyn WindowCatalog>,
        capture: Box<dyn CaptureProvider>,
        recognizer: Box<dyn TextRecognizer>,
        alerter: Box<dyn Alerter>,
        pause: Arc<PauseControl>,
    ) -> Self {
        let pipeline = Pipeline::Scan {
            target,
            recognizer,
            alerter,
            streak: StreakTracker::new(),
        };
        Self::with_pipeline(window, catalog, capture, pause, pipeline)
    }

    fn with_pipeline(
        window: WindowHandle,
        catalog: Arc<dyn WindowCatalog>,
        capture: Box<dyn CaptureProvider>,
        pause: Arc<PauseControl>,
        pipeline: Pipeline,
    ) -> Self {
        Self {
            window,
            catalog,
            capture,
            pipeline,
            pause,
            tick_count: 0,
            stopped: None,
        }
    }

    pub fn window(&self) -> &WindowHandle {
        &self.window
    }

    pub fn mode(&self) -> MonitorMode {
        match &self.pipeline {
            Pipeline::Save { .. } => MonitorMode::SavePictures,
            Pipeline::Scan { target, .. } => MonitorMode::ScanOcr(target.clone()),
        }
    }

    pub fn engine_state(&self) -> EngineState {
        match self.stopped {
            Some(reason) => EngineState::Stopped(reason),
            None if self.pause.is_paused() => EngineState::Paused,
            None => EngineState::Running,
        }
    }

    pub fn monitor_state(&self) -> MonitorState {
        MonitorState {
            tick_count: self.tick_count,
            is_paused: self.pause.is_paused(),
            consecutive_detections: self.streak(),
        }
    }

    /// Screenshots written so far in save mode
    pub fn saved_count(&self) -> u64 {
        match &self.pipeline {
            Pipeline::Save { saved, .. } => *saved,
            Pipeline::Scan { .. } => 0,
        }
    }

    /// Mark the session as ended by the user; later ticks do nothing
    pub fn stop(&mut self) {
        self.stopped.get_or_insert(StopReason::UserRequested);
    }

    /// Run one poll step. Blocks for the duration of capture and recognition.
    pub fn tick(&mut self) -> Tick {
        if let Some(reason) = self.stopped {
            return Tick::Stopped(reason);
        }

        if self.pause.take_streak_reset() {
            self.reset_streak();
        }

        if self.pause.is_paused() {
            tracing::trace!("tick skipped, paused");
            return Tick::Status(self.record(TickOutcome::Paused, true));
        }

        if !self.catalog.exists(self.window.id) {
            tracing::info!("window {} is gone, stopping", self.window.id);
            self.stopped = Some(StopReason::WindowClosed);
            return Tick::Stopped(StopReason::WindowClosed);
        }

        self.tick_count += 1;
        let crop = self.mode().crop_rule();

        let outcome = match self.capture.capture(self.window.id, crop) {
            Ok(image) => self.handle_image(&image),
            Err(e) => {
                tracing::debug!("tick {}: {}", self.tick_count, e);
                self.reset_streak();
                TickOutcome::CaptureFailed(e.to_string())
            }
        };

        Tick::Status(self.record(outcome, false))
    }

    fn handle_image(&mut self, image: &Image) -> TickOutcome {
        let index = self.tick_count;

        match &mut self.pipeline {
            Pipeline::Save { sink, saved } => match sink.save(index, image) {
                Ok(path) => {
                    *saved += 1;
                    tracing::debug!("saved screenshot #{} to {}", index, path.display());
                    TickOutcome::Saved { index, path }
                }
                Err(e) => {
                    tracing::warn!("failed to save screenshot #{}: {}", index, e);
                    TickOutcome::SaveFailed {
                        index,
                        reason: e.to_string(),
                    }
                }
            },
            Pipeline::Scan {
                target,
                recognizer,
                alerter,
                streak,
            } => {
                let found = match recognizer.recognize(image) {
                    Ok(text) => {
                        tracing::debug!("tick {}: recognized {} chars", index, text.len());
                        contains_phrase(&text, target.phrase())
                    }
                    Err(e) => {
                        // Uncertain recognition never alerts
                        tracing::debug!("tick {}: {}", index, e);
                        false
                    }
                };

                if found {
                    let alerted = streak.record_found();
                    if alerted {
                        alerter.alert();
                    }
                    TickOutcome::Found { alerted }
                } else {
                    streak.reset();
                    TickOutcome::NotFound
                }
            }
        }
    }

    fn reset_streak(&mut self) {
        if let Pipeline::Scan { streak, .. } = &mut self.pipeline {
            streak.reset();
        }
    }

    fn streak(&self) -> u32 {
        match &self.pipeline {
            Pipeline::Scan { streak, .. } => streak.current(),
            Pipeline::Save { .. } => 0,
        }
    }

    fn record(&self, outcome: TickOutcome, paused: bool) -> StatusRecord {
        StatusRecord {
            tick_index: self.tick_count,
            timestamp: Local::now(),
            paused,
            outcome,
            streak: self.streak(),
        }
    }
}
