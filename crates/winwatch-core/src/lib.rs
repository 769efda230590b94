pub mod catalog;
pub mod engine;
pub mod error;
pub mod provider;
pub mod runner;
pub mod state;
pub mod streak;

pub use catalog::WindowCatalog;
pub use engine::{EngineState, MonitorEngine, Tick};
pub use error::{CaptureError, MonitorError, RecognitionError, SaveError};
pub use provider::{Alerter, CaptureProvider, Image, ScreenshotSink, TextRecognizer, contains_phrase};
pub use runner::run_monitor;
pub use state::{MonitorState, PauseControl};
pub use streak::StreakTracker;

#[cfg(test)]
mod tests;
