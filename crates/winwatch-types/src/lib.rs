pub mod event;
pub mod types;

pub use event::{MonitorEvent, StatusRecord, StopReason, TickOutcome};
pub use types::{
    Bounds, CropBounds, CropRule, MAX_PHRASE_LEN, MonitorMode, OcrTarget, Phrase, PhraseError,
    WindowHandle, WindowId,
};
