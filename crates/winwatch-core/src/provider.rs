use std::path::PathBuf;

use winwatch_types::{CropRule, WindowId};

use crate::error::{CaptureError, RecognitionError, SaveError};

pub type Image = image::RgbaImage;

/// Grabs window pixels
pub trait CaptureProvider: Send + Sync {
    /// Capture `window_id` and apply `crop` to the full window image
    fn capture(&self, window_id: WindowId, crop: CropRule) -> Result<Image, CaptureError>;
}

/// Turns pixels into text
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &Image) -> Result<String, RecognitionError>;
}

/// Persists screenshots in save mode
pub trait ScreenshotSink: Send {
    /// Store the screenshot taken on tick `index` and return where it went
    fn save(&mut self, index: u64, image: &Image) -> Result<PathBuf, SaveError>;
}

/// Fires the detection signal
pub trait Alerter: Send + Sync {
    fn alert(&self);
}

/// Case-insensitive substring match with whitespace runs collapsed,
/// so a phrase wrapped across recognized lines still matches.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    let haystack = normalize(text);
    let needle = normalize(phrase);

    !needle.is_empty() && haystack.contains(&needle)
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
