use std::fmt;

use serde::{Deserialize, Serialize};

/// OS-assigned window identifier
pub type WindowId = u32;

/// Longest phrase accepted for a custom OCR search
pub const MAX_PHRASE_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A window as seen in one catalog snapshot.
///
/// Identity is the `id`; the other fields are informational and may be stale
/// by the time the next snapshot is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowHandle {
    pub id: WindowId,
    pub owner_name: String,
    pub title: String,
    pub bounds: Bounds,
}

/// Geometric crop applied to a full-window capture before recognition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropRule {
    #[default]
    None,
    RightThird,
    BottomHalf,
}

/// Pixel rectangle inside a captured image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRule {
    /// Region of a `width` x `height` image kept by this rule.
    ///
    /// Right third spans x in `[2W/3, W)`, bottom half spans y in `[H/2, H)`,
    /// both with integer division.
    pub fn bounds(self, width: u32, height: u32) -> CropBounds {
        match self {
            CropRule::None => CropBounds {
                x: 0,
                y: 0,
                width,
                height,
            },
            CropRule::RightThird => {
                let x = width * 2 / 3;
                CropBounds {
                    x,
                    y: 0,
                    width: width - x,
                    height,
                }
            }
            CropRule::BottomHalf => {
                let y = height / 2;
                CropBounds {
                    x: 0,
                    y,
                    width,
                    height: height - y,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhraseError {
    #[error("Phrase cannot be empty")]
    Empty,

    #[error("Phrase must be {max} characters or less (got {0})", max = MAX_PHRASE_LEN)]
    TooLong(usize),
}

/// Search phrase for custom OCR mode, 1 to 20 characters after trimming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phrase(String);

impl Phrase {
    pub fn new(raw: &str) -> Result<Self, PhraseError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();

        if len == 0 {
            return Err(PhraseError::Empty);
        }
        if len > MAX_PHRASE_LEN {
            return Err(PhraseError::TooLong(len));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Phrase {
    type Error = PhraseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Phrase::new(&value)
    }
}

impl From<Phrase> for String {
    fn from(value: Phrase) -> Self {
        value.0
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the OCR scan looks for and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "phrase", rename_all = "snake_case")]
pub enum OcrTarget {
    Custom(Phrase),
    /// Cursor app: confirmation prompt in the right third of the window
    CursorPreset,
    /// Cursor agent: terminal prompt in the bottom half of the window
    CursorAgentPreset,
}

impl OcrTarget {
    pub fn custom(raw: &str) -> Result<Self, PhraseError> {
        Phrase::new(raw).map(OcrTarget::Custom)
    }

    pub fn phrase(&self) -> &str {
        match self {
            OcrTarget::Custom(phrase) => phrase.as_str(),
            OcrTarget::CursorPreset => "Run this command?",
            OcrTarget::CursorAgentPreset => "Run this Command?",
        }
    }

    pub fn crop_rule(&self) -> CropRule {
        match self {
            OcrTarget::Custom(_) => CropRule::None,
            OcrTarget::CursorPreset => CropRule::RightThird,
            OcrTarget::CursorAgentPreset => CropRule::BottomHalf,
        }
    }

    pub fn description(&self) -> String {
        match self {
            OcrTarget::Custom(phrase) => format!("Custom mode - searching for: \"{phrase}\""),
            OcrTarget::CursorPreset => {
                format!("Cursor App - searching for: \"{}\" in right 1/3", self.phrase())
            }
            OcrTarget::CursorAgentPreset => {
                format!("Cursor Agent - searching for: \"{}\" in bottom half", self.phrase())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorMode {
    SavePictures,
    ScanOcr(OcrTarget),
}

impl MonitorMode {
    pub fn crop_rule(&self) -> CropRule {
        match self {
            MonitorMode::SavePictures => CropRule::None,
            MonitorMode::ScanOcr(target) => target.crop_rule(),
        }
    }
}
