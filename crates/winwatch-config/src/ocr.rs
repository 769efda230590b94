use std::env;

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "en".to_string()
}

fn default_tesseract_bin() -> String {
    "tesseract".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// BCP-47 tag for the Windows engine, mapped to a tesseract code elsewhere
    #[serde(default = "default_language")]
    pub language: String,
    /// Tesseract executable used on platforms without a native engine
    #[serde(default = "default_tesseract_bin")]
    pub tesseract_bin: String,
}

impl OcrConfig {
    pub fn new() -> Self {
        Self {
            language: env::var("WINWATCH_OCR_LANGUAGE").unwrap_or_else(|_| default_language()),
            tesseract_bin: env::var("WINWATCH_TESSERACT")
                .unwrap_or_else(|_| default_tesseract_bin()),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            tesseract_bin: default_tesseract_bin(),
        }
    }
}
