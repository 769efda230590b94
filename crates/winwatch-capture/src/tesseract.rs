use std::io::{ErrorKind, Write};
use std::process::{Child, Command, Stdio};

use winwatch_core::{Image, RecognitionError, TextRecognizer};

use crate::capture::encode_png;

/// Recognizer that pipes PNG frames through the `tesseract` CLI
pub struct TesseractOcr {
    binary: String,
    language: String,
}

impl TesseractOcr {
    /// `language` may be a BCP-47 tag ("en", "ja-JP") or a tesseract code ("eng")
    pub fn new(binary: impl Into<String>, language: &str) -> Self {
        Self {
            binary: binary.into(),
            language: tesseract_language(language),
        }
    }

    /// Fail early when the binary is missing
    pub fn probe(&self) -> Result<(), RecognitionError> {
        let status = Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(RecognitionError::Unavailable(format!(
                "{} --version exited with {}",
                self.binary, status
            )))
        }
    }

    fn spawn_error(&self, e: std::io::Error) -> RecognitionError {
        if e.kind() == ErrorKind::NotFound {
            RecognitionError::Unavailable(format!("{} not found on PATH", self.binary))
        } else {
            RecognitionError::Io(e)
        }
    }
}

impl TextRecognizer for TesseractOcr {
    fn recognize(&self, image: &Image) -> Result<String, RecognitionError> {
        let png = encode_png(image).map_err(|e| RecognitionError::Failed(e.to_string()))?;

        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Dropping stdin closes the pipe so tesseract sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(&png) {
                drop(stdin);
                reap(&mut child);
                return Err(e.into());
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::Failed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Stop a child that is no longer being fed and collect its exit status
fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!("tesseract already exited: {}", e);
    }
    if let Err(e) = child.wait() {
        tracing::warn!("Failed to reap tesseract: {}", e);
    }
}

/// Map a BCP-47 tag to a tesseract traineddata name
fn tesseract_language(tag: &str) -> String {
    let primary = tag.split(['-', '_']).next().unwrap_or(tag).to_lowercase();

    let code = match primary.as_str() {
        "en" => "eng",
        "ja" => "jpn",
        "de" => "deu",
        "fr" => "fra",
        "es" => "spa",
        "it" => "ita",
        "pt" => "por",
        "ru" => "rus",
        "ko" => "kor",
        "zh" => "chi_sim",
        _ => return tag.to_string(),
    };
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_mapping() {
        assert_eq!(tesseract_language("en"), "eng");
        assert_eq!(tesseract_language("en-US"), "eng");
        assert_eq!(tesseract_language("ja_JP"), "jpn");
        assert_eq!(tesseract_language("eng"), "eng");
        assert_eq!(tesseract_language("chi_tra"), "chi_tra");
    }

    /// Pseudo-random pixels so the PNG is far larger than a pipe buffer
    fn noise(width: u32, height: u32) -> Image {
        let mut state = 0x2545_f491_u32;
        Image::from_fn(width, height, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            image::Rgba(state.to_le_bytes())
        })
    }

    #[cfg(unix)]
    #[test]
    fn test_binary_that_ignores_stdin_fails_the_frame() {
        // `true` exits without reading, so the write hits a closed pipe
        let ocr = TesseractOcr::new("true", "en");

        let result = ocr.recognize(&noise(1024, 1024));
        assert!(matches!(result, Err(RecognitionError::Io(_))));
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let ocr = TesseractOcr::new("winwatch-no-such-tesseract", "en");

        assert!(matches!(ocr.probe(), Err(RecognitionError::Unavailable(_))));
        assert!(matches!(
            ocr.recognize(&Image::new(4, 4)),
            Err(RecognitionError::Unavailable(_))
        ));
    }
}
