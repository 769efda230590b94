mod capture;
#[cfg(target_os = "windows")]
mod com;
#[cfg(target_os = "windows")]
mod ocr;
mod tesseract;

use winwatch_core::{RecognitionError, TextRecognizer};

pub use capture::{XcapCapture, XcapCatalog, capture_window, crop_image, encode_png};
#[cfg(target_os = "windows")]
pub use com::ComGuard;
#[cfg(target_os = "windows")]
pub use ocr::WindowsOcr;
pub use tesseract::TesseractOcr;

/// Best recognizer for this platform: Windows.Media.Ocr on Windows, the
/// tesseract CLI elsewhere.
pub fn platform_recognizer(
    language: &str,
    tesseract_bin: &str,
) -> Result<Box<dyn TextRecognizer>, RecognitionError> {
    #[cfg(target_os = "windows")]
    {
        let _ = tesseract_bin;
        Ok(Box::new(WindowsOcr::new(language)?))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let ocr = TesseractOcr::new(tesseract_bin, language);
        ocr.probe()?;
        Ok(Box::new(ocr))
    }
}
