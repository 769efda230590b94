use windows::{
    Globalization::Language,
    Graphics::Imaging::BitmapDecoder,
    Media::Ocr::OcrEngine,
    Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
    core::HSTRING,
};
use winwatch_core::{Image, RecognitionError, TextRecognizer};

use crate::capture::encode_png;
use crate::com::ComGuard;

/// Windows.Media.Ocr recognizer
pub struct WindowsOcr {
    engine: OcrEngine,
}

impl WindowsOcr {
    /// Create an engine for a BCP-47 tag such as "en" or "en-US"
    pub fn new(language_code: &str) -> Result<Self, RecognitionError> {
        let _com = ComGuard::initialize().map_err(|e| unavailable(&e))?;

        let language =
            Language::CreateLanguage(&HSTRING::from(language_code)).map_err(|e| unavailable(&e))?;
        let engine = OcrEngine::TryCreateFromLanguage(&language).map_err(|e| {
            RecognitionError::Unavailable(format!("no OCR language pack for {language_code}: {e}"))
        })?;

        tracing::info!("Windows OCR engine ready for {}", language_code);
        Ok(Self { engine })
    }

    fn recognize_png(&self, png: &[u8]) -> windows::core::Result<String> {
        let stream = InMemoryRandomAccessStream::new()?;
        let writer = DataWriter::CreateDataWriter(&stream)?;
        writer.WriteBytes(png)?;
        writer.StoreAsync()?.get()?;
        writer.FlushAsync()?.get()?;
        stream.Seek(0)?;

        let bitmap = BitmapDecoder::CreateAsync(&stream)?
            .get()?
            .GetSoftwareBitmapAsync()?
            .get()?;

        let result = self.engine.RecognizeAsync(&bitmap)?.get()?;
        Ok(result.Text()?.to_string())
    }
}

impl TextRecognizer for WindowsOcr {
    fn recognize(&self, image: &Image) -> Result<String, RecognitionError> {
        let _com = ComGuard::initialize().map_err(|e| unavailable(&e))?;

        let png = encode_png(image).map_err(|e| RecognitionError::Failed(e.to_string()))?;
        self.recognize_png(&png)
            .map_err(|e| RecognitionError::Failed(e.to_string()))
    }
}

fn unavailable(e: &dyn std::fmt::Display) -> RecognitionError {
    RecognitionError::Unavailable(e.to_string())
}
