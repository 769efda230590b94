//! Capture smoke test - run with: cargo run -p winwatch-capture --bin probe [window-id]

use anyhow::{Context, Result};
use winwatch_core::{CaptureProvider, TextRecognizer};
use winwatch_types::CropRule;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    tracing::info!("1. Available windows:");
    let catalog = winwatch_capture::XcapCatalog::new();
    let windows = catalog.snapshot()?;
    for window in windows.iter().take(10) {
        tracing::info!("   [{}] {} - {}", window.id, window.owner_name, window.title);
    }

    let id = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("window id must be a number")?,
        None => match windows.first() {
            Some(window) => window.id,
            None => {
                tracing::warn!("no windows to capture");
                return Ok(());
            }
        },
    };

    tracing::info!("2. Capturing window {}", id);
    let start = std::time::Instant::now();
    let capture = winwatch_capture::XcapCapture::new();
    for crop in [CropRule::None, CropRule::RightThird, CropRule::BottomHalf] {
        match capture.capture(id, crop) {
            Ok(image) => {
                let path = format!("probe_{crop:?}.png").to_lowercase();
                std::fs::write(&path, winwatch_capture::encode_png(&image)?)?;
                tracing::info!("   {:?}: {}x{} -> {}", crop, image.width(), image.height(), path);
            }
            Err(e) => tracing::warn!("   {:?}: {}", crop, e),
        }
    }
    tracing::info!("   captures took {:?}", start.elapsed());

    tracing::info!("3. Running OCR");
    let recognizer = winwatch_capture::platform_recognizer("en", "tesseract")?;
    let image = capture.capture(id, CropRule::None)?;
    let start = std::time::Instant::now();
    match recognizer.recognize(&image) {
        Ok(text) => {
            tracing::info!("   {:?} - {} chars", start.elapsed(), text.len());
            for line in text.lines().filter(|l| !l.trim().is_empty()).take(5) {
                tracing::info!("   > {}", line);
            }
        }
        Err(e) => tracing::warn!("   Failed: {}", e),
    }

    Ok(())
}
