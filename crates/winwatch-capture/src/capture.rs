use anyhow::{Context, Result};
use image::{ExtendedColorType, ImageEncoder};
use winwatch_core::{CaptureError, CaptureProvider, Image, WindowCatalog};
use winwatch_types::{Bounds, CropRule, WindowHandle, WindowId};
use xcap::Window;

/// Owners and titles of desktop-level surfaces that are never worth watching
const DESKTOP_ELEMENTS: &[&str] = &["Program Manager", "Window Server", "Dock"];

/// Window catalog backed by xcap's OS enumeration
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapCatalog;

impl XcapCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate windows, surfacing the OS error
    pub fn snapshot(&self) -> Result<Vec<WindowHandle>> {
        let windows = Window::all().context("Failed to enumerate windows")?;
        Ok(windows.iter().filter_map(to_handle).collect())
    }
}

impl WindowCatalog for XcapCatalog {
    fn list_windows(&self) -> Vec<WindowHandle> {
        self.snapshot().unwrap_or_else(|e| {
            tracing::warn!("window enumeration failed: {:#}", e);
            Vec::new()
        })
    }
}

fn to_handle(w: &Window) -> Option<WindowHandle> {
    if w.is_minimized() || w.width() == 0 || w.height() == 0 {
        return None;
    }
    if DESKTOP_ELEMENTS.contains(&w.app_name()) || DESKTOP_ELEMENTS.contains(&w.title()) {
        return None;
    }

    let title = if w.title().is_empty() {
        "Untitled".to_string()
    } else {
        w.title().to_string()
    };

    Some(WindowHandle {
        id: w.id(),
        owner_name: w.app_name().to_string(),
        title,
        bounds: Bounds {
            x: w.x(),
            y: w.y(),
            width: w.width(),
            height: w.height(),
        },
    })
}

/// Captures window contents through xcap
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapCapture;

impl XcapCapture {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureProvider for XcapCapture {
    fn capture(&self, window_id: WindowId, crop: CropRule) -> Result<Image, CaptureError> {
        let full = capture_window(window_id)?;
        crop_image(&full, crop)
    }
}

/// Capture a specific window by ID at full size
pub fn capture_window(window_id: WindowId) -> Result<Image, CaptureError> {
    let windows = Window::all().map_err(|e| CaptureError::Failed(e.to_string()))?;
    let window = windows
        .into_iter()
        .find(|w| w.id() == window_id)
        .ok_or(CaptureError::WindowNotFound(window_id))?;

    let captured = window
        .capture_image()
        .map_err(|e| CaptureError::Failed(e.to_string()))?;

    // xcap ships its own copy of the image crate, hand the pixels over raw
    let (width, height) = (captured.width(), captured.height());
    Image::from_raw(width, height, captured.into_raw()).ok_or(CaptureError::EmptyImage)
}

/// Apply `crop` to a full-window image
pub fn crop_image(full: &Image, crop: CropRule) -> Result<Image, CaptureError> {
    let b = crop.bounds(full.width(), full.height());
    if b.width == 0 || b.height == 0 {
        return Err(CaptureError::EmptyImage);
    }

    Ok(image::imageops::crop_imm(full, b.x, b.y, b.width, b.height).to_image())
}

pub fn encode_png(image: &Image) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buffer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buffer)
}
