use anyhow::{Context, Result};
use windows::Win32::System::Com::{COINIT_MULTITHREADED, CoInitializeEx, CoUninitialize};

/// Keeps COM initialized on the current thread for the guard's lifetime.
///
/// Blocking-pool threads are reused across ticks, so every recognition call
/// takes its own guard; nested initialization is reference counted by COM.
pub struct ComGuard(());

impl ComGuard {
    pub fn initialize() -> Result<Self> {
        unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) }
            .ok()
            .context("Failed to initialize COM")?;
        Ok(ComGuard(()))
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}
