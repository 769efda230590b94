use winwatch_types::{WindowHandle, WindowId};

/// Source of on-screen window snapshots
pub trait WindowCatalog: Send + Sync {
    /// Visible, non-minimized windows with nonzero area, in OS enumeration order.
    ///
    /// Query failures yield an empty list rather than an error.
    fn list_windows(&self) -> Vec<WindowHandle>;

    /// Whether a fresh snapshot still contains `id`
    fn exists(&self, id: WindowId) -> bool {
        self.list_windows().iter().any(|w| w.id == id)
    }
}
