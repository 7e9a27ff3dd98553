//! Host collaborators
//!
//! The sheet does not measure layout or scroll content itself. The host
//! provides those through the traits here.

use std::sync::{Arc, Mutex};

use glide_core::Size;

/// Measures the rendered box of the sheet root.
///
/// Hosts call [`Sheet::remeasure`](crate::Sheet::remeasure) when the
/// viewport resizes or scrolls; the sheet then calls `measure` again.
pub trait DimensionObserver {
    fn measure(&self) -> Size;
}

/// Control over the sheet's scrollable inner content
pub trait ContentScroller {
    /// Rewind the content to its top edge without animating
    fn scroll_to_top(&mut self);
}

/// Dimensions written by the host's layout pass and read by the sheet
#[derive(Clone, Debug, Default)]
pub struct SharedDimensions {
    inner: Arc<Mutex<Size>>,
}

impl SharedDimensions {
    pub fn new(size: Size) -> Self {
        Self {
            inner: Arc::new(Mutex::new(size)),
        }
    }

    /// Record a new layout result
    pub fn set(&self, size: Size) {
        if let Ok(mut current) = self.inner.lock() {
            *current = size;
        }
    }

    pub fn set_height(&self, height: f32) {
        if let Ok(mut current) = self.inner.lock() {
            current.height = height;
        }
    }
}

impl DimensionObserver for SharedDimensions {
    fn measure(&self) -> Size {
        self.inner.lock().map(|size| *size).unwrap_or(Size::ZERO)
    }
}
