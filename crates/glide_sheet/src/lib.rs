//! Glide Bottom Sheet
//!
//! A draggable bottom panel that arbitrates between dragging the sheet and
//! scrolling its content, animates between open and closed with a spring,
//! and derives its backdrop from the sheet offset.
//!
//! # Features
//!
//! - **Gesture Arbitration**: content scroll edges decide whether a drag moves the sheet
//! - **Interruptible Springs**: open/close redirect in flight, keeping velocity
//! - **Flick & Drag Dismissal**: fast flicks and long pulls both close the sheet
//! - **Derived Backdrop**: opacity, visibility and tint computed from the offset
//! - **Scoped Page Scroll Lock**: held only while fully open, released on drop
//!
//! # Example
//!
//! ```rust
//! use glide_core::Size;
//! use glide_sheet::prelude::*;
//!
//! let dims = SharedDimensions::new(Size::new(390.0, 300.0));
//! let mut sheet = glide_sheet::sheet().mount(dims);
//!
//! sheet.open();
//! while sheet.is_animating() {
//!     sheet.tick(1.0 / 60.0);
//! }
//! assert_eq!(sheet.offset(), 0.0);
//! assert_eq!(sheet.backdrop().opacity, 1.0);
//! ```

pub mod animator;
pub mod arbiter;
pub mod backdrop;
pub mod config;
pub mod error;
pub mod host;
pub mod scroll_lock;
pub mod sheet;

pub use animator::{AnimatorEvent, OffsetAnimator, Visibility};
pub use arbiter::{
    drag_allowed, release_decision, ContentEdge, GestureArbiter, ReleaseDecision, ScrollMetrics,
};
pub use backdrop::{backdrop_opacity, backdrop_tint, backdrop_visible, BackdropStyle};
pub use config::{BackdropConfig, GestureConfig, SheetConfig};
pub use error::{Result, SheetError};
pub use host::{ContentScroller, DimensionObserver, SharedDimensions};
pub use scroll_lock::{PageScrollLock, ScrollLockGuard};
pub use sheet::{
    sheet, targets, Sheet, SheetBuilder, SheetControl, SheetEvent, SheetHandle, SheetState,
    TransitionCallback,
};

/// Commonly used types
pub mod prelude {
    pub use crate::animator::Visibility;
    pub use crate::arbiter::{ContentEdge, ScrollMetrics};
    pub use crate::config::SheetConfig;
    pub use crate::host::{ContentScroller, DimensionObserver, SharedDimensions};
    pub use crate::scroll_lock::PageScrollLock;
    pub use crate::sheet::{Sheet, SheetBuilder, SheetControl, SheetEvent, SheetHandle};
}
