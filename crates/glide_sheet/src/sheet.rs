//! Bottom sheet controller
//!
//! [`Sheet`] wires the gesture arbiter, the offset animator and the
//! backdrop derivation together, and exposes the open/close surface.
//!
//! Everything runs on the host's event loop. The host forwards input
//! (drag reports, content scroll reports, resizes), calls
//! [`Sheet::paint_committed`] after the first frame is on screen, and
//! calls [`Sheet::tick`] once per animation frame.
//!
//! # Example
//!
//! ```rust
//! use glide_core::Size;
//! use glide_sheet::prelude::*;
//!
//! let dims = SharedDimensions::new(Size::new(390.0, 420.0));
//! let mut sheet = glide_sheet::sheet()
//!     .initial(Visibility::Visible)
//!     .animate_on_mount(true)
//!     .on_close_transition_end(|| println!("closed"))
//!     .mount(dims);
//!
//! // First paint shows the sheet hidden, then the entrance starts
//! assert_eq!(sheet.offset(), 420.0);
//! sheet.paint_committed();
//!
//! // A parent holds the handle and decides when to close
//! let handle = sheet.handle();
//! handle.close();
//!
//! for _ in 0..600 {
//!     sheet.tick(1.0 / 60.0);
//! }
//! assert_eq!(sheet.offset(), 420.0);
//! ```

use std::sync::{Arc, Mutex};

use glide_core::events::event_types;
use glide_core::{Event, EventData};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::animator::{AnimatorEvent, OffsetAnimator, Visibility};
use crate::arbiter::{release_decision, ContentEdge, GestureArbiter, ReleaseDecision, ScrollMetrics};
use crate::backdrop::BackdropStyle;
use crate::config::SheetConfig;
use crate::host::{ContentScroller, DimensionObserver};
use crate::scroll_lock::{PageScrollLock, ScrollLockGuard};

/// Callback fired when a transition completes
pub type TransitionCallback = Arc<dyn Fn() + Send + Sync>;

/// Widget ids used as [`Event::target`] for the parts of a sheet
pub mod targets {
    /// The draggable sheet surface
    pub const SURFACE: u64 = 1;
    /// The scrollable inner content
    pub const CONTENT: u64 = 2;
    /// The dimmed backdrop behind the sheet
    pub const BACKDROP: u64 = 3;
}

/// Completed transitions reported by [`Sheet::tick`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetEvent {
    OpenTransitionEnd,
    CloseTransitionEnd,
}

/// Capability a parent uses to drive a sheet it owns
pub trait SheetControl {
    fn open(&self);
    fn close(&self);
}

/// Imperative open/close handle.
///
/// Requests are queued and applied on the sheet's next tick or input
/// event. Only the latest request is kept, so rapid open/close calls
/// always converge on the last one. Handles are safe to use from inside
/// transition callbacks.
#[derive(Clone, Debug, Default)]
pub struct SheetHandle {
    pending: Arc<Mutex<Option<Visibility>>>,
}

impl SheetHandle {
    /// The request that will be applied next, if any
    pub fn pending(&self) -> Option<Visibility> {
        self.pending.lock().ok().and_then(|p| *p)
    }

    fn post(&self, target: Visibility) {
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(target);
        }
    }

    fn take(&self) -> Option<Visibility> {
        self.pending.lock().ok().and_then(|mut p| p.take())
    }
}

impl SheetControl for SheetHandle {
    fn open(&self) {
        self.post(Visibility::Visible);
    }

    fn close(&self) {
        self.post(Visibility::Hidden);
    }
}

/// Snapshot of a sheet's state
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SheetState {
    pub offset: f32,
    pub height: f32,
    pub animation_target: Visibility,
    pub content_edge: ContentEdge,
    pub is_scrollable: bool,
    pub drag_allowed: bool,
    pub has_played_entrance: bool,
    pub is_animating: bool,
    pub is_dragging: bool,
}

/// One pointer gesture on the sheet surface
#[derive(Clone, Copy, Debug)]
struct DragSession {
    start_offset: f32,
    /// The sheet follows the pointer
    captured: bool,
}

/// Builder for mounting sheets
pub struct SheetBuilder {
    name: String,
    config: SheetConfig,
    content: Option<Box<dyn ContentScroller>>,
    scroll_lock: Option<PageScrollLock>,
    on_open_transition_end: Option<TransitionCallback>,
    on_close_transition_end: Option<TransitionCallback>,
}

impl SheetBuilder {
    pub fn new() -> Self {
        Self {
            name: "sheet".to_string(),
            config: SheetConfig::default(),
            content: None,
            scroll_lock: None,
            on_open_transition_end: None,
            on_close_transition_end: None,
        }
    }

    /// Name used in logs and as the scroll lock owner
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the whole config
    pub fn config(mut self, config: SheetConfig) -> Self {
        self.config = config;
        self
    }

    pub fn initial(mut self, initial: Visibility) -> Self {
        self.config.initial = initial;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.config.draggable = draggable;
        self
    }

    pub fn animate_on_mount(mut self, animate: bool) -> Self {
        self.config.animate_on_mount = animate;
        self
    }

    pub fn dismiss_on_backdrop(mut self, dismiss: bool) -> Self {
        self.config.dismiss_on_backdrop = dismiss;
        self
    }

    /// Lock page scrolling through `lock` while the sheet rests fully open
    pub fn page_scroll_lock(mut self, lock: PageScrollLock) -> Self {
        self.config.lock_page_scroll = true;
        self.scroll_lock = Some(lock);
        self
    }

    /// Scroller for the inner content, rewound whenever the sheet closes
    pub fn content<C: ContentScroller + 'static>(mut self, content: C) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    pub fn on_open_transition_end<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_open_transition_end = Some(Arc::new(callback));
        self
    }

    pub fn on_close_transition_end<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close_transition_end = Some(Arc::new(callback));
        self
    }

    /// Mount the sheet, measuring it through `observer`
    pub fn mount<O: DimensionObserver + 'static>(self, observer: O) -> Sheet {
        Sheet::mount(self, Box::new(observer))
    }
}

impl Default for SheetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new sheet builder
pub fn sheet() -> SheetBuilder {
    SheetBuilder::new()
}

/// A mounted bottom sheet
pub struct Sheet {
    name: String,
    config: SheetConfig,
    animator: OffsetAnimator,
    arbiter: GestureArbiter,
    observer: Box<dyn DimensionObserver>,
    content: Option<Box<dyn ContentScroller>>,
    height: f32,
    has_played_entrance: bool,
    drag: Option<DragSession>,
    handle: SheetHandle,
    scroll_lock: Option<PageScrollLock>,
    scroll_lock_guard: Option<ScrollLockGuard>,
    on_open_transition_end: Option<TransitionCallback>,
    on_close_transition_end: Option<TransitionCallback>,
}

impl Sheet {
    fn mount(builder: SheetBuilder, observer: Box<dyn DimensionObserver>) -> Self {
        let SheetBuilder {
            name,
            config,
            content,
            scroll_lock,
            on_open_transition_end,
            on_close_transition_end,
        } = builder;

        let height = observer.measure().height_or_zero();

        // Render hidden first so the entrance animation is visible
        let first = if config.animate_on_mount && config.initial == Visibility::Visible {
            Visibility::Hidden
        } else {
            config.initial
        };

        let scroll_lock = match scroll_lock {
            Some(lock) => Some(lock),
            None if config.lock_page_scroll => Some(PageScrollLock::new()),
            None => None,
        };

        let mut animator = OffsetAnimator::new(config.spring, height);
        animator.jump_to(first);

        let mut sheet = Self {
            animator,
            arbiter: GestureArbiter::new(config.draggable, config.gesture.scrollable_slack),
            name,
            config,
            observer,
            content,
            height,
            has_played_entrance: false,
            drag: None,
            handle: SheetHandle::default(),
            scroll_lock,
            scroll_lock_guard: None,
            on_open_transition_end,
            on_close_transition_end,
        };

        tracing::debug!(
            "sheet `{}` mounted {:?} (height {})",
            sheet.name,
            first,
            sheet.height
        );
        sheet.sync_scroll_lock();
        sheet
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// The first frame has been committed to screen.
    ///
    /// Starts the entrance animation once per mount when the sheet is
    /// configured to animate on mount toward `Visible`.
    pub fn paint_committed(&mut self) {
        if self.has_played_entrance || !self.config.animate_on_mount {
            return;
        }
        self.has_played_entrance = true;

        if self.config.initial == Visibility::Visible {
            tracing::debug!("sheet `{}` entrance", self.name);
            self.animator.drive_to(Visibility::Visible);
        }
    }

    /// Unmount the sheet, releasing any page scroll lock it holds
    pub fn unmount(mut self) {
        self.scroll_lock_guard = None;
        tracing::debug!("sheet `{}` unmounted", self.name);
    }

    /// The inner content went away; closing no longer rewinds it
    pub fn detach_content(&mut self) {
        if self.content.take().is_some() {
            tracing::debug!("sheet `{}` content detached", self.name);
        }
    }

    pub fn attach_content<C: ContentScroller + 'static>(&mut self, content: C) {
        self.content = Some(Box::new(content));
    }

    // =========================================================================
    // Open / close
    // =========================================================================

    pub fn open(&mut self) {
        self.request(Visibility::Visible);
    }

    pub fn close(&mut self) {
        self.request(Visibility::Hidden);
    }

    /// Handle for a parent to open and close this sheet
    pub fn handle(&self) -> SheetHandle {
        self.handle.clone()
    }

    /// Turn sheet dragging on or off
    pub fn set_draggable(&mut self, draggable: bool) {
        self.config.draggable = draggable;
        self.arbiter.set_draggable(draggable);
    }

    /// The backdrop was pressed
    pub fn backdrop_pressed(&mut self) {
        if self.config.dismiss_on_backdrop {
            self.close();
        }
    }

    fn request(&mut self, target: Visibility) {
        tracing::debug!(
            "sheet `{}` -> {:?} from offset {:.1}",
            self.name,
            target,
            self.animator.offset()
        );

        // An explicit request before the first paint replaces the entrance
        if self.config.animate_on_mount {
            self.has_played_entrance = true;
        }
        self.animator.drive_to(target);
    }

    fn drain_requests(&mut self) {
        if let Some(target) = self.handle.take() {
            self.request(target);
        }
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance animations by `dt` seconds and fire transition callbacks
    pub fn tick(&mut self, dt: f32) -> SmallVec<[SheetEvent; 2]> {
        self.drain_requests();

        let mut events = SmallVec::new();
        if self.is_holding() {
            return events;
        }

        match self.animator.tick(dt) {
            Some(AnimatorEvent::Settled(offset)) => {
                self.sync_scroll_lock();
                events.push(self.finish_transition(offset));
            }
            Some(AnimatorEvent::Frame(_)) => self.sync_scroll_lock(),
            None => {}
        }

        events
    }

    fn finish_transition(&mut self, offset: f32) -> SheetEvent {
        let opened = if self.height > 0.0 {
            offset == 0.0
        } else {
            // Unmeasured: both rest positions are 0, so go by the target
            self.animator.target() == Visibility::Visible
        };

        if opened {
            tracing::debug!("sheet `{}` open transition end", self.name);
            if let Some(callback) = &self.on_open_transition_end {
                callback();
            }
            return SheetEvent::OpenTransitionEnd;
        }

        tracing::debug!("sheet `{}` close transition end", self.name);
        if let Some(content) = self.content.as_mut() {
            content.scroll_to_top();
        }
        self.arbiter.reset();
        if let Some(callback) = &self.on_close_transition_end {
            callback();
        }
        SheetEvent::CloseTransitionEnd
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// A pointer went down on the sheet's drag surface
    pub fn drag_start(&mut self) {
        self.drain_requests();

        self.arbiter.begin_drag();
        let captured = self.arbiter.drag_allowed();
        let start_offset = self.animator.offset();

        if captured {
            // Grab the sheet where it is, interrupting any animation
            self.animator.set_offset(start_offset);
        }

        tracing::debug!(
            "sheet `{}` drag start at {:.1} (captured={})",
            self.name,
            start_offset,
            captured
        );
        self.drag = Some(DragSession {
            start_offset,
            captured,
        });
    }

    /// Drag position report: `offset_y` is the displacement from the drag start
    pub fn drag_move(&mut self, offset_y: f32) {
        if self.drag.is_none() {
            self.drag_start();
        }

        let revoked = self.arbiter.on_drag(offset_y);
        let Some(session) = self.drag else {
            return;
        };

        if revoked && session.captured {
            // Content claimed the gesture; put the sheet back where it belongs
            self.drag = Some(DragSession {
                captured: false,
                ..session
            });
            self.return_to_rest();
            return;
        }

        if !session.captured || !offset_y.is_finite() {
            return;
        }

        let offset = self.elastic_offset(session.start_offset + offset_y);
        self.animator.set_offset(offset);
        self.sync_scroll_lock();
    }

    /// The pointer was released
    pub fn drag_end(&mut self, offset_y: f32, velocity_y: f32) {
        self.arbiter.end_drag();
        let Some(session) = self.drag.take() else {
            return;
        };

        if !session.captured {
            return;
        }

        let decision = release_decision(velocity_y, offset_y, &self.config.gesture);
        tracing::debug!(
            "sheet `{}` released at {:.1} with velocity {:.1}: {:?}",
            self.name,
            offset_y,
            velocity_y,
            decision
        );

        match decision {
            ReleaseDecision::Close => self.close(),
            ReleaseDecision::Restore => self.return_to_rest(),
        }
    }

    /// Scroll report from the inner content
    pub fn on_content_scroll(&mut self, metrics: ScrollMetrics) {
        self.arbiter.on_scroll(metrics);
    }

    /// The inner content's visible or scrollable extent changed
    pub fn set_content_size(&mut self, client_height: f32, scroll_height: f32) {
        self.arbiter.set_content_size(client_height, scroll_height);
    }

    /// Measure the sheet again (viewport resized or scrolled)
    pub fn remeasure(&mut self) {
        let height = self.observer.measure().height_or_zero();
        if height == self.height {
            return;
        }

        tracing::debug!(
            "sheet `{}` height {} -> {}",
            self.name,
            self.height,
            height
        );
        self.height = height;
        if self.is_holding() {
            self.animator.set_height(height);
        } else {
            self.animator.retarget_height(height);
        }
        self.sync_scroll_lock();
    }

    /// Route a unified input event. Returns whether the sheet handled it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if event.propagation_stopped {
            return false;
        }

        match (event.event_type, &event.data) {
            (event_types::DRAG_START, _) => self.drag_start(),
            (event_types::DRAG, EventData::Drag { offset_y }) => self.drag_move(*offset_y),
            (
                event_types::DRAG_END,
                EventData::DragEnd {
                    offset_y,
                    velocity_y,
                },
            ) => self.drag_end(*offset_y, *velocity_y),
            (
                event_types::SCROLL,
                EventData::Scroll {
                    scroll_top,
                    client_height,
                    scroll_height,
                },
            ) => self.on_content_scroll(ScrollMetrics::new(
                *scroll_top,
                *client_height,
                *scroll_height,
            )),
            (event_types::RESIZE, _) => self.remeasure(),
            (event_types::POINTER_UP, _) if event.target == targets::BACKDROP => {
                self.backdrop_pressed()
            }
            _ => return false,
        }
        true
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn offset(&self) -> f32 {
        self.animator.offset()
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn animation_target(&self) -> Visibility {
        self.animator.target()
    }

    pub fn content_edge(&self) -> ContentEdge {
        self.arbiter.content_edge()
    }

    pub fn is_scrollable(&self) -> bool {
        self.arbiter.is_scrollable()
    }

    pub fn drag_allowed(&self) -> bool {
        self.arbiter.drag_allowed()
    }

    pub fn has_played_entrance(&self) -> bool {
        self.has_played_entrance
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating() && !self.is_holding()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Openness in [0, 1]
    pub fn progress(&self) -> f32 {
        self.animator.progress()
    }

    pub fn backdrop(&self) -> BackdropStyle {
        BackdropStyle::compute(self.offset(), self.height, &self.config.backdrop)
    }

    pub fn page_scroll_lock(&self) -> Option<&PageScrollLock> {
        self.scroll_lock.as_ref()
    }

    pub fn state(&self) -> SheetState {
        SheetState {
            offset: self.offset(),
            height: self.height,
            animation_target: self.animation_target(),
            content_edge: self.content_edge(),
            is_scrollable: self.is_scrollable(),
            drag_allowed: self.drag_allowed(),
            has_played_entrance: self.has_played_entrance,
            is_animating: self.is_animating(),
            is_dragging: self.is_dragging(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// A captured drag is holding the sheet under the pointer
    fn is_holding(&self) -> bool {
        self.drag.is_some_and(|d| d.captured)
    }

    /// Resume toward the current target unless the sheet already rests there.
    ///
    /// Grabbing the sheet stops any animation, so every gesture that gives
    /// the sheet back must go through here.
    fn return_to_rest(&mut self) {
        let rest = self.animator.target().resolve(self.height);
        if !self.animator.is_animating() && self.animator.offset() == rest {
            return;
        }
        self.animator.drive_to(self.animator.target());
    }

    /// Map a raw dragged offset into the allowed range.
    ///
    /// Downward travel stops at the hidden position. Upward travel past the
    /// open position stretches with growing resistance, never beyond
    /// `max_overdrag`.
    fn elastic_offset(&self, raw: f32) -> f32 {
        if raw >= 0.0 {
            return raw.min(self.height);
        }

        let max = self.config.gesture.max_overdrag;
        if max <= 0.0 {
            return 0.0;
        }
        let pulled = -raw;
        -(max * pulled / (pulled + max))
    }

    fn sync_scroll_lock(&mut self) {
        let Some(lock) = &self.scroll_lock else {
            return;
        };

        let fully_open = self.height > 0.0 && self.animator.offset() == 0.0;
        match (fully_open, self.scroll_lock_guard.is_some()) {
            (true, false) => self.scroll_lock_guard = Some(lock.acquire(self.name.clone())),
            (false, true) => self.scroll_lock_guard = None,
            _ => {}
        }
    }
}

impl std::fmt::Debug for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sheet")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish()
    }
}
