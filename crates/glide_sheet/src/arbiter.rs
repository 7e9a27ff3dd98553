//! Gesture arbitration
//!
//! A sheet has a single vertical drag surface that serves two purposes:
//! moving the sheet itself, and scrolling the content inside it. The
//! arbiter decides which one a drag belongs to.
//!
//! It tracks which edge of the content's scroll range is at rest
//! ([`ContentEdge`]) and derives from it whether the sheet may currently be
//! dragged. Content resting at an edge lets the sheet move. Content in the
//! middle of its range keeps the drag for scrolling, but only when the
//! content can actually scroll; otherwise nothing would ever scroll it back
//! to an edge and the sheet would be stuck.
//!
//! During a drag, travel toward the content's far side while the content
//! rests at an edge (down at the top, up at the bottom) is read as the user
//! starting to scroll. The edge becomes `InProgress`, which revokes sheet
//! dragging for the rest of that gesture.

use glide_core::fsm::{EventId, StateMachine, StateTransitions};
use serde::{Deserialize, Serialize};

use crate::config::GestureConfig;

/// Events driving the [`ContentEdge`] machine
pub mod edge_events {
    use glide_core::fsm::EventId;

    /// Content scrolled to its top edge
    pub const REACHED_TOP: EventId = 100;
    /// Content scrolled to its bottom edge
    pub const REACHED_BOTTOM: EventId = 101;
    /// Content scrolled to somewhere between its edges
    pub const SCROLLED: EventId = 102;
    /// Drag travelling down while the content rests at its top
    pub const PUSHED_FROM_TOP: EventId = 103;
    /// Drag travelling up while the content rests at its bottom
    pub const PUSHED_FROM_BOTTOM: EventId = 104;
    /// Content rewound (sheet closed)
    pub const RESET: EventId = 105;
}

/// Which edge of the content's scroll range is at rest
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentEdge {
    #[default]
    Top,
    Bottom,
    /// Mid-scroll, or a drag has been claimed for scrolling
    InProgress,
}

impl StateTransitions for ContentEdge {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use edge_events::*;
        match (self, event) {
            (_, REACHED_TOP) | (_, RESET) => Some(ContentEdge::Top),
            (_, REACHED_BOTTOM) => Some(ContentEdge::Bottom),
            (_, SCROLLED) => Some(ContentEdge::InProgress),
            (ContentEdge::Top, PUSHED_FROM_TOP) => Some(ContentEdge::InProgress),
            (ContentEdge::Bottom, PUSHED_FROM_BOTTOM) => Some(ContentEdge::InProgress),
            _ => None,
        }
    }
}

/// Scroll position report from the sheet's inner content
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub client_height: f32,
    pub scroll_height: f32,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f32, client_height: f32, scroll_height: f32) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    /// All three measurements are finite numbers
    pub fn is_valid(&self) -> bool {
        self.scroll_top.is_finite() && self.client_height.is_finite() && self.scroll_height.is_finite()
    }

    /// Whether the scrollable extent exceeds the visible extent by more than `slack`
    pub fn is_scrollable(&self, slack: f32) -> bool {
        self.scroll_height > self.client_height + slack
    }

    /// Classify the scroll position
    pub fn edge(&self) -> ContentEdge {
        // Elastic overscroll above the top reports negative positions
        if self.scroll_top <= 0.0 {
            ContentEdge::Top
        } else if self.scroll_top + self.client_height >= self.scroll_height {
            ContentEdge::Bottom
        } else {
            ContentEdge::InProgress
        }
    }

    fn edge_event(&self) -> EventId {
        match self.edge() {
            ContentEdge::Top => edge_events::REACHED_TOP,
            ContentEdge::Bottom => edge_events::REACHED_BOTTOM,
            ContentEdge::InProgress => edge_events::SCROLLED,
        }
    }
}

/// Whether the sheet itself responds to a vertical drag
pub fn drag_allowed(edge: ContentEdge, is_scrollable: bool, draggable: bool) -> bool {
    draggable && (edge != ContentEdge::InProgress || !is_scrollable)
}

/// Outcome of releasing a sheet drag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// Dismiss the sheet
    Close,
    /// Spring back to the pre-drag target
    Restore,
}

/// Decide what a release does.
///
/// A fast downward flick closes regardless of position. A release that is
/// not moving upward closes once the sheet has been pulled past
/// `close_distance`. Anything else springs back.
pub fn release_decision(velocity_y: f32, offset_y: f32, gesture: &GestureConfig) -> ReleaseDecision {
    let flicked = velocity_y > gesture.flick_velocity;
    let pulled = velocity_y >= 0.0 && offset_y > gesture.close_distance;

    if flicked || pulled {
        ReleaseDecision::Close
    } else {
        ReleaseDecision::Restore
    }
}

/// Tracks content scroll state and decides whether drags move the sheet
#[derive(Clone, Debug)]
pub struct GestureArbiter {
    edge: StateMachine<ContentEdge>,
    is_scrollable: bool,
    draggable: bool,
    scrollable_slack: f32,
    drag_allowed: bool,
    /// Last reported drag offset, `Some` while a drag is active
    last_drag_offset: Option<f32>,
    /// Edge in effect before the active gesture was claimed for scrolling
    revoked_from: Option<ContentEdge>,
}

/// Transitions kept for debugging
const EDGE_HISTORY: usize = 32;

impl GestureArbiter {
    pub fn new(draggable: bool, scrollable_slack: f32) -> Self {
        let edge = StateMachine::new(ContentEdge::Top).with_history_limit(EDGE_HISTORY);
        Self {
            drag_allowed: drag_allowed(edge.current(), false, draggable),
            edge,
            is_scrollable: false,
            draggable,
            scrollable_slack,
            last_drag_offset: None,
            revoked_from: None,
        }
    }

    pub fn content_edge(&self) -> ContentEdge {
        self.edge.current()
    }

    pub fn is_scrollable(&self) -> bool {
        self.is_scrollable
    }

    pub fn drag_allowed(&self) -> bool {
        self.drag_allowed
    }

    pub fn is_dragging(&self) -> bool {
        self.last_drag_offset.is_some()
    }

    /// Recorded edge transitions, oldest first
    pub fn history(&self) -> &[(ContentEdge, EventId, ContentEdge)] {
        self.edge.history()
    }

    /// Handle a scroll report from the inner content
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        if !self.draggable {
            return;
        }
        if !metrics.is_valid() {
            tracing::debug!("ignoring scroll report with non-finite metrics: {:?}", metrics);
            return;
        }

        // A real scroll position supersedes any edge a drag forced
        self.revoked_from = None;
        self.is_scrollable = metrics.is_scrollable(self.scrollable_slack);
        self.send(metrics.edge_event());
    }

    /// Content or viewport size changed
    pub fn set_content_size(&mut self, client_height: f32, scroll_height: f32) {
        let metrics = ScrollMetrics::new(0.0, client_height, scroll_height);
        if !metrics.is_valid() {
            return;
        }
        self.is_scrollable = metrics.is_scrollable(self.scrollable_slack);
        self.recompute();
    }

    /// A drag was captured by the sheet's drag surface
    pub fn begin_drag(&mut self) {
        self.restore_revoked_edge();
        self.last_drag_offset = Some(0.0);
    }

    /// Handle a drag position report.
    ///
    /// Returns `true` if this report revoked sheet dragging.
    pub fn on_drag(&mut self, offset_y: f32) -> bool {
        let previous = self.last_drag_offset.unwrap_or(0.0);
        self.last_drag_offset = Some(offset_y);

        if !self.draggable || !self.is_scrollable || !offset_y.is_finite() {
            return false;
        }

        let travel = offset_y - previous;
        let event = if travel > 0.0 {
            edge_events::PUSHED_FROM_TOP
        } else if travel < 0.0 {
            edge_events::PUSHED_FROM_BOTTOM
        } else {
            return false;
        };
        // Pushing only matters at the matching edge
        if !self.edge.can_send(event) {
            return false;
        }

        let was_allowed = self.drag_allowed;
        let before = self.edge.current();
        self.send(event);
        let revoked = was_allowed && !self.drag_allowed;
        if revoked {
            self.revoked_from = Some(before);
            tracing::debug!("drag claimed by content scroll at offset {offset_y:.1}");
        }
        revoked
    }

    /// The active drag was released
    pub fn end_drag(&mut self) {
        self.last_drag_offset = None;
        self.restore_revoked_edge();
    }

    /// Rewind to the top edge (content scrolled back to its start)
    pub fn reset(&mut self) {
        self.last_drag_offset = None;
        self.revoked_from = None;
        self.send(edge_events::RESET);
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
        self.recompute();
    }

    /// Undo an edge forced by a claimed gesture. Content at an edge cannot
    /// scroll further that way, so no scroll report would ever undo it.
    fn restore_revoked_edge(&mut self) {
        let Some(edge) = self.revoked_from.take() else {
            return;
        };
        if !self.edge.is_in(ContentEdge::InProgress) {
            return;
        }
        let event = match edge {
            ContentEdge::Top => edge_events::REACHED_TOP,
            ContentEdge::Bottom => edge_events::REACHED_BOTTOM,
            ContentEdge::InProgress => return,
        };
        tracing::debug!("gesture over, content edge back to {:?}", edge);
        self.send(event);
    }

    fn send(&mut self, event: EventId) {
        let before = self.edge.current();
        let after = self.edge.send(event);
        if before != after {
            tracing::debug!("content edge {:?} -> {:?}", before, after);
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        let allowed = drag_allowed(self.edge.current(), self.is_scrollable, self.draggable);
        if allowed != self.drag_allowed {
            tracing::debug!(
                "drag allowed {} -> {} (edge={:?}, scrollable={})",
                self.drag_allowed,
                allowed,
                self.edge.current(),
                self.is_scrollable
            );
        }
        self.drag_allowed = allowed;
    }
}
