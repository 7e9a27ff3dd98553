//! Input event model
//!
//! Unified input events that hosts translate from their platform layer.
//! A sheet consumes drag reports from its drag surface, scroll reports from
//! its inner content, and resize notifications from the viewport.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Drag gesture captured (pointer down on a drag surface)
    pub const DRAG_START: EventType = 5;
    /// Drag position update (pointer move while captured)
    pub const DRAG: EventType = 6;
    /// Drag ended (pointer released after drag)
    pub const DRAG_END: EventType = 7;
    /// Inner content scroll position changed
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64, // Widget ID
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    /// Vertical drag displacement relative to the drag start point.
    ///
    /// Positive values move down the screen.
    Drag {
        offset_y: f32,
    },
    /// Final drag report at pointer release
    DragEnd {
        offset_y: f32,
        velocity_y: f32,
    },
    /// Scroll position of a scrollable content area
    Scroll {
        scroll_top: f32,
        client_height: f32,
        scroll_height: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: u64, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    pub fn drag_start(target: u64) -> Self {
        Self::new(event_types::DRAG_START, target, EventData::None)
    }

    pub fn drag(target: u64, offset_y: f32) -> Self {
        Self::new(event_types::DRAG, target, EventData::Drag { offset_y })
    }

    pub fn drag_end(target: u64, offset_y: f32, velocity_y: f32) -> Self {
        Self::new(
            event_types::DRAG_END,
            target,
            EventData::DragEnd {
                offset_y,
                velocity_y,
            },
        )
    }

    pub fn scroll(target: u64, scroll_top: f32, client_height: f32, scroll_height: f32) -> Self {
        Self::new(
            event_types::SCROLL,
            target,
            EventData::Scroll {
                scroll_top,
                client_height,
                scroll_height,
            },
        )
    }

    pub fn resize(target: u64, width: f32, height: f32) -> Self {
        Self::new(event_types::RESIZE, target, EventData::Resize { width, height })
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}
