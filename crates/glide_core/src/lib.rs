//! Glide Core
//!
//! Foundational primitives shared by the Glide crates:
//!
//! - **Geometry**: `Point` and `Size` in logical pixels
//! - **Color**: RGBA colors with alpha blending helpers
//! - **Events**: a unified input model for pointer, drag, scroll and resize
//! - **State Machines**: enum states with table-style transitions
//!
//! # Example
//!
//! ```rust
//! use glide_core::fsm::{EventId, StateMachine, StateTransitions};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Door {
//!     Open,
//!     Closed,
//! }
//!
//! const PUSH: EventId = 1;
//!
//! impl StateTransitions for Door {
//!     fn on_event(&self, event: EventId) -> Option<Self> {
//!         match (self, event) {
//!             (Door::Closed, PUSH) => Some(Door::Open),
//!             (Door::Open, PUSH) => Some(Door::Closed),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut door = StateMachine::new(Door::Closed);
//! door.send(PUSH);
//! assert_eq!(door.current(), Door::Open);
//! ```

pub mod color;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use color::Color;
pub use events::{Event, EventData, EventType};
pub use fsm::{EventId, StateMachine, StateTransitions};
pub use geometry::{Point, Size};
