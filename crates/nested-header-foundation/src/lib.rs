//! Nested scroll protocol, pointer input and gesture recognition
//!
//! The pieces here know nothing about headers: they split scroll and fling
//! offers between nested parties, turn raw pointer samples into a vertical
//! drag, and estimate release velocity.

pub mod coerce;
pub mod gesture_constants;
pub mod nested_scroll;
pub mod nodes;
pub mod velocity_tracker;

pub use coerce::{coerce_to_available, ConsumptionResult, ScrollVector};
pub use gesture_constants::*;
pub use nested_scroll::{
    NestedScrollConnection, NestedScrollDispatcher, NestedScrollNode, NestedScrollSource,
    NoOpConnection, ScrollEvent,
};
pub use nodes::input::gestures::{
    AxisLockStrictness, DragRecognizerConfig, DragState, RejectReason, VerticalDragRecognizer,
};
pub use nodes::input::{PointerEvent, PointerEventKind, PointerId};
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::coerce::{coerce_to_available, ConsumptionResult};
    pub use crate::nested_scroll::{
        NestedScrollConnection, NestedScrollDispatcher, NestedScrollSource, ScrollEvent,
    };
    pub use crate::nodes::input::{PointerEvent, PointerEventKind};
}
