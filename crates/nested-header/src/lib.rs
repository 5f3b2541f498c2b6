//! Collapsing header driven by nested scrolling
//!
//! A container stacks a header above a content region. Dragging the header,
//! or scrolling the content, moves the header offset between 0 (expanded)
//! and the collapsed minimum; releases continue as flings. Hosts feed
//! layout passes and pointer events into [`NestedHeaderState`] and place
//! their views with [`NestedHeaderLayout`].

macro_rules! lifecycle {
    ($debug:expr, $($arg:tt)+) => {
        if $debug {
            log::info!(target: "nested_header", $($arg)+);
        }
    };
}
pub(crate) use lifecycle;

mod config;
mod content;
mod fling;
mod header_gesture;
mod layout;
mod offset_model;
mod size;
mod state;

pub use config::{DecayCurve, NestedHeaderConfig};
pub use fling::{FlingController, FlingOutcome, BOUNDARY_EPSILON};
pub use layout::{NestedHeaderLayout, NestedHeaderLayoutResult};
pub use offset_model::{OffsetModel, OffsetRange};
pub use size::{MeasuredHeights, SizeNegotiator};
pub use state::{HeaderVisibility, NestedHeaderState, OffsetListenerId, SavedNestedHeaderState};

pub use nested_header_foundation::{
    AxisLockStrictness, ConsumptionResult, NestedScrollConnection, NestedScrollDispatcher,
    NestedScrollNode, NestedScrollSource, NoOpConnection, PointerEvent, PointerEventKind,
    ScrollEvent,
};
pub use nested_header_graphics::{Offset, Point, Rect, Size, Velocity};
pub use nested_header_layout::{Constraints, FixedSize, Measurable};

pub mod prelude {
    pub use crate::config::{DecayCurve, NestedHeaderConfig};
    pub use crate::layout::{NestedHeaderLayout, NestedHeaderLayoutResult};
    pub use crate::state::{HeaderVisibility, NestedHeaderState, SavedNestedHeaderState};
    pub use nested_header_foundation::prelude::*;
}
