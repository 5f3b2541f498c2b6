pub mod vertical_drag;

pub use vertical_drag::{
    AxisLockStrictness, DragRecognizerConfig, DragState, RejectReason, VerticalDragRecognizer,
};
