//! Pure math/data for offsets, velocities and sizes in Nested Header
//!
//! This crate contains the geometry primitives shared by the layout binder,
//! the nested scroll protocol and the gesture recognizers.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Offset, Point, Rect, Size, Velocity};
}
