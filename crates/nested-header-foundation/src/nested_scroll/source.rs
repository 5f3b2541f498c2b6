use nested_header_graphics::Offset;

/// Where a scroll delta came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NestedScrollSource {
    /// A pointer dragging the scrollable region.
    Drag,
    /// A step of a fling or other inertial animation.
    Fling,
    /// Scrolling requested by code.
    Programmatic,
}

/// A delta offered for consumption together with its origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    pub available: Offset,
    pub source: NestedScrollSource,
}

impl ScrollEvent {
    pub fn new(available: Offset, source: NestedScrollSource) -> Self {
        Self { available, source }
    }

    pub fn drag(dy: f32) -> Self {
        Self::new(Offset::vertical(dy), NestedScrollSource::Drag)
    }

    pub fn fling(dy: f32) -> Self {
        Self::new(Offset::vertical(dy), NestedScrollSource::Fling)
    }

    pub fn programmatic(dy: f32) -> Self {
        Self::new(Offset::vertical(dy), NestedScrollSource::Programmatic)
    }
}
