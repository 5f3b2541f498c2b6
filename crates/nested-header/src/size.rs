use crate::offset_model::OffsetRange;

/// Heights measured in one layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeasuredHeights {
    pub header: f32,
    pub content: f32,
    pub container: f32,
}

impl MeasuredHeights {
    pub fn new(header: f32, content: f32, container: f32) -> Self {
        Self {
            header: non_negative(header),
            content: non_negative(content),
            container: non_negative(container),
        }
    }
}

/// Derives how far the header may collapse.
pub struct SizeNegotiator;

impl SizeNegotiator {
    /// Content that does not fill the container only lets the header
    /// collapse until all of the content is revealed; otherwise the whole
    /// header may scroll away.
    pub fn negotiate(heights: MeasuredHeights) -> OffsetRange {
        let MeasuredHeights {
            header,
            content,
            container,
        } = heights;

        let min = if content < container {
            (container - header - content).min(0.0)
        } else {
            -header
        };
        OffsetRange::new(min, 0.0)
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
