//! Measures and places the header and content regions.

use crate::offset_model::OffsetRange;
use crate::state::NestedHeaderState;
use nested_header_graphics::{Point, Rect, Size};
use nested_header_layout::{Constraints, Measurable};

/// Where the two regions go for the current offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NestedHeaderLayoutResult {
    /// Size of the container.
    pub size: Size,
    /// Header bounds, shifted up by the offset.
    pub header: Rect,
    /// Content bounds, directly below the header.
    pub content: Rect,
    pub range: OffsetRange,
    /// Visible height below the header, for hosts that shrink the content
    /// instead of letting the container clip it.
    pub content_viewport_height: f32,
}

pub struct NestedHeaderLayout;

impl NestedHeaderLayout {
    /// Runs one layout pass.
    ///
    /// The header is measured with unbounded height, the content against the
    /// container constraints. A fixed container dimension is used as is,
    /// otherwise the container wraps its children. The measured heights feed
    /// [`NestedHeaderState::set_size`] before anything is placed.
    pub fn measure(
        state: &NestedHeaderState,
        constraints: Constraints,
        header: &dyn Measurable,
        content: &dyn Measurable,
    ) -> NestedHeaderLayoutResult {
        let child_constraints = constraints.loosen();

        let header_size = sanitize(
            header.measure(child_constraints.with_unbounded_height()),
            child_constraints.with_unbounded_height(),
        );
        let content_size = sanitize(content.measure(child_constraints), child_constraints);

        let width = if constraints.has_fixed_width() {
            constraints.max_width
        } else {
            constraints.constrain_width(header_size.width.max(content_size.width))
        };
        let height = if constraints.has_fixed_height() {
            constraints.max_height
        } else {
            constraints.constrain_height(header_size.height + content_size.height)
        };

        let range = state.set_size(header_size.height, content_size.height, height);
        let offset = state.offset();
        log::trace!(
            "nested header layout {}x{} header {} content {} offset {}",
            width,
            height,
            header_size.height,
            content_size.height,
            offset
        );

        NestedHeaderLayoutResult {
            size: Size::new(width, height),
            header: Rect::from_origin_size(Point::new(0.0, offset), header_size),
            content: Rect::from_origin_size(
                Point::new(0.0, header_size.height + offset),
                content_size,
            ),
            range,
            content_viewport_height: (height - header_size.height - offset).max(0.0),
        }
    }
}

/// Children may misreport; keep their sizes finite and within bounds.
fn sanitize(size: Size, constraints: Constraints) -> Size {
    let finite = |value: f32| if value.is_finite() { value } else { 0.0 };
    Size::new(
        finite(constraints.constrain_width(finite(size.width))),
        finite(constraints.constrain_height(finite(size.height))),
    )
}
