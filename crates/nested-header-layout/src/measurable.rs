use crate::Constraints;
use nested_header_graphics::Size;

/// A region the container can measure: the host's header or content.
///
/// Implementations must return a size within `constraints`; the container
/// constrains the result again before using it.
pub trait Measurable {
    fn measure(&self, constraints: Constraints) -> Size;
}

impl<F> Measurable for F
where
    F: Fn(Constraints) -> Size,
{
    fn measure(&self, constraints: Constraints) -> Size {
        self(constraints)
    }
}

/// A measurable with a fixed preferred size, clamped to the constraints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSize(pub Size);

impl Measurable for FixedSize {
    fn measure(&self, constraints: Constraints) -> Size {
        Size::new(
            constraints.constrain_width(self.0.width),
            constraints.constrain_height(self.0.height),
        )
    }
}
