//! Splitting an offered delta into a legal consumed part and a leftover.
//!
//! "Legal" means same sign as the offer and no larger in magnitude, checked
//! per axis. The same rule applies to scroll distances and fling velocities.

use nested_header_graphics::{Offset, Velocity};
use std::fmt::Debug;
use std::ops::{Add, Sub};

/// Clamps `value` into `[0, available]` or `[available, 0]`; `0` when nothing
/// is available.
pub fn coerce_to_available(value: f32, available: f32) -> f32 {
    if available > 0.0 {
        value.clamp(0.0, available)
    } else if available < 0.0 {
        value.clamp(available, 0.0)
    } else {
        0.0
    }
}

/// Two-axis quantities that take part in nested scrolling.
pub trait ScrollVector:
    Copy + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self>
{
    fn from_xy(x: f32, y: f32) -> Self;
    fn x(&self) -> f32;
    fn y(&self) -> f32;

    fn zero() -> Self {
        Self::from_xy(0.0, 0.0)
    }

    fn coerce_to_available(self, available: Self) -> Self {
        Self::from_xy(
            coerce_to_available(self.x(), available.x()),
            coerce_to_available(self.y(), available.y()),
        )
    }
}

impl ScrollVector for Offset {
    fn from_xy(x: f32, y: f32) -> Self {
        Offset::new(x, y)
    }

    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }
}

impl ScrollVector for Velocity {
    fn from_xy(x: f32, y: f32) -> Self {
        Velocity::new(x, y)
    }

    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }
}

fn is_legal_part(consumed: f32, available: f32) -> bool {
    if consumed == 0.0 {
        return true;
    }
    let tolerance = 1e-4 * available.abs().max(1.0);
    consumed.signum() == available.signum() && consumed.abs() <= available.abs() + tolerance
}

/// How an offered quantity was split.
///
/// `consumed + leftover == available`, and `consumed` is legal for
/// `available` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConsumptionResult<T = Offset> {
    pub consumed: T,
    pub leftover: T,
}

impl<T: ScrollVector> ConsumptionResult<T> {
    /// Builds a result from parts reported by a collaborator.
    ///
    /// # Panics
    /// When `consumed` and `leftover` disagree in sign with their sum or
    /// `consumed` exceeds it. Such a reply is a bug in the collaborator.
    pub fn new(consumed: T, leftover: T) -> Self {
        let available = consumed + leftover;
        assert!(
            is_legal_part(consumed.x(), available.x())
                && is_legal_part(consumed.y(), available.y()),
            "inconsistent consumption: consumed {:?} leftover {:?}",
            consumed,
            leftover
        );
        Self { consumed, leftover }
    }

    /// Splits `available`, coercing `candidate` into a legal consumed part.
    pub fn split(available: T, candidate: T) -> Self {
        let consumed = candidate.coerce_to_available(available);
        Self {
            consumed,
            leftover: available - consumed,
        }
    }

    /// Nothing consumed.
    pub fn none(available: T) -> Self {
        Self {
            consumed: T::zero(),
            leftover: available,
        }
    }

    pub fn available(&self) -> T {
        self.consumed + self.leftover
    }

    pub fn is_fully_consumed(&self) -> bool {
        self.leftover == T::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_keeps_sign_and_bounds() {
        assert_eq!(coerce_to_available(30.0, 50.0), 30.0);
        assert_eq!(coerce_to_available(80.0, 50.0), 50.0);
        assert_eq!(coerce_to_available(-10.0, 50.0), 0.0);
        assert_eq!(coerce_to_available(-80.0, -50.0), -50.0);
        assert_eq!(coerce_to_available(20.0, -50.0), 0.0);
        assert_eq!(coerce_to_available(20.0, 0.0), 0.0);
    }

    #[test]
    fn coerce_applies_per_axis() {
        let consumed = Offset::new(10.0, -200.0).coerce_to_available(Offset::new(-5.0, -50.0));
        assert_eq!(consumed, Offset::new(0.0, -50.0));

        let velocity = Velocity::vertical(4000.0).coerce_to_available(Velocity::vertical(1500.0));
        assert_eq!(velocity, Velocity::vertical(1500.0));
    }

    #[test]
    fn split_computes_leftover() {
        let result = ConsumptionResult::split(Offset::vertical(-150.0), Offset::vertical(-100.0));
        assert_eq!(result.consumed, Offset::vertical(-100.0));
        assert_eq!(result.leftover, Offset::vertical(-50.0));
        assert_eq!(result.available(), Offset::vertical(-150.0));
        assert!(!result.is_fully_consumed());
    }

    #[test]
    fn split_clamps_overclaim() {
        let result =
            ConsumptionResult::split(Velocity::vertical(-800.0), Velocity::vertical(-900.0));
        assert_eq!(result.consumed, Velocity::vertical(-800.0));
        assert!(result.is_fully_consumed());
    }

    #[test]
    fn none_consumes_nothing() {
        let result = ConsumptionResult::none(Offset::vertical(12.0));
        assert_eq!(result.consumed, Offset::ZERO);
        assert_eq!(result.leftover, Offset::vertical(12.0));
    }

    #[test]
    fn new_accepts_consistent_parts() {
        let result = ConsumptionResult::new(Offset::vertical(-100.0), Offset::vertical(-50.0));
        assert_eq!(result.available(), Offset::vertical(-150.0));
    }

    #[test]
    #[should_panic(expected = "inconsistent consumption")]
    fn new_rejects_opposite_signs() {
        ConsumptionResult::new(Offset::vertical(-10.0), Offset::vertical(20.0));
    }
}
