//! Decay curves for Nested Header flings
//!
//! A decay animation has no target: it starts at a value with a velocity and
//! slows down until it comes to rest. Two curves are provided, the Android
//! scroller spline and a plain exponential friction decay.

mod decay;
mod spline;

pub use decay::{
    DecayAnimationSpec, ExponentialDecaySpec, FloatDecayAnimationSpec, SplineBasedDecaySpec,
};
pub use spline::{AndroidFlingSpline, FlingCalculator, FlingInfo, FlingResult};

pub mod prelude {
    pub use crate::decay::{DecayAnimationSpec, FloatDecayAnimationSpec};
}
