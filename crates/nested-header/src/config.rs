//! Tunables for a nested header instance.

use nested_header_animation::{DecayAnimationSpec, ExponentialDecaySpec, SplineBasedDecaySpec};
use nested_header_foundation::{
    AxisLockStrictness, DragRecognizerConfig, DRAG_THRESHOLD, MAX_FLING_VELOCITY,
    MIN_FLING_VELOCITY,
};

/// Curve a header fling decays along.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecayCurve {
    /// Android scroller spline at the given screen density.
    Spline { density: f32 },
    /// Exponential friction; larger multipliers stop sooner.
    Exponential { friction_multiplier: f32 },
}

impl Default for DecayCurve {
    fn default() -> Self {
        DecayCurve::Spline { density: 1.0 }
    }
}

impl DecayCurve {
    pub fn to_spec(self) -> DecayAnimationSpec {
        match self {
            DecayCurve::Spline { density } => {
                DecayAnimationSpec::Spline(SplineBasedDecaySpec::new(density))
            }
            DecayCurve::Exponential {
                friction_multiplier,
            } => DecayAnimationSpec::Exponential(ExponentialDecaySpec::new(
                friction_multiplier,
                ExponentialDecaySpec::DEFAULT_VELOCITY_THRESHOLD,
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NestedHeaderConfig {
    /// Release velocities below this (px/sec) do not fling.
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
    pub touch_slop: f32,
    pub axis_lock: AxisLockStrictness,
    pub decay: DecayCurve,
    /// Ignore scroll coming from the content while a finger is on the header.
    pub header_touch_suppresses_content_scroll: bool,
    /// Scrolling the content stops a running header fling.
    pub content_scroll_interrupts_fling: bool,
    /// Emit gesture and fling lifecycle lines at `info` level.
    pub debug: bool,
}

impl Default for NestedHeaderConfig {
    fn default() -> Self {
        Self {
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
            touch_slop: DRAG_THRESHOLD,
            axis_lock: AxisLockStrictness::Balanced,
            decay: DecayCurve::default(),
            header_touch_suppresses_content_scroll: true,
            content_scroll_interrupts_fling: false,
            debug: false,
        }
    }
}

impl NestedHeaderConfig {
    pub fn with_min_fling_velocity(mut self, velocity: f32) -> Self {
        self.min_fling_velocity = velocity.abs();
        self
    }

    pub fn with_max_fling_velocity(mut self, velocity: f32) -> Self {
        self.max_fling_velocity = velocity.abs();
        self
    }

    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop.max(0.0);
        self
    }

    pub fn with_axis_lock(mut self, axis_lock: AxisLockStrictness) -> Self {
        self.axis_lock = axis_lock;
        self
    }

    pub fn with_decay(mut self, decay: DecayCurve) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_header_touch_suppresses_content_scroll(mut self, enabled: bool) -> Self {
        self.header_touch_suppresses_content_scroll = enabled;
        self
    }

    pub fn with_content_scroll_interrupts_fling(mut self, enabled: bool) -> Self {
        self.content_scroll_interrupts_fling = enabled;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn drag_recognizer_config(&self) -> DragRecognizerConfig {
        DragRecognizerConfig {
            touch_slop: self.touch_slop,
            axis_lock: self.axis_lock,
            max_fling_velocity: self.max_fling_velocity,
        }
    }
}
