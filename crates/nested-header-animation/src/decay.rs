//! Decay animation specs.

use crate::spline::FlingCalculator;

/// A velocity-driven animation that slows down to rest on its own.
///
/// The final value depends only on the initial value and velocity.
pub trait FloatDecayAnimationSpec {
    /// Velocity below which the animation counts as finished.
    fn abs_velocity_threshold(&self) -> f32;

    fn get_value_from_nanos(&self, play_time_nanos: i64, initial_value: f32, initial_velocity: f32)
        -> f32;

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    fn get_duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64;

    /// Where the animation comes to rest.
    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Android scroller feel, sized by screen density.
#[derive(Debug, Clone, Copy)]
pub struct SplineBasedDecaySpec {
    calculator: FlingCalculator,
}

impl SplineBasedDecaySpec {
    pub fn new(density: f32) -> Self {
        Self {
            calculator: FlingCalculator::with_density(density),
        }
    }

    pub fn with_calculator(calculator: FlingCalculator) -> Self {
        Self { calculator }
    }
}

impl FloatDecayAnimationSpec for SplineBasedDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        0.0
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let info = self.calculator.fling_info(initial_velocity);
        initial_value + info.position(play_time_nanos / 1_000_000)
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let info = self.calculator.fling_info(initial_velocity);
        info.velocity(play_time_nanos / 1_000_000)
    }

    fn get_duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        self.calculator.fling_duration(initial_velocity) * 1_000_000
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        initial_value + self.calculator.fling_distance(initial_velocity) * initial_velocity.signum()
    }
}

const EXPONENTIAL_DECAY_FRICTION: f32 = -4.2;

/// Velocity decays as `v * e^(friction * t)`.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialDecaySpec {
    friction: f32,
    abs_velocity_threshold: f32,
}

impl ExponentialDecaySpec {
    pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 0.1;

    /// Larger `friction_multiplier` stops sooner.
    pub fn new(friction_multiplier: f32, abs_velocity_threshold: f32) -> Self {
        Self {
            friction: EXPONENTIAL_DECAY_FRICTION * friction_multiplier.max(0.0001),
            abs_velocity_threshold: abs_velocity_threshold.abs().max(0.000_000_1),
        }
    }

    fn play_time_seconds(play_time_nanos: i64) -> f32 {
        play_time_nanos as f32 / 1_000_000_000.0
    }

    fn duration_seconds(&self, initial_velocity: f32) -> f32 {
        if initial_velocity.abs() <= self.abs_velocity_threshold {
            return 0.0;
        }
        (self.abs_velocity_threshold / initial_velocity.abs()).ln() / self.friction
    }
}

impl Default for ExponentialDecaySpec {
    fn default() -> Self {
        Self::new(1.0, Self::DEFAULT_VELOCITY_THRESHOLD)
    }
}

impl FloatDecayAnimationSpec for ExponentialDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.abs_velocity_threshold
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let t = Self::play_time_seconds(play_time_nanos);
        let travel = initial_velocity / self.friction;
        initial_value - travel + travel * (self.friction * t).exp()
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        initial_velocity * (self.friction * Self::play_time_seconds(play_time_nanos)).exp()
    }

    fn get_duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        (self.duration_seconds(initial_velocity) * 1_000_000_000.0) as i64
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        let duration = self.duration_seconds(initial_velocity);
        if duration == 0.0 {
            return initial_value;
        }
        let travel = initial_velocity / self.friction;
        initial_value - travel + travel * (self.friction * duration).exp()
    }
}

/// The decay curves a fling can be configured with.
#[derive(Debug, Clone, Copy)]
pub enum DecayAnimationSpec {
    Spline(SplineBasedDecaySpec),
    Exponential(ExponentialDecaySpec),
}

impl DecayAnimationSpec {
    fn inner(&self) -> &dyn FloatDecayAnimationSpec {
        match self {
            DecayAnimationSpec::Spline(spec) => spec,
            DecayAnimationSpec::Exponential(spec) => spec,
        }
    }
}

impl FloatDecayAnimationSpec for DecayAnimationSpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.inner().abs_velocity_threshold()
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        self.inner()
            .get_value_from_nanos(play_time_nanos, initial_value, initial_velocity)
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        self.inner()
            .get_velocity_from_nanos(play_time_nanos, initial_value, initial_velocity)
    }

    fn get_duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64 {
        self.inner()
            .get_duration_nanos(initial_value, initial_velocity)
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        self.inner().get_target_value(initial_value, initial_velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spline_decay_ends_near_target() {
        let spec = SplineBasedDecaySpec::new(2.0);
        let initial_value = 100.0;
        let velocity = 5000.0;

        let start = spec.get_value_from_nanos(0, initial_value, velocity);
        assert!((start - initial_value).abs() < 1.0);

        let duration = spec.get_duration_nanos(initial_value, velocity);
        let target = spec.get_target_value(initial_value, velocity);
        let end = spec.get_value_from_nanos(duration, initial_value, velocity);
        assert!(
            (end - target).abs() < 10.0,
            "end {} should be near target {}",
            end,
            target
        );
    }

    #[test]
    fn exponential_decay_slows_down() {
        let spec = ExponentialDecaySpec::default();
        let v0 = spec.get_velocity_from_nanos(0, 0.0, -2000.0);
        let v1 = spec.get_velocity_from_nanos(100_000_000, 0.0, -2000.0);
        let v2 = spec.get_velocity_from_nanos(400_000_000, 0.0, -2000.0);

        assert_eq!(v0, -2000.0);
        assert!(v1 < 0.0 && v1.abs() < v0.abs());
        assert!(v2.abs() < v1.abs());
    }

    #[test]
    fn exponential_decay_reaches_target_at_duration() {
        let spec = ExponentialDecaySpec::default();
        let duration = spec.get_duration_nanos(0.0, 1500.0);
        assert!(duration > 0);

        let target = spec.get_target_value(0.0, 1500.0);
        let end = spec.get_value_from_nanos(duration, 0.0, 1500.0);
        assert!((end - target).abs() < 0.5);
        // Total travel of v / |friction|.
        assert!((target - 1500.0 / 4.2).abs() < 1.0);
        assert!(spec.get_velocity_from_nanos(duration, 0.0, 1500.0).abs() <= 0.11);
    }

    #[test]
    fn exponential_decay_below_threshold_does_not_move() {
        let spec = ExponentialDecaySpec::default();
        assert_eq!(spec.get_duration_nanos(10.0, 0.05), 0);
        assert_eq!(spec.get_target_value(10.0, 0.05), 10.0);
    }

    #[test]
    fn enum_delegates_to_curve() {
        let spline = DecayAnimationSpec::Spline(SplineBasedDecaySpec::new(1.0));
        let exponential = DecayAnimationSpec::Exponential(ExponentialDecaySpec::default());

        assert_eq!(spline.abs_velocity_threshold(), 0.0);
        assert_eq!(
            exponential.abs_velocity_threshold(),
            ExponentialDecaySpec::DEFAULT_VELOCITY_THRESHOLD
        );
        assert!(spline.get_target_value(0.0, -3000.0) < 0.0);
        assert!(exponential.get_target_value(0.0, -3000.0) < 0.0);
    }
}
