//! Android scroller fling spline and the physical fling calculator.

use std::sync::LazyLock;

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const NB_SAMPLES: usize = 100;

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// `|ln(0.78) / ln(0.9)|`
const DECELERATION_RATE: f64 = 2.358_201_6;

/// Cubic with control points `a` and `b` evaluated at `t`.
fn cubic(t: f32, a: f32, b: f32) -> f32 {
    3.0 * t * (1.0 - t) * ((1.0 - t) * a + t * b) + t * t * t
}

/// Bisects `[lower, 1]` for the `t` where `cubic(t, a, b) == target`.
///
/// Targets are visited in increasing order, so the caller feeds the previous
/// solution back in as `lower`.
fn solve(target: f32, lower: f32, a: f32, b: f32) -> f32 {
    let mut low = lower;
    let mut high = 1.0f32;
    loop {
        let mid = low + (high - low) / 2.0;
        let value = cubic(mid, a, b);
        if (value - target).abs() < 1e-5 {
            return mid;
        }
        if value > target {
            high = mid;
        } else {
            low = mid;
        }
    }
}

/// Distance fraction sampled at evenly spaced time fractions.
static SPLINE_POSITIONS: LazyLock<[f32; NB_SAMPLES + 1]> = LazyLock::new(|| {
    let mut positions = [0.0f32; NB_SAMPLES + 1];
    let mut x = 0.0f32;
    for (i, slot) in positions.iter_mut().take(NB_SAMPLES).enumerate() {
        let alpha = i as f32 / NB_SAMPLES as f32;
        x = solve(alpha, x, P1, P2);
        *slot = cubic(x, START_TENSION, 1.0);
    }
    positions[NB_SAMPLES] = 1.0;
    positions
});

/// Sample of the fling spline.
#[derive(Debug, Clone, Copy)]
pub struct FlingResult {
    /// Fraction of the total distance travelled, 0.0 to 1.0.
    pub distance_coefficient: f32,
    /// Slope of the distance curve at this point.
    pub velocity_coefficient: f32,
}

/// The fling curve used by `android.widget.Scroller`.
pub struct AndroidFlingSpline;

impl AndroidFlingSpline {
    /// Samples the spline at a time fraction in `[0, 1]`.
    pub fn fling_position(time: f32) -> FlingResult {
        let time = time.clamp(0.0, 1.0);
        let index = (NB_SAMPLES as f32 * time) as usize;
        if index >= NB_SAMPLES {
            return FlingResult {
                distance_coefficient: 1.0,
                velocity_coefficient: 0.0,
            };
        }

        let positions = &*SPLINE_POSITIONS;
        let t_inf = index as f32 / NB_SAMPLES as f32;
        let t_sup = (index + 1) as f32 / NB_SAMPLES as f32;
        let slope = (positions[index + 1] - positions[index]) / (t_sup - t_inf);
        FlingResult {
            distance_coefficient: positions[index] + (time - t_inf) * slope,
            velocity_coefficient: slope,
        }
    }

    pub fn deceleration(velocity: f32, friction: f32) -> f64 {
        (INFLECTION as f64 * velocity.abs() as f64 / friction as f64).ln()
    }
}

/// Distance, duration and direction of one fling.
#[derive(Debug, Clone, Copy)]
pub struct FlingInfo {
    /// Initial velocity in px/sec.
    pub initial_velocity: f32,
    /// Total distance travelled, always positive.
    pub distance: f32,
    /// Total duration in milliseconds.
    pub duration: i64,
}

impl FlingInfo {
    fn progress(&self, time_ms: i64) -> f32 {
        if self.duration > 0 {
            time_ms as f32 / self.duration as f32
        } else {
            1.0
        }
    }

    /// Signed displacement from the start at `time_ms`.
    pub fn position(&self, time_ms: i64) -> f32 {
        let sample = AndroidFlingSpline::fling_position(self.progress(time_ms));
        self.distance * self.initial_velocity.signum() * sample.distance_coefficient
    }

    /// Signed velocity in px/sec at `time_ms`.
    pub fn velocity(&self, time_ms: i64) -> f32 {
        if self.duration <= 0 {
            return 0.0;
        }
        let sample = AndroidFlingSpline::fling_position(self.progress(time_ms));
        sample.velocity_coefficient * self.initial_velocity.signum() * self.distance
            / self.duration as f32
            * 1000.0
    }

    pub fn is_finished(&self, time_ms: i64) -> bool {
        time_ms >= self.duration
    }
}

/// Physical fling model: friction plus screen density.
#[derive(Debug, Clone, Copy)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    /// `ViewConfiguration.getScrollFriction()`
    pub const DEFAULT_FRICTION: f32 = 0.015;

    /// `density` is the screen density factor (1.0 for mdpi, 2.0 for xhdpi).
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * 0.84,
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        AndroidFlingSpline::deceleration(velocity, self.friction * self.physical_coefficient)
    }

    /// Duration of a fling in milliseconds.
    pub fn fling_duration(&self, velocity: f32) -> i64 {
        if velocity == 0.0 {
            return 0;
        }
        let l = self.spline_deceleration(velocity);
        (1000.0 * (l / (DECELERATION_RATE - 1.0)).exp()) as i64
    }

    /// Total distance a fling travels, always positive.
    pub fn fling_distance(&self, velocity: f32) -> f32 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.spline_deceleration(velocity);
        let scale = (DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l).exp() as f32;
        self.friction * self.physical_coefficient * scale
    }

    pub fn fling_info(&self, velocity: f32) -> FlingInfo {
        FlingInfo {
            initial_velocity: velocity,
            distance: self.fling_distance(velocity),
            duration: self.fling_duration(velocity),
        }
    }
}
