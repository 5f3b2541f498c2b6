//! Release velocity estimation.
//!
//! Impulse strategy as in Jetpack Compose's `VelocityTracker1D`: the
//! velocity is derived from the kinetic energy the recent samples imparted,
//! which is less jittery than a straight line fit on short drags.

use nested_header_graphics::{Point, Velocity};

const HISTORY_SIZE: usize = 20;

/// Only samples this recent take part in the estimate.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Single-axis tracker over absolute positions.
#[derive(Clone)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    /// Samples within the horizon, newest first, stopping at the first pause.
    /// Times are relative to the newest sample and therefore `<= 0`.
    fn recent(&self) -> Vec<(f32, f32)> {
        let Some(newest) = self.samples[self.newest] else {
            return Vec::new();
        };

        let mut recent = Vec::with_capacity(HISTORY_SIZE);
        let mut index = self.newest;
        let mut previous_time = newest.time_ms;
        while let Some(sample) = self.samples[index] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (previous_time - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            recent.push((-(age as f32), sample.position));
            previous_time = sample.time_ms;

            if recent.len() == HISTORY_SIZE {
                break;
            }
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }
        recent
    }

    /// Velocity in units per second; 0 with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let recent = self.recent();
        if recent.len() < 2 {
            return 0.0;
        }

        // Oldest to newest.
        let mut work = 0.0f32;
        let oldest = recent.len() - 1;
        for i in (1..=oldest).rev() {
            let (time, position) = recent[i];
            let (next_time, next_position) = recent[i - 1];
            if time == next_time {
                continue;
            }
            let v_curr = (next_position - position) / (next_time - time);
            let v_prev = kinetic_energy_to_velocity(work);
            work += (v_curr - v_prev) * v_curr.abs();
            if i == oldest {
                work *= 0.5;
            }
        }

        kinetic_energy_to_velocity(work) * 1000.0
    }

    /// Like [`calculate_velocity`](Self::calculate_velocity), capped to
    /// `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// `E = 0.5 * v^2` with unit mass.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

/// Two-axis tracker fed with pointer positions.
#[derive(Clone, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, time_ms: i64, position: Point) {
        self.x.add_data_point(time_ms, position.x);
        self.y.add_data_point(time_ms, position.y);
    }

    pub fn calculate_velocity(&self) -> Velocity {
        Velocity::new(self.x.calculate_velocity(), self.y.calculate_velocity())
    }

    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> Velocity {
        Velocity::new(
            self.x.calculate_velocity_with_max(max_velocity),
            self.y.calculate_velocity_with_max(max_velocity),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}
