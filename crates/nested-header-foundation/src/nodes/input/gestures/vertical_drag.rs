//! Vertical drag recognition with touch slop and axis locking.

use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use crate::nodes::input::{PointerEvent, PointerId};
use crate::velocity_tracker::VelocityTracker;
use nested_header_graphics::Point;

/// How a gesture that leaves the slop diagonally is decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisLockStrictness {
    /// A tie between the axes rejects the drag.
    Strict,
    /// A tie keeps sampling until one axis dominates.
    #[default]
    Balanced,
    /// A tie commits the drag.
    Lenient,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRecognizerConfig {
    pub touch_slop: f32,
    pub axis_lock: AxisLockStrictness,
    pub max_fling_velocity: f32,
}

impl Default for DragRecognizerConfig {
    fn default() -> Self {
        Self {
            touch_slop: DRAG_THRESHOLD,
            axis_lock: AxisLockStrictness::default(),
            max_fling_velocity: MAX_FLING_VELOCITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The pointer left the slop moving mostly sideways.
    HorizontalAxis,
    /// Someone else claimed a sample before the drag committed.
    AlreadyConsumed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Sampling,
    Committed,
    Rejected(RejectReason),
}

/// Turns one pointer's samples into vertical drag deltas and a release
/// velocity.
///
/// `Idle -> Sampling -> Committed | Rejected -> Idle`. Only the pointer that
/// started the sequence is tracked; samples from other pointers are ignored.
pub struct VerticalDragRecognizer {
    config: DragRecognizerConfig,
    state: DragState,
    pointer: Option<PointerId>,
    down_position: Point,
    down_time_ms: i64,
    last_position: Point,
    velocity_tracker: VelocityTracker,
}

impl Default for VerticalDragRecognizer {
    fn default() -> Self {
        Self::new(DragRecognizerConfig::default())
    }
}

impl VerticalDragRecognizer {
    pub fn new(config: DragRecognizerConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
            pointer: None,
            down_position: Point::ZERO,
            down_time_ms: 0,
            last_position: Point::ZERO,
            velocity_tracker: VelocityTracker::new(),
        }
    }

    pub fn config(&self) -> DragRecognizerConfig {
        self.config
    }

    pub fn set_config(&mut self, config: DragRecognizerConfig) {
        self.config = config;
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Committed
    }

    /// Whether a sequence is in progress, whatever its outcome so far.
    pub fn is_tracking(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn tracked_pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    fn tracks(&self, event: &PointerEvent) -> bool {
        self.pointer == Some(event.id)
    }

    /// Starts a sequence. With `interrupt` the drag commits immediately,
    /// skipping slop and axis checks.
    pub fn on_down(&mut self, event: &PointerEvent, interrupt: bool) {
        if self.pointer.is_some() && !self.tracks(event) {
            return;
        }

        self.pointer = Some(event.id);
        self.down_position = event.position;
        self.down_time_ms = event.uptime_ms;
        self.last_position = event.position;
        self.velocity_tracker.reset();

        if interrupt {
            self.velocity_tracker
                .add_position(event.uptime_ms, event.position);
            self.state = DragState::Committed;
        } else {
            self.state = DragState::Sampling;
        }
    }

    /// Feeds a move sample. Returns the vertical delta to dispatch once the
    /// drag is committed; the committing sample carries the whole pan since
    /// the down.
    pub fn on_move(&mut self, event: &PointerEvent) -> Option<f32> {
        if !self.tracks(event) {
            return None;
        }

        match self.state {
            DragState::Sampling => self.sample(event),
            DragState::Committed => {
                event.consume();
                self.velocity_tracker
                    .add_position(event.uptime_ms, event.position);
                let delta = event.position.y - self.last_position.y;
                self.last_position = event.position;
                non_zero(delta)
            }
            DragState::Idle | DragState::Rejected(_) => None,
        }
    }

    fn sample(&mut self, event: &PointerEvent) -> Option<f32> {
        if event.is_consumed() {
            self.state = DragState::Rejected(RejectReason::AlreadyConsumed);
            return None;
        }

        let pan = event.position.offset_from(self.down_position);
        if pan.length() <= self.config.touch_slop {
            return None;
        }

        let horizontal = pan.x.abs();
        let vertical = pan.y.abs();
        let commit = if vertical > horizontal {
            true
        } else if horizontal > vertical {
            false
        } else {
            match self.config.axis_lock {
                AxisLockStrictness::Strict => false,
                AxisLockStrictness::Balanced => return None,
                AxisLockStrictness::Lenient => true,
            }
        };

        if !commit {
            self.state = DragState::Rejected(RejectReason::HorizontalAxis);
            return None;
        }

        self.state = DragState::Committed;
        event.consume();
        self.velocity_tracker
            .add_position(self.down_time_ms, self.down_position);
        self.velocity_tracker
            .add_position(event.uptime_ms, event.position);
        self.last_position = event.position;
        non_zero(pan.y)
    }

    /// Ends the sequence. Returns the capped release velocity when the drag
    /// was committed.
    pub fn on_up(&mut self, event: &PointerEvent) -> Option<f32> {
        if !self.tracks(event) {
            return None;
        }

        let velocity = if self.state == DragState::Committed {
            // A late release after holding still must read as no velocity.
            self.velocity_tracker
                .add_position(event.uptime_ms, event.position);
            Some(
                self.velocity_tracker
                    .calculate_velocity_with_max(self.config.max_fling_velocity)
                    .y,
            )
        } else {
            None
        };

        self.finish();
        velocity
    }

    /// Aborts the sequence without a fling.
    pub fn on_cancel(&mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.state = DragState::Idle;
        self.pointer = None;
        self.velocity_tracker.reset();
    }
}

fn non_zero(delta: f32) -> Option<f32> {
    (delta != 0.0).then_some(delta)
}
