//! Fling driver for the header offset.
//!
//! Steps a decay curve on the runtime's frame clock and hands each frame's
//! delta to the caller, which dispatches it and reports what was consumed.

use nested_header_animation::{DecayAnimationSpec, FloatDecayAnimationSpec};
use nested_header_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Unconsumed delta (px) in one frame that counts as running into a bound.
pub const BOUNDARY_EPSILON: f32 = 0.5;

/// Deltas smaller than this are not dispatched.
const MIN_STEP_DELTA: f32 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlingOutcome {
    /// The curve came to rest.
    Finished,
    /// A frame was not fully consumed; carries the curve velocity then.
    HitBoundary { remaining_velocity: f32 },
    Cancelled,
}

impl FlingOutcome {
    /// Velocity the fling could not use.
    pub fn remaining_velocity(&self) -> f32 {
        match self {
            FlingOutcome::HitBoundary { remaining_velocity } => *remaining_velocity,
            FlingOutcome::Finished | FlingOutcome::Cancelled => 0.0,
        }
    }
}

struct FlingSession {
    id: u64,
    initial_velocity: f32,
    decay_spec: DecayAnimationSpec,
    start_frame_time_nanos: Cell<Option<u64>>,
    last_value: Cell<f32>,
    total_delta: Cell<f32>,
    on_scroll: Rc<dyn Fn(f32) -> f32>,
    on_end: RefCell<Option<Box<dyn FnOnce(FlingOutcome)>>>,
    registration: RefCell<Option<FrameCallbackRegistration>>,
}

impl FlingSession {
    fn finish(&self, outcome: FlingOutcome) {
        // Dropping the registration unhooks a pending frame, if any.
        self.registration.borrow_mut().take();
        let on_end = self.on_end.borrow_mut().take();
        log::trace!(
            "fling #{} ended {:?} after {:.1}px",
            self.id,
            outcome,
            self.total_delta.get()
        );
        if let Some(on_end) = on_end {
            on_end(outcome);
        }
    }
}

type SessionSlot = Rc<RefCell<Option<Rc<FlingSession>>>>;

fn is_current(slot: &SessionSlot, session: &Rc<FlingSession>) -> bool {
    slot.borrow()
        .as_ref()
        .is_some_and(|current| Rc::ptr_eq(current, session))
}

/// Takes `session` out of the slot if it is still the active one.
fn release(slot: &SessionSlot, session: &Rc<FlingSession>) -> bool {
    let mut current = slot.borrow_mut();
    if current
        .as_ref()
        .is_some_and(|active| Rc::ptr_eq(active, session))
    {
        *current = None;
        true
    } else {
        false
    }
}

fn schedule_next_frame(slot: SessionSlot, session: Rc<FlingSession>, frame_clock: FrameClock) {
    let session_for_frame = session.clone();
    let clock_for_frame = frame_clock.clone();
    let registration = frame_clock.with_frame_nanos(move |frame_time_nanos| {
        step(slot, session_for_frame, clock_for_frame, frame_time_nanos);
    });

    if registration.is_registered() {
        session.registration.replace(Some(registration));
    } else {
        log::debug!("fling #{} has no runtime to run on", session.id);
    }
}

fn step(
    slot: SessionSlot,
    session: Rc<FlingSession>,
    frame_clock: FrameClock,
    frame_time_nanos: u64,
) {
    if !is_current(&slot, &session) {
        return;
    }

    let start_time = match session.start_frame_time_nanos.get() {
        Some(start) => start,
        None => {
            session.start_frame_time_nanos.set(Some(frame_time_nanos));
            frame_time_nanos
        }
    };
    let play_time_nanos = frame_time_nanos.saturating_sub(start_time) as i64;

    let spec = &session.decay_spec;
    let value = spec.get_value_from_nanos(play_time_nanos, 0.0, session.initial_velocity);
    let delta = value - session.last_value.get();
    session.last_value.set(value);

    let duration_nanos = spec.get_duration_nanos(0.0, session.initial_velocity);
    let velocity = spec.get_velocity_from_nanos(play_time_nanos, 0.0, session.initial_velocity);
    let is_finished =
        play_time_nanos >= duration_nanos || velocity.abs() < spec.abs_velocity_threshold();

    let consumed = if delta.abs() > MIN_STEP_DELTA {
        (session.on_scroll)(delta)
    } else {
        0.0
    };
    session.total_delta.set(session.total_delta.get() + consumed);

    // on_scroll may have cancelled this session.
    if !is_current(&slot, &session) {
        return;
    }

    let hit_boundary = (delta - consumed).abs() > BOUNDARY_EPSILON;
    let outcome = if hit_boundary {
        Some(FlingOutcome::HitBoundary {
            remaining_velocity: velocity,
        })
    } else if is_finished {
        Some(FlingOutcome::Finished)
    } else {
        None
    };

    match outcome {
        Some(outcome) => {
            if release(&slot, &session) {
                session.finish(outcome);
            }
        }
        None => schedule_next_frame(slot, session, frame_clock),
    }
}

/// Runs at most one decay animation at a time.
///
/// Clones share the running session.
#[derive(Clone)]
pub struct FlingController {
    slot: SessionSlot,
    frame_clock: FrameClock,
    next_session_id: Rc<Cell<u64>>,
}

impl FlingController {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
            frame_clock: runtime.frame_clock(),
            next_session_id: Rc::new(Cell::new(1)),
        }
    }

    /// Starts flinging with `velocity` (px/sec), cancelling any running
    /// session first. Returns the session number.
    ///
    /// `on_scroll` receives each frame's delta and returns what was
    /// consumed. `on_end` runs exactly once, whatever ends the session.
    pub fn start(
        &self,
        velocity: f32,
        decay_spec: DecayAnimationSpec,
        on_scroll: impl Fn(f32) -> f32 + 'static,
        on_end: impl FnOnce(FlingOutcome) + 'static,
    ) -> u64 {
        self.cancel();

        let id = self.next_session_id.get();
        self.next_session_id.set(id + 1);

        let session = Rc::new(FlingSession {
            id,
            initial_velocity: velocity,
            decay_spec,
            start_frame_time_nanos: Cell::new(None),
            last_value: Cell::new(0.0),
            total_delta: Cell::new(0.0),
            on_scroll: Rc::new(on_scroll),
            on_end: RefCell::new(Some(Box::new(on_end))),
            registration: RefCell::new(None),
        });

        *self.slot.borrow_mut() = Some(session.clone());
        schedule_next_frame(self.slot.clone(), session.clone(), self.frame_clock.clone());

        // Without a runtime no frame will ever arrive.
        if session.registration.borrow().is_none() && release(&self.slot, &session) {
            session.finish(FlingOutcome::Cancelled);
        }
        id
    }

    /// Stops the running session where it is. Returns false when nothing
    /// was running.
    pub fn cancel(&self) -> bool {
        let session = self.slot.borrow_mut().take();
        match session {
            Some(session) => {
                session.finish(FlingOutcome::Cancelled);
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Number of the running session, if any.
    pub fn session_id(&self) -> Option<u64> {
        self.slot.borrow().as_ref().map(|session| session.id)
    }
}
