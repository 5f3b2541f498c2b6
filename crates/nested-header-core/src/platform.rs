//! Platform abstraction for frame scheduling.
//!
//! The host owns the real vsync source. The runtime only tells it that a
//! frame is wanted; the host answers by calling
//! [`RuntimeHandle::drain_frame_callbacks`](crate::RuntimeHandle::drain_frame_callbacks).

/// Schedules frames for the runtime.
///
/// Implementations must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler that ignores frame requests. Hosts and tests that pump frames
/// themselves use this.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
