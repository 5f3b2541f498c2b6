//! Frame runtime for Nested Header
//!
//! A deliberately small, single-threaded runtime: one-shot frame callbacks
//! registered through a [`FrameClock`] and drained by the host once per
//! frame. Fling animations chain these callbacks to step their decay curve.

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::frame_clock::FrameClock;
    pub use crate::runtime::{Runtime, RuntimeHandle};
    pub use crate::DefaultScheduler;
}
