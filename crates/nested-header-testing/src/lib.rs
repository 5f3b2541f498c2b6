//! Testing utilities and harness for Nested Header

pub mod assertions;
pub mod list;
pub mod recording;
pub mod rule;

pub use assertions::assert_approx_eq;
pub use list::SimulatedList;
pub use recording::{NestedScrollCall, RecordingConnection};
pub use rule::{HitRegion, NestedHeaderTestRule, FRAME_INTERVAL_MS};

/// Routes `log` output to the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::init_logging;
    pub use crate::list::SimulatedList;
    pub use crate::recording::{NestedScrollCall, RecordingConnection};
    pub use crate::rule::*;
}
