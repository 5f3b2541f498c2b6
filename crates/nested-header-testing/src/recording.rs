//! A nested scroll party that remembers what it was offered.

use nested_header_foundation::{NestedScrollConnection, NestedScrollSource};
use nested_header_graphics::{Offset, Velocity};
use std::cell::{Cell, RefCell};

/// One hook invocation, vertical components only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NestedScrollCall {
    PreScroll {
        available: f32,
        source: NestedScrollSource,
    },
    PostScroll {
        consumed: f32,
        available: f32,
        source: NestedScrollSource,
    },
    PreFling {
        available: f32,
    },
    PostFling {
        consumed: f32,
        available: f32,
    },
}

/// Records every call and optionally takes a fixed share of pre phases.
///
/// Install it as an outer parent or an inner collaborator to observe the
/// dispatch order and the amounts involved.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    calls: RefCell<Vec<NestedScrollCall>>,
    pre_scroll_share: Cell<f32>,
    pre_fling_share: Cell<f32>,
}

impl RecordingConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes `share` (0..=1) of every pre-scroll offer.
    pub fn consuming_pre_scroll(self, share: f32) -> Self {
        self.pre_scroll_share.set(share.clamp(0.0, 1.0));
        self
    }

    /// Consumes `share` (0..=1) of every pre-fling offer.
    pub fn consuming_pre_fling(self, share: f32) -> Self {
        self.pre_fling_share.set(share.clamp(0.0, 1.0));
        self
    }

    pub fn calls(&self) -> Vec<NestedScrollCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn post_flings(&self) -> Vec<(f32, f32)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match *call {
                NestedScrollCall::PostFling {
                    consumed,
                    available,
                } => Some((consumed, available)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: NestedScrollCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl NestedScrollConnection for RecordingConnection {
    fn on_pre_scroll(&self, available: Offset, source: NestedScrollSource) -> Offset {
        self.record(NestedScrollCall::PreScroll {
            available: available.y,
            source,
        });
        Offset::vertical(available.y * self.pre_scroll_share.get())
    }

    fn on_post_scroll(
        &self,
        consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        self.record(NestedScrollCall::PostScroll {
            consumed: consumed.y,
            available: available.y,
            source,
        });
        Offset::ZERO
    }

    fn on_pre_fling(&self, available: Velocity) -> Velocity {
        self.record(NestedScrollCall::PreFling {
            available: available.y,
        });
        Velocity::vertical(available.y * self.pre_fling_share.get())
    }

    fn on_post_fling(&self, consumed: Velocity, available: Velocity) -> Velocity {
        self.record(NestedScrollCall::PostFling {
            consumed: consumed.y,
            available: available.y,
        });
        Velocity::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_shares() {
        let recording = RecordingConnection::new().consuming_pre_scroll(0.5);
        let consumed =
            recording.on_pre_scroll(Offset::vertical(-40.0), NestedScrollSource::Drag);
        assert_eq!(consumed, Offset::vertical(-20.0));
        assert_eq!(
            recording.calls(),
            vec![NestedScrollCall::PreScroll {
                available: -40.0,
                source: NestedScrollSource::Drag
            }]
        );
        assert_eq!(
            recording.on_pre_fling(Velocity::vertical(900.0)),
            Velocity::ZERO
        );
        assert_eq!(recording.call_count(), 2);
    }
}
