//! A scrollable list stand-in living in the content region.

use nested_header_foundation::{
    ConsumptionResult, NestedScrollConnection, NestedScrollDispatcher, ScrollEvent,
};
use nested_header_graphics::{Offset, Velocity};
use std::cell::Cell;
use std::rc::Rc;

/// Scroll position in `[0, max_position]`, 0 being the top.
///
/// Deltas are finger deltas: negative moves the content up, which increases
/// the position. Every delta goes through a [`NestedScrollDispatcher`] whose
/// parent is the header's content connection.
pub struct SimulatedList {
    dispatcher: NestedScrollDispatcher,
    position: Cell<f32>,
    max_position: Cell<f32>,
}

impl SimulatedList {
    pub fn new(parent: Rc<dyn NestedScrollConnection>, max_position: f32) -> Self {
        let dispatcher = NestedScrollDispatcher::new();
        dispatcher.set_parent(Some(parent));
        Self {
            dispatcher,
            position: Cell::new(0.0),
            max_position: Cell::new(max_position.max(0.0)),
        }
    }

    pub fn position(&self) -> f32 {
        self.position.get()
    }

    pub fn set_position(&self, position: f32) {
        self.position
            .set(position.clamp(0.0, self.max_position.get()));
    }

    pub fn is_at_top(&self) -> bool {
        self.position.get() <= 0.0
    }

    pub fn drag_by(&self, delta: f32) -> ConsumptionResult {
        self.scroll(ScrollEvent::drag(delta))
    }

    /// One frame of the list's own fling.
    pub fn fling_step(&self, delta: f32) -> ConsumptionResult {
        self.scroll(ScrollEvent::fling(delta))
    }

    /// Announces a fling to the parent. Returns what the list keeps.
    pub fn begin_fling(&self, velocity: f32) -> f32 {
        let available = Velocity::vertical(velocity);
        (available - self.dispatcher.dispatch_pre_fling(available)).y
    }

    pub fn end_fling(&self, consumed: f32, remaining: f32) {
        self.dispatcher
            .dispatch_post_fling(Velocity::vertical(consumed), Velocity::vertical(remaining));
    }

    fn scroll(&self, event: ScrollEvent) -> ConsumptionResult {
        self.dispatcher.dispatch_scroll(event, |left| {
            let before = self.position.get();
            let target = (before - left.y).clamp(0.0, self.max_position.get());
            self.position.set(target);
            Offset::vertical(before - target)
        })
    }
}
