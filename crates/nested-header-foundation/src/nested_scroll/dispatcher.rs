use super::{legalize, NestedScrollConnection, NestedScrollSource, ScrollEvent};
use crate::coerce::ConsumptionResult;
use nested_header_graphics::{Offset, Velocity};
use std::cell::RefCell;
use std::rc::Rc;

/// Entry point a scrolling component uses to negotiate with its neighbours.
///
/// The outer parent sees both phases, the inner collaborator only the
/// post-phase. Either may be absent, which behaves like a connection that
/// consumes nothing.
#[derive(Default)]
pub struct NestedScrollDispatcher {
    parent: RefCell<Option<Rc<dyn NestedScrollConnection>>>,
    inner: RefCell<Option<Rc<dyn NestedScrollConnection>>>,
}

impl NestedScrollDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_parent(&self, parent: Option<Rc<dyn NestedScrollConnection>>) {
        *self.parent.borrow_mut() = parent;
    }

    pub fn parent(&self) -> Option<Rc<dyn NestedScrollConnection>> {
        self.parent.borrow().clone()
    }

    pub fn set_inner(&self, inner: Option<Rc<dyn NestedScrollConnection>>) {
        *self.inner.borrow_mut() = inner;
    }

    pub fn inner(&self) -> Option<Rc<dyn NestedScrollConnection>> {
        self.inner.borrow().clone()
    }

    /// What the parent claims of `available` before the component scrolls.
    pub fn dispatch_pre_scroll(&self, available: Offset, source: NestedScrollSource) -> Offset {
        match self.parent() {
            Some(parent) => legalize(
                parent.on_pre_scroll(available, source),
                available,
                "pre-scroll",
            ),
            None => Offset::ZERO,
        }
    }

    /// Offers what the component left, inner collaborator first.
    pub fn dispatch_post_scroll(
        &self,
        consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        let inner_consumed = match self.inner() {
            Some(inner) => legalize(
                inner.on_post_scroll(consumed, available, source),
                available,
                "post-scroll",
            ),
            None => Offset::ZERO,
        };
        let left = available - inner_consumed;
        let parent_consumed = match self.parent() {
            Some(parent) => legalize(
                parent.on_post_scroll(consumed + inner_consumed, left, source),
                left,
                "post-scroll",
            ),
            None => Offset::ZERO,
        };
        inner_consumed + parent_consumed
    }

    pub fn dispatch_pre_fling(&self, available: Velocity) -> Velocity {
        match self.parent() {
            Some(parent) => legalize(parent.on_pre_fling(available), available, "pre-fling"),
            None => Velocity::ZERO,
        }
    }

    pub fn dispatch_post_fling(&self, consumed: Velocity, available: Velocity) -> Velocity {
        match self.parent() {
            Some(parent) => legalize(
                parent.on_post_fling(consumed, available),
                available,
                "post-fling",
            ),
            None => Velocity::ZERO,
        }
    }

    /// Runs a full pre, self, post negotiation for one delta.
    ///
    /// `on_scroll` receives what the parent left and returns what the
    /// component itself consumed. A zero offer runs nothing.
    pub fn dispatch_scroll(
        &self,
        event: ScrollEvent,
        on_scroll: impl FnOnce(Offset) -> Offset,
    ) -> ConsumptionResult {
        let available = event.available;
        if available.is_zero() {
            return ConsumptionResult::none(available);
        }

        let pre_consumed = self.dispatch_pre_scroll(available, event.source);
        let left = available - pre_consumed;

        let self_consumed = if left.is_zero() {
            Offset::ZERO
        } else {
            legalize(on_scroll(left), left, "self-scroll")
        };

        let consumed = pre_consumed + self_consumed;
        let left = left - self_consumed;
        let post_consumed = if left.is_zero() {
            Offset::ZERO
        } else {
            self.dispatch_post_scroll(consumed, left, event.source)
        };

        log::trace!(
            "{:?} scroll {:?}: pre {:?} self {:?} post {:?}",
            event.source,
            available,
            pre_consumed,
            self_consumed,
            post_consumed
        );
        ConsumptionResult::split(available, consumed + post_consumed)
    }
}
