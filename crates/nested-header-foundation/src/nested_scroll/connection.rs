use super::{legalize, NestedScrollSource};
use crate::coerce::ScrollVector;
use nested_header_graphics::{Offset, Velocity};
use std::cell::RefCell;
use std::rc::Rc;

/// A party in nested scrolling.
///
/// Every hook returns what it consumed and defaults to consuming nothing, so
/// implementations override only the phases they care about. Hooks take
/// `&self`; connections are shared and keep their own interior state.
pub trait NestedScrollConnection {
    /// Offered before the child consumes anything.
    fn on_pre_scroll(&self, _available: Offset, _source: NestedScrollSource) -> Offset {
        Offset::ZERO
    }

    /// Offered what the child left; `consumed` is what was used so far.
    fn on_post_scroll(
        &self,
        _consumed: Offset,
        _available: Offset,
        _source: NestedScrollSource,
    ) -> Offset {
        Offset::ZERO
    }

    /// Offered the release velocity before the child flings.
    fn on_pre_fling(&self, _available: Velocity) -> Velocity {
        Velocity::ZERO
    }

    /// Told how the child's fling ended; `available` is what it could not use.
    fn on_post_fling(&self, _consumed: Velocity, _available: Velocity) -> Velocity {
        Velocity::ZERO
    }
}

/// Connection that consumes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpConnection;

impl NestedScrollConnection for NoOpConnection {}

/// A connection attached below an optional parent.
///
/// Pre phases ask the parent first and hand the rest to the local
/// connection; post phases go the other way round. Chaining nodes builds the
/// ancestor path a scroll travels through.
pub struct NestedScrollNode {
    connection: Rc<dyn NestedScrollConnection>,
    parent: RefCell<Option<Rc<dyn NestedScrollConnection>>>,
}

impl NestedScrollNode {
    pub fn new(connection: Rc<dyn NestedScrollConnection>) -> Self {
        Self {
            connection,
            parent: RefCell::new(None),
        }
    }

    pub fn set_parent(&self, parent: Option<Rc<dyn NestedScrollConnection>>) {
        *self.parent.borrow_mut() = parent;
    }

    pub fn parent(&self) -> Option<Rc<dyn NestedScrollConnection>> {
        self.parent.borrow().clone()
    }

    fn parent_first<T: ScrollVector>(
        &self,
        available: T,
        parent_phase: impl FnOnce(&dyn NestedScrollConnection, T) -> T,
        own_phase: impl FnOnce(&dyn NestedScrollConnection, T) -> T,
        phase: &str,
    ) -> T {
        let parent_consumed = match self.parent() {
            Some(parent) => legalize(parent_phase(parent.as_ref(), available), available, phase),
            None => T::zero(),
        };
        let left = available - parent_consumed;
        let own_consumed = legalize(own_phase(self.connection.as_ref(), left), left, phase);
        parent_consumed + own_consumed
    }
}

impl NestedScrollConnection for NestedScrollNode {
    fn on_pre_scroll(&self, available: Offset, source: NestedScrollSource) -> Offset {
        self.parent_first(
            available,
            |parent, offered| parent.on_pre_scroll(offered, source),
            |own, offered| own.on_pre_scroll(offered, source),
            "pre-scroll",
        )
    }

    fn on_post_scroll(
        &self,
        consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        let own_consumed = legalize(
            self.connection.on_post_scroll(consumed, available, source),
            available,
            "post-scroll",
        );
        let left = available - own_consumed;
        let parent_consumed = match self.parent() {
            Some(parent) => legalize(
                parent.on_post_scroll(consumed + own_consumed, left, source),
                left,
                "post-scroll",
            ),
            None => Offset::ZERO,
        };
        own_consumed + parent_consumed
    }

    fn on_pre_fling(&self, available: Velocity) -> Velocity {
        self.parent_first(
            available,
            |parent, offered| parent.on_pre_fling(offered),
            |own, offered| own.on_pre_fling(offered),
            "pre-fling",
        )
    }

    fn on_post_fling(&self, consumed: Velocity, available: Velocity) -> Velocity {
        let own_consumed = legalize(
            self.connection.on_post_fling(consumed, available),
            available,
            "post-fling",
        );
        let left = available - own_consumed;
        let parent_consumed = match self.parent() {
            Some(parent) => legalize(
                parent.on_post_fling(consumed + own_consumed, left),
                left,
                "post-fling",
            ),
            None => Velocity::ZERO,
        };
        own_consumed + parent_consumed
    }
}
