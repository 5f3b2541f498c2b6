//! How scrolling inside the content moves the header.

use crate::state::{NestedHeaderState, NestedHeaderStateInner};
use nested_header_foundation::{NestedScrollConnection, NestedScrollSource};
use nested_header_graphics::{Offset, Velocity};
use std::rc::Weak;

/// Parent connection of the content list.
///
/// Scrolling up first hides the header, scrolling down first lets the list
/// reach its top and then shows the header with what is left.
pub(crate) struct ContentConnection {
    state: Weak<NestedHeaderStateInner>,
}

impl ContentConnection {
    pub(crate) fn new(state: Weak<NestedHeaderStateInner>) -> Self {
        Self { state }
    }

    /// The header state, unless content scrolling is to be ignored right now.
    fn accepting(&self, source: NestedScrollSource) -> Option<NestedHeaderState> {
        let state = NestedHeaderState::from_weak(&self.state)?;
        let config = state.config();
        if config.header_touch_suppresses_content_scroll && state.is_header_touched() {
            log::trace!("content {:?} scroll ignored during header touch", source);
            return None;
        }
        if config.content_scroll_interrupts_fling
            && source == NestedScrollSource::Drag
            && state.is_flinging()
        {
            state.cancel_fling();
        }
        Some(state)
    }
}

impl NestedScrollConnection for ContentConnection {
    fn on_pre_scroll(&self, available: Offset, source: NestedScrollSource) -> Offset {
        match self.accepting(source) {
            Some(state) => Offset::vertical(state.consume_hide(available.y)),
            None => Offset::ZERO,
        }
    }

    fn on_post_scroll(
        &self,
        _consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        match self.accepting(source) {
            Some(state) => Offset::vertical(state.consume_show(available.y)),
            None => Offset::ZERO,
        }
    }

    fn on_pre_fling(&self, _available: Velocity) -> Velocity {
        if let Some(state) = NestedHeaderState::from_weak(&self.state) {
            state.set_content_flinging(true);
        }
        Velocity::ZERO
    }

    fn on_post_fling(&self, _consumed: Velocity, _available: Velocity) -> Velocity {
        if let Some(state) = NestedHeaderState::from_weak(&self.state) {
            state.set_content_flinging(false);
        }
        Velocity::ZERO
    }
}

#[cfg(test)]
mod tests {
    use crate::{NestedHeaderConfig, NestedHeaderState};
    use nested_header_core::{DefaultScheduler, Runtime};
    use nested_header_foundation::{NestedScrollDispatcher, NestedScrollSource, ScrollEvent};
    use nested_header_graphics::{Offset, Velocity};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn state_with(runtime: &Runtime, config: NestedHeaderConfig) -> NestedHeaderState {
        let state = NestedHeaderState::new(runtime.handle(), config);
        state.set_size(300.0, 1000.0, 800.0);
        state
    }

    /// A list scrolled `list_scroll` px from its top, dispatching through the
    /// header's content connection.
    fn list_scroll(
        dispatcher: &NestedScrollDispatcher,
        list_position: &Cell<f32>,
        delta: f32,
    ) -> Offset {
        dispatcher
            .dispatch_scroll(ScrollEvent::drag(delta), |left| {
                // Content moves opposite to the finger; position >= 0.
                let target = (list_position.get() - left.y).max(0.0);
                let consumed = list_position.get() - target;
                list_position.set(target);
                Offset::vertical(consumed)
            })
            .consumed
    }

    #[test]
    fn scrolling_up_hides_header_before_list_moves() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let state = state_with(&runtime, NestedHeaderConfig::default());
        let dispatcher = NestedScrollDispatcher::new();
        dispatcher.set_parent(Some(state.content_connection()));
        let list = Cell::new(0.0);

        list_scroll(&dispatcher, &list, -200.0);
        assert_eq!(state.offset(), -200.0);
        assert_eq!(list.get(), 0.0);

        list_scroll(&dispatcher, &list, -250.0);
        assert_eq!(state.offset(), -300.0);
        assert_eq!(list.get(), 150.0);
    }

    #[test]
    fn scrolling_down_shows_header_after_list_reaches_top() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let state = state_with(&runtime, NestedHeaderConfig::default());
        state.collapse();
        let dispatcher = NestedScrollDispatcher::new();
        dispatcher.set_parent(Some(state.content_connection()));
        let list = Cell::new(100.0);

        list_scroll(&dispatcher, &list, 60.0);
        assert_eq!(list.get(), 40.0);
        assert_eq!(state.offset(), -300.0);

        list_scroll(&dispatcher, &list, 100.0);
        assert_eq!(list.get(), 0.0);
        assert_eq!(state.offset(), -240.0);
    }

    #[test]
    fn header_touch_suppresses_content_scroll() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let state = state_with(&runtime, NestedHeaderConfig::default());
        let connection = state.content_connection();

        state.inner.header_touch_active.set(true);
        assert_eq!(
            connection.on_pre_scroll(Offset::vertical(-50.0), NestedScrollSource::Drag),
            Offset::ZERO
        );
        assert_eq!(state.offset(), 0.0);

        state.set_config(
            NestedHeaderConfig::default().with_header_touch_suppresses_content_scroll(false),
        );
        assert_eq!(
            connection.on_pre_scroll(Offset::vertical(-50.0), NestedScrollSource::Drag),
            Offset::vertical(-50.0)
        );
    }

    #[test]
    fn content_drag_can_interrupt_header_fling() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let config = NestedHeaderConfig::default().with_content_scroll_interrupts_fling(true);
        let state = state_with(&runtime, config);
        let connection = state.content_connection();

        state.dispatch_fling(-3_000.0);
        assert!(state.is_flinging());
        connection.on_pre_scroll(Offset::vertical(-5.0), NestedScrollSource::Fling);
        assert!(state.is_flinging());
        connection.on_pre_scroll(Offset::vertical(-5.0), NestedScrollSource::Drag);
        assert!(!state.is_flinging());
    }

    #[test]
    fn content_fling_is_tracked_and_cancellable() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let state = state_with(&runtime, NestedHeaderConfig::default());
        let connection = state.content_connection();
        let stopped = Rc::new(Cell::new(0));
        let stopped_in = Rc::clone(&stopped);
        state.set_content_fling_canceller(Some(Rc::new(move || {
            stopped_in.set(stopped_in.get() + 1)
        })));

        assert!(!state.cancel_content_fling());
        connection.on_pre_fling(Velocity::vertical(-4_000.0));
        assert!(state.is_content_flinging());
        assert!(state.cancel_content_fling());
        assert!(!state.cancel_content_fling());
        assert_eq!(stopped.get(), 1);

        connection.on_pre_fling(Velocity::vertical(-4_000.0));
        connection.on_post_fling(Velocity::ZERO, Velocity::ZERO);
        assert!(!state.is_content_flinging());
    }
}
