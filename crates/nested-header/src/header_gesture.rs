//! Pointer input on the header and content regions.

use crate::state::NestedHeaderState;
use nested_header_foundation::{DragState, NestedScrollSource, PointerEvent, PointerEventKind};

impl NestedHeaderState {
    /// Feeds a pointer event that hit the header region.
    ///
    /// A down stops the header fling and the content fling; if either was
    /// running the touch grabs the header at once. Otherwise the drag has to
    /// leave the touch slop vertically before it moves anything.
    pub fn on_header_pointer_event(&self, event: &PointerEvent) {
        if !self.is_ready() {
            return;
        }
        match event.kind {
            PointerEventKind::Down => self.on_header_down(event),
            PointerEventKind::Move => self.on_header_move(event),
            PointerEventKind::Up => self.on_header_up(event),
            PointerEventKind::Cancel => self.on_header_cancel(event),
        }
    }

    /// Feeds a pointer event that hit the content region. A down there only
    /// stops the header fling; the list handles the rest itself.
    pub fn on_content_pointer_event(&self, event: &PointerEvent) {
        if event.kind == PointerEventKind::Down && self.is_ready() && self.cancel_fling() {
            event.consume();
        }
    }

    fn on_header_down(&self, event: &PointerEvent) {
        let tracked = self.inner.recognizer.borrow().tracked_pointer();
        if tracked.is_some_and(|id| id != event.id) {
            // A second finger; the first one keeps the gesture.
            return;
        }
        let debug = self.debug();
        crate::lifecycle!(debug, "header start pointer:{}", event.id);
        self.inner.header_touch_active.set(true);

        let fling_cancelled = self.cancel_fling();
        let content_fling_cancelled = self.cancel_content_fling();
        let interrupt = fling_cancelled || content_fling_cancelled;
        if interrupt {
            event.consume();
            crate::lifecycle!(debug, "header drag");
        }

        self.inner.recognizer.borrow_mut().on_down(event, interrupt);
    }

    fn on_header_move(&self, event: &PointerEvent) {
        let (delta, decided) = {
            let mut recognizer = self.inner.recognizer.borrow_mut();
            let was_sampling = recognizer.state() == DragState::Sampling;
            let delta = recognizer.on_move(event);
            let state = recognizer.state();
            (delta, (was_sampling && state != DragState::Sampling).then_some(state))
        };

        match decided {
            Some(DragState::Committed) => crate::lifecycle!(self.debug(), "header drag"),
            Some(DragState::Rejected(reason)) => {
                crate::lifecycle!(self.debug(), "header cancel {:?}", reason)
            }
            _ => {}
        }

        if let Some(delta) = delta {
            self.dispatch_nested_scroll(delta, NestedScrollSource::Drag);
        }
    }

    fn on_header_up(&self, event: &PointerEvent) {
        let (velocity, finished) = {
            let mut recognizer = self.inner.recognizer.borrow_mut();
            let velocity = recognizer.on_up(event);
            (velocity, !recognizer.is_tracking())
        };
        if !finished {
            return;
        }
        self.inner.header_touch_active.set(false);

        if let Some(velocity) = velocity {
            self.dispatch_fling(velocity);
        }
        crate::lifecycle!(self.debug(), "header finish");
    }

    fn on_header_cancel(&self, event: &PointerEvent) {
        {
            let mut recognizer = self.inner.recognizer.borrow_mut();
            if recognizer
                .tracked_pointer()
                .is_some_and(|id| id != event.id)
            {
                return;
            }
            recognizer.on_cancel();
        }
        self.inner.header_touch_active.set(false);
        crate::lifecycle!(self.debug(), "header finish cancelled");
    }
}
