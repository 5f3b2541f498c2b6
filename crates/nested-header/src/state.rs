//! State holder tying the offset, the scroll protocol and the fling together.

use crate::config::NestedHeaderConfig;
use crate::content::ContentConnection;
use crate::fling::{FlingController, FlingOutcome};
use crate::offset_model::{OffsetModel, OffsetRange};
use crate::size::{MeasuredHeights, SizeNegotiator};
use nested_header_core::RuntimeHandle;
use nested_header_foundation::{
    ConsumptionResult, NestedScrollConnection, NestedScrollDispatcher, NestedScrollSource,
    ScrollEvent, VerticalDragRecognizer,
};
use nested_header_graphics::{Offset, Velocity};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub type OffsetListenerId = u64;

type OffsetListener = Rc<dyn Fn(f32)>;

/// Coarse position of the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderVisibility {
    Expanded,
    PartiallyCollapsed,
    Collapsed,
}

/// What survives process recreation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SavedNestedHeaderState {
    pub offset: f32,
}

pub(crate) struct NestedHeaderStateInner {
    model: RefCell<OffsetModel>,
    config: Cell<NestedHeaderConfig>,
    header_dispatcher: NestedScrollDispatcher,
    content_connection: Rc<ContentConnection>,
    fling: FlingController,
    /// Tag for debug lines of the next fling.
    fling_sequence: Cell<u64>,
    content_fling_active: Cell<bool>,
    content_fling_canceller: RefCell<Option<Rc<dyn Fn()>>>,
    pub(crate) header_touch_active: Cell<bool>,
    pub(crate) recognizer: RefCell<VerticalDragRecognizer>,
    offset_listeners: RefCell<SmallVec<[(OffsetListenerId, OffsetListener); 2]>>,
    next_listener_id: Cell<OffsetListenerId>,
    /// An offset change nobody was listening to yet.
    pending_invalidation: Cell<bool>,
}

/// Handle to one header instance.
///
/// Clones share the same state. Everything runs on the thread that owns the
/// runtime; the type is neither `Send` nor `Sync`.
#[derive(Clone)]
pub struct NestedHeaderState {
    pub(crate) inner: Rc<NestedHeaderStateInner>,
}

impl NestedHeaderState {
    pub fn new(runtime: RuntimeHandle, config: NestedHeaderConfig) -> Self {
        Self::with_initial_offset(runtime, config, 0.0)
    }

    /// Starts at `offset`; it is clamped by the first layout pass.
    pub fn with_initial_offset(
        runtime: RuntimeHandle,
        config: NestedHeaderConfig,
        offset: f32,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<NestedHeaderStateInner>| NestedHeaderStateInner {
            model: RefCell::new(OffsetModel::with_offset(offset)),
            config: Cell::new(config),
            header_dispatcher: NestedScrollDispatcher::new(),
            content_connection: Rc::new(ContentConnection::new(weak.clone())),
            fling: FlingController::new(runtime),
            fling_sequence: Cell::new(0),
            content_fling_active: Cell::new(false),
            content_fling_canceller: RefCell::new(None),
            header_touch_active: Cell::new(false),
            recognizer: RefCell::new(VerticalDragRecognizer::new(config.drag_recognizer_config())),
            offset_listeners: RefCell::new(SmallVec::new()),
            next_listener_id: Cell::new(1),
            pending_invalidation: Cell::new(false),
        });
        Self { inner }
    }

    pub fn restore(
        runtime: RuntimeHandle,
        config: NestedHeaderConfig,
        saved: SavedNestedHeaderState,
    ) -> Self {
        Self::with_initial_offset(runtime, config, saved.offset)
    }

    pub fn save(&self) -> SavedNestedHeaderState {
        SavedNestedHeaderState {
            offset: self.offset(),
        }
    }

    pub(crate) fn from_weak(weak: &Weak<NestedHeaderStateInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub fn config(&self) -> NestedHeaderConfig {
        self.inner.config.get()
    }

    pub fn set_config(&self, config: NestedHeaderConfig) {
        self.inner.config.set(config);
        self.inner
            .recognizer
            .borrow_mut()
            .set_config(config.drag_recognizer_config());
    }

    pub(crate) fn debug(&self) -> bool {
        self.config().debug
    }

    pub fn offset(&self) -> f32 {
        self.inner.model.borrow().offset()
    }

    pub fn offset_range(&self) -> OffsetRange {
        self.inner.model.borrow().range()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.model.borrow().is_ready()
    }

    pub fn visibility(&self) -> HeaderVisibility {
        let model = self.inner.model.borrow();
        let offset = model.offset();
        let range = model.range();
        if offset >= range.max() {
            HeaderVisibility::Expanded
        } else if offset <= range.min() {
            HeaderVisibility::Collapsed
        } else {
            HeaderVisibility::PartiallyCollapsed
        }
    }

    /// 0 when expanded, 1 when collapsed as far as the range allows.
    pub fn collapsed_fraction(&self) -> f32 {
        let model = self.inner.model.borrow();
        let span = model.range().span();
        if span <= 0.0 {
            return 0.0;
        }
        ((model.range().max() - model.offset()) / span).clamp(0.0, 1.0)
    }

    /// Registers a callback fired with the new offset after every change.
    ///
    /// A change that happened while nobody listened is delivered to the
    /// first listener right away.
    pub fn add_offset_listener(&self, listener: impl Fn(f32) + 'static) -> OffsetListenerId {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        let listener: OffsetListener = Rc::new(listener);
        self.inner
            .offset_listeners
            .borrow_mut()
            .push((id, listener.clone()));
        if self.inner.pending_invalidation.replace(false) {
            listener(self.offset());
        }
        id
    }

    pub fn remove_offset_listener(&self, id: OffsetListenerId) -> bool {
        let mut listeners = self.inner.offset_listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    fn notify_offset_changed(&self) {
        let listeners: SmallVec<[OffsetListener; 2]> = self
            .inner
            .offset_listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        if listeners.is_empty() {
            self.inner.pending_invalidation.set(true);
            return;
        }
        let offset = self.offset();
        for listener in listeners {
            listener(offset);
        }
    }

    /// Runs a mutation on the model and notifies listeners when the offset
    /// moved. Returns the change.
    fn update_offset(&self, mutate: impl FnOnce(&mut OffsetModel) -> f32) -> f32 {
        let moved = {
            let mut model = self.inner.model.borrow_mut();
            mutate(&mut model)
        };
        if moved != 0.0 {
            self.notify_offset_changed();
        }
        moved
    }

    pub(crate) fn consume_hide(&self, delta: f32) -> f32 {
        self.update_offset(|model| model.consume_hide(delta))
    }

    pub(crate) fn consume_show(&self, delta: f32) -> f32 {
        self.update_offset(|model| model.consume_show(delta))
    }

    /// Enclosing scroll ancestor; sees header drags and flings first.
    pub fn set_outer_parent(&self, parent: Option<Rc<dyn NestedScrollConnection>>) {
        self.inner.header_dispatcher.set_parent(parent);
    }

    /// Gets what a header drag leaves, e.g. the content list so dragging a
    /// collapsed header keeps scrolling it.
    pub fn set_header_inner_collaborator(&self, inner: Option<Rc<dyn NestedScrollConnection>>) {
        self.inner.header_dispatcher.set_inner(inner);
    }

    pub fn header_dispatcher(&self) -> &NestedScrollDispatcher {
        &self.inner.header_dispatcher
    }

    /// The connection the content list dispatches its scrolling through.
    pub fn content_connection(&self) -> Rc<dyn NestedScrollConnection> {
        self.inner.content_connection.clone()
    }

    /// How the header stops the host's list fling when it is touched.
    pub fn set_content_fling_canceller(&self, canceller: Option<Rc<dyn Fn()>>) {
        *self.inner.content_fling_canceller.borrow_mut() = canceller;
    }

    pub(crate) fn set_content_flinging(&self, active: bool) {
        self.inner.content_fling_active.set(active);
    }

    pub fn is_content_flinging(&self) -> bool {
        self.inner.content_fling_active.get()
    }

    pub fn cancel_content_fling(&self) -> bool {
        if !self.inner.content_fling_active.replace(false) {
            return false;
        }
        crate::lifecycle!(self.debug(), "content fling cancel");
        let canceller = self.inner.content_fling_canceller.borrow().clone();
        if let Some(canceller) = canceller {
            canceller();
        }
        true
    }

    pub fn is_flinging(&self) -> bool {
        self.inner.fling.is_running()
    }

    pub fn cancel_fling(&self) -> bool {
        let session = self.inner.fling.session_id();
        let cancelled = self.inner.fling.cancel();
        if let Some(session) = session.filter(|_| cancelled) {
            crate::lifecycle!(self.debug(), "fling cancel #{}", session);
        }
        cancelled
    }

    pub fn is_header_touched(&self) -> bool {
        self.inner.header_touch_active.get()
    }

    /// Feeds one layout pass's measurements. Returns the new range.
    pub fn set_size(&self, header: f32, content: f32, container: f32) -> OffsetRange {
        let heights = MeasuredHeights::new(header, content, container);
        crate::lifecycle!(
            self.debug(),
            "setSize header:{} content:{} container:{}",
            heights.header,
            heights.content,
            heights.container
        );

        let range = SizeNegotiator::negotiate(heights);
        if !range.contains(self.offset()) && self.is_flinging() {
            self.cancel_fling();
        }

        let moved = {
            let mut model = self.inner.model.borrow_mut();
            let before = model.offset();
            model.set_range(range.min(), range.max());
            if heights.header > 0.0 {
                model.mark_ready();
            }
            model.offset() - before
        };
        if moved != 0.0 {
            self.notify_offset_changed();
        }
        range
    }

    /// Runs one delta through the header's dispatcher: outer parent first,
    /// then the offset, then the inner collaborator and the parent again.
    pub fn dispatch_nested_scroll(
        &self,
        delta: f32,
        source: NestedScrollSource,
    ) -> ConsumptionResult {
        let available = Offset::vertical(delta);
        if !self.is_ready() {
            return ConsumptionResult::none(available);
        }
        self.inner
            .header_dispatcher
            .dispatch_scroll(ScrollEvent::new(available, source), |left| {
                let consumed = if left.y < 0.0 {
                    self.consume_hide(left.y)
                } else {
                    self.consume_show(left.y)
                };
                Offset::vertical(consumed)
            })
    }

    /// Programmatic scroll through the protocol. Returns the consumed part.
    pub fn scroll_by(&self, delta: f32) -> f32 {
        self.dispatch_nested_scroll(delta, NestedScrollSource::Programmatic)
            .consumed
            .y
    }

    /// Jumps to `offset` (clamped), stopping a running fling first.
    pub fn snap_to(&self, offset: f32) -> f32 {
        self.cancel_fling();
        self.update_offset(|model| model.snap_to(offset))
    }

    pub fn expand(&self) -> f32 {
        let max = self.offset_range().max();
        self.snap_to(max)
    }

    pub fn collapse(&self) -> f32 {
        let min = self.offset_range().min();
        self.snap_to(min)
    }

    /// Continues a released drag with `velocity` (px/sec).
    ///
    /// The outer parent may claim part of the velocity first; the rest
    /// drives a decay animation whose steps go through
    /// [`dispatch_nested_scroll`](Self::dispatch_nested_scroll). The parent
    /// hears how it ended in every case. Returns whether the animation
    /// started.
    pub fn dispatch_fling(&self, velocity: f32) -> bool {
        let config = self.config();
        if !self.is_ready() || !velocity.is_finite() || velocity.abs() < config.min_fling_velocity {
            return false;
        }

        let tag = self.inner.fling_sequence.get() + 1;
        self.inner.fling_sequence.set(tag);
        crate::lifecycle!(config.debug, "fling start velocity:{} #{}", velocity, tag);

        let available = Velocity::vertical(velocity);
        let pre_consumed = self.inner.header_dispatcher.dispatch_pre_fling(available);
        let left = available - pre_consumed;
        crate::lifecycle!(
            config.debug,
            "fling preConsumed:{} left:{} #{}",
            pre_consumed.y,
            left.y,
            tag
        );

        if left.is_zero() {
            self.finish_fling(left, FlingOutcome::Finished, tag);
            return false;
        }

        let for_step = Rc::downgrade(&self.inner);
        let for_end = Rc::downgrade(&self.inner);
        self.inner.fling.start(
            left.y,
            config.decay.to_spec(),
            move |delta| {
                NestedHeaderState::from_weak(&for_step)
                    .map(|state| {
                        state
                            .dispatch_nested_scroll(delta, NestedScrollSource::Fling)
                            .consumed
                            .y
                    })
                    .unwrap_or(0.0)
            },
            move |outcome| {
                if let Some(state) = NestedHeaderState::from_weak(&for_end) {
                    state.finish_fling(left, outcome, tag);
                }
            },
        );
        true
    }

    fn finish_fling(&self, left: Velocity, outcome: FlingOutcome, tag: u64) {
        let remaining = Velocity::vertical(outcome.remaining_velocity());
        let post_consumed = self
            .inner
            .header_dispatcher
            .dispatch_post_fling(left - remaining, remaining);
        crate::lifecycle!(
            self.debug(),
            "fling end {:?} postConsumed:{} #{}",
            outcome,
            post_consumed.y,
            tag
        );
    }
}
