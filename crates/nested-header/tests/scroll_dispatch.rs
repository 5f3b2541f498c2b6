use nested_header::{NestedHeaderConfig, NestedHeaderState, NestedScrollSource};
use nested_header_core::{DefaultScheduler, Runtime};
use nested_header_testing::{NestedScrollCall, RecordingConnection};
use std::rc::Rc;
use std::sync::Arc;

/// Deterministic pseudo-random deltas in `[-span, span]`.
struct Deltas(u32);

impl Deltas {
    fn next(&mut self, span: f32) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let unit = (self.0 >> 8) as f32 / (1u32 << 24) as f32;
        (unit * 2.0 - 1.0) * span
    }
}

fn ready_state(
    runtime: &Runtime,
    header: f32,
    content: f32,
    container: f32,
) -> NestedHeaderState {
    let state = NestedHeaderState::new(runtime.handle(), NestedHeaderConfig::default());
    state.set_size(header, content, container);
    state
}

#[test]
fn offset_stays_in_range_for_any_delta_sequence() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = ready_state(&runtime, 300.0, 1000.0, 800.0);
    let mut deltas = Deltas(7);

    for _ in 0..2_000 {
        let delta = deltas.next(400.0);
        let before = state.offset();
        let result = state.dispatch_nested_scroll(delta, NestedScrollSource::Drag);

        let offset = state.offset();
        assert!((-300.0..=0.0).contains(&offset), "offset {} escaped", offset);
        assert!(result.consumed.y.abs() <= delta.abs());
        assert!(result.consumed.y == 0.0 || result.consumed.y.signum() == delta.signum());
        assert!((offset - before - result.consumed.y).abs() < 1e-3);
        assert!((result.consumed.y + result.leftover.y - delta).abs() < 1e-3);
    }
}

#[test]
fn hide_never_goes_below_min_and_show_never_above_zero() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = ready_state(&runtime, 300.0, 1000.0, 800.0);

    let result = state.dispatch_nested_scroll(-10_000.0, NestedScrollSource::Drag);
    assert_eq!(state.offset(), -300.0);
    assert_eq!(result.leftover.y, -9_700.0);

    let result = state.dispatch_nested_scroll(10_000.0, NestedScrollSource::Drag);
    assert_eq!(state.offset(), 0.0);
    assert_eq!(result.consumed.y, 300.0);
}

#[test]
fn zero_delta_reaches_nobody() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = ready_state(&runtime, 300.0, 1000.0, 800.0);
    state.scroll_by(-120.0);
    let parent = Rc::new(RecordingConnection::new());
    let inner = Rc::new(RecordingConnection::new());
    state.set_outer_parent(Some(parent.clone()));
    state.set_header_inner_collaborator(Some(inner.clone()));

    for zero in [0.0, -0.0] {
        let result = state.dispatch_nested_scroll(zero, NestedScrollSource::Drag);
        assert_eq!(result.consumed.y, 0.0);
    }
    assert_eq!(state.offset(), -120.0);
    assert_eq!(parent.call_count(), 0);
    assert_eq!(inner.call_count(), 0);
}

#[test]
fn range_invariant_holds_after_every_layout() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = NestedHeaderState::new(runtime.handle(), NestedHeaderConfig::default());
    let mut deltas = Deltas(11);

    for _ in 0..500 {
        let header = 200.0 + deltas.next(200.0);
        let content = 800.0 + deltas.next(800.0);
        let container = 600.0 + deltas.next(300.0);
        let range = state.set_size(header, content, container);

        assert!(range.min() <= 0.0);
        assert!(range.min() >= -header);
        assert!(range.contains(state.offset()));
        state.dispatch_nested_scroll(deltas.next(300.0), NestedScrollSource::Drag);
        assert!(range.contains(state.offset()));
    }
}

#[test]
fn collapsible_range_scenario() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = ready_state(&runtime, 300.0, 1000.0, 800.0);
    assert_eq!(state.offset_range().min(), -300.0);

    let mut trace = vec![state.offset()];
    for _ in 0..4 {
        state.dispatch_nested_scroll(-50.0, NestedScrollSource::Drag);
        trace.push(state.offset());
    }
    assert_eq!(trace, vec![0.0, -50.0, -100.0, -150.0, -200.0]);

    let result = state.dispatch_nested_scroll(-150.0, NestedScrollSource::Drag);
    assert_eq!(state.offset(), -300.0);
    assert_eq!(result.leftover.y, -50.0);
}

#[test]
fn short_content_scenario() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = ready_state(&runtime, 300.0, 400.0, 800.0);
    assert_eq!(state.offset_range().min(), 0.0);

    let result = state.dispatch_nested_scroll(-50.0, NestedScrollSource::Drag);
    assert_eq!(state.offset(), 0.0);
    assert_eq!(result.leftover.y, -50.0);
}

#[test]
fn outer_parent_goes_first_and_inner_collaborator_gets_the_rest() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = ready_state(&runtime, 300.0, 1000.0, 800.0);
    let parent = Rc::new(RecordingConnection::new().consuming_pre_scroll(0.5));
    let inner = Rc::new(RecordingConnection::new());
    state.set_outer_parent(Some(parent.clone()));
    state.set_header_inner_collaborator(Some(inner.clone()));

    state.dispatch_nested_scroll(-100.0, NestedScrollSource::Drag);
    assert_eq!(state.offset(), -50.0);
    assert_eq!(inner.call_count(), 0);

    parent.clear();
    state.dispatch_nested_scroll(-600.0, NestedScrollSource::Drag);
    assert_eq!(state.offset(), -300.0);
    assert_eq!(
        inner.calls(),
        vec![NestedScrollCall::PostScroll {
            consumed: -550.0,
            available: -50.0,
            source: NestedScrollSource::Drag,
        }]
    );
    assert_eq!(
        parent.calls(),
        vec![
            NestedScrollCall::PreScroll {
                available: -600.0,
                source: NestedScrollSource::Drag,
            },
            NestedScrollCall::PostScroll {
                consumed: -550.0,
                available: -50.0,
                source: NestedScrollSource::Drag,
            },
        ]
    );
}

#[test]
fn nothing_moves_before_the_first_layout() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = NestedHeaderState::new(runtime.handle(), NestedHeaderConfig::default());
    let parent = Rc::new(RecordingConnection::new());
    state.set_outer_parent(Some(parent.clone()));

    assert_eq!(state.scroll_by(-50.0), 0.0);
    assert!(!state.dispatch_fling(-4_000.0));
    assert_eq!(parent.call_count(), 0);

    // A zero-height header never becomes ready.
    state.set_size(0.0, 1000.0, 800.0);
    assert!(!state.is_ready());
    state.set_size(300.0, 1000.0, 800.0);
    assert!(state.is_ready());
    // Readiness survives a later empty measurement.
    state.set_size(0.0, 1000.0, 800.0);
    assert!(state.is_ready());
}
