use nested_header::{
    AxisLockStrictness, HeaderVisibility, NestedHeaderConfig, NestedScrollSource, Point,
    PointerEvent,
};
use nested_header_testing::{
    assert_approx_eq, init_logging, NestedHeaderTestRule, NestedScrollCall, RecordingConnection,
    SimulatedList,
};
use std::cell::Cell;
use std::rc::Rc;

fn rule_with_parent(
    config: NestedHeaderConfig,
) -> (NestedHeaderTestRule, Rc<RecordingConnection>) {
    let rule = NestedHeaderTestRule::with_config(360.0, 800.0, 300.0, 2_000.0, config);
    let parent = Rc::new(RecordingConnection::new());
    rule.state().set_outer_parent(Some(parent.clone()));
    (rule, parent)
}

#[test]
fn slow_drag_moves_header_without_fling() {
    init_logging();
    let (mut rule, parent) = rule_with_parent(NestedHeaderConfig::default());

    rule.drag(180.0, 250.0, 150.0);
    assert_eq!(rule.state().offset(), -100.0);
    assert_eq!(rule.state().visibility(), HeaderVisibility::PartiallyCollapsed);
    assert!(!rule.state().is_flinging());
    assert!(parent
        .calls()
        .iter()
        .all(|call| !matches!(call, NestedScrollCall::PreFling { .. })));

    rule.drag(180.0, 100.0, 210.0);
    assert_eq!(rule.state().offset(), 0.0);
    assert_eq!(rule.state().visibility(), HeaderVisibility::Expanded);
}

#[test]
fn horizontal_drag_is_rejected_and_dispatches_nothing() {
    let (mut rule, parent) = rule_with_parent(NestedHeaderConfig::default());

    let down = rule.press(100.0, 200.0);
    let mut moves = Vec::new();
    for step in 1..=6 {
        let step = step as f32;
        moves.push(rule.move_pointer(down.id, 100.0 + step * 15.0, 200.0 - step * 4.0));
    }
    rule.release(down.id, 190.0, 176.0);

    assert!(moves.iter().all(|event| !event.is_consumed()));
    assert_eq!(rule.state().offset(), 0.0);
    assert_eq!(parent.call_count(), 0);
    assert!(!rule.state().is_flinging());
}

#[test]
fn consumed_input_is_left_alone() {
    let (mut rule, parent) = rule_with_parent(NestedHeaderConfig::default());

    let down = rule.press(100.0, 200.0);
    // Someone else claims the first movement.
    let claimed = PointerEvent::moved(down.id, Point::new(100.0, 170.0), 20);
    claimed.consume();
    rule.state().on_header_pointer_event(&claimed);
    rule.move_pointer(down.id, 100.0, 140.0);
    rule.release(down.id, 100.0, 140.0);

    assert_eq!(rule.state().offset(), 0.0);
    assert_eq!(parent.call_count(), 0);
}

#[test]
fn strict_axis_lock_rejects_diagonal_drags() {
    let diagonal = |config: NestedHeaderConfig| {
        let (mut rule, _) = rule_with_parent(config);
        let down = rule.press(100.0, 200.0);
        rule.move_pointer(down.id, 120.0, 180.0);
        rule.move_pointer(down.id, 140.0, 160.0);
        rule.release(down.id, 140.0, 160.0);
        rule.state().offset()
    };

    assert_eq!(
        diagonal(NestedHeaderConfig::default().with_axis_lock(AxisLockStrictness::Strict)),
        0.0
    );
    assert_eq!(
        diagonal(NestedHeaderConfig::default().with_axis_lock(AxisLockStrictness::Lenient)),
        -40.0
    );
}

#[test]
fn header_drag_reaches_the_inner_collaborator_when_collapsed() {
    let (mut rule, parent) = rule_with_parent(NestedHeaderConfig::default());
    let inner = Rc::new(RecordingConnection::new());
    rule.state().set_header_inner_collaborator(Some(inner.clone()));

    rule.drag(180.0, 290.0, 40.0);
    assert_eq!(rule.state().offset(), -250.0);
    assert_eq!(inner.call_count(), 0);

    // The header bottom sits at y=50 now.
    rule.drag(180.0, 45.0, 5.0);
    assert_eq!(rule.state().offset(), -290.0);
    rule.drag(180.0, 5.0, -35.0);
    assert_eq!(rule.state().offset(), -300.0);

    let leftover: f32 = inner
        .calls()
        .iter()
        .filter_map(|call| match *call {
            NestedScrollCall::PostScroll { available, .. } => Some(available),
            _ => None,
        })
        .sum();
    assert_approx_eq(leftover, -30.0, 0.01, "leftover past the collapsed header");
    assert!(parent.calls().iter().any(|call| matches!(
        call,
        NestedScrollCall::PreScroll {
            source: NestedScrollSource::Drag,
            ..
        }
    )));
}

#[test]
fn content_touch_stops_the_header_fling() {
    let (mut rule, _) = rule_with_parent(NestedHeaderConfig::default());

    let idle = rule.press(180.0, 600.0);
    assert!(!idle.is_consumed());
    rule.release(idle.id, 180.0, 600.0);

    rule.state().dispatch_fling(-2_000.0);
    rule.advance_frames(2);
    let down = rule.press(180.0, 600.0);
    assert!(down.is_consumed());
    assert!(!rule.state().is_flinging());
    let stopped_at = rule.state().offset();
    rule.release(down.id, 180.0, 600.0);
    rule.advance_frames(5);
    assert_eq!(rule.state().offset(), stopped_at);
}

#[test]
fn header_touch_stops_the_list_fling() {
    let (mut rule, _) = rule_with_parent(NestedHeaderConfig::default());
    let stops = Rc::new(Cell::new(0));
    let stops_in = stops.clone();
    rule.state()
        .set_content_fling_canceller(Some(Rc::new(move || stops_in.set(stops_in.get() + 1))));

    let list = SimulatedList::new(rule.state().content_connection(), 5_000.0);
    list.begin_fling(-3_000.0);
    assert!(rule.state().is_content_flinging());

    let down = rule.press(180.0, 100.0);
    assert!(down.is_consumed());
    assert_eq!(stops.get(), 1);
    assert!(!rule.state().is_content_flinging());
    // Grabbed: a move inside the slop already counts.
    rule.move_pointer(down.id, 180.0, 96.0);
    assert_eq!(rule.state().offset(), -4.0);
}

#[test]
fn cancelled_pointer_ends_the_touch() {
    let (mut rule, _) = rule_with_parent(NestedHeaderConfig::default());

    let down = rule.press(180.0, 200.0);
    rule.move_pointer(down.id, 180.0, 160.0);
    assert!(rule.state().is_header_touched());
    rule.cancel_pointer(down.id, 180.0, 160.0);

    assert!(!rule.state().is_header_touched());
    assert!(!rule.state().is_flinging());
    assert_eq!(rule.state().offset(), -40.0);
}
