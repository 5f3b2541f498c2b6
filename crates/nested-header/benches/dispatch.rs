use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nested_header::{
    Constraints, FixedSize, NestedHeaderConfig, NestedHeaderLayout, NestedHeaderState,
    NestedScrollSource, NoOpConnection, Size,
};
use nested_header_core::{DefaultScheduler, Runtime};
use std::rc::Rc;
use std::sync::Arc;

fn ready_state(runtime: &Runtime) -> NestedHeaderState {
    let state = NestedHeaderState::new(runtime.handle(), NestedHeaderConfig::default());
    state.set_size(300.0, 10_000.0, 800.0);
    state
}

fn dispatch_alone(c: &mut Criterion) {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = ready_state(&runtime);
    let mut direction = -1.0;
    c.bench_function("dispatch_nested_scroll", |b| {
        b.iter(|| {
            let result =
                state.dispatch_nested_scroll(black_box(direction * 7.0), NestedScrollSource::Drag);
            if result.leftover.y != 0.0 {
                direction = -direction;
            }
            black_box(result)
        })
    });
}

fn dispatch_with_collaborators(c: &mut Criterion) {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = ready_state(&runtime);
    state.set_outer_parent(Some(Rc::new(NoOpConnection)));
    state.set_header_inner_collaborator(Some(Rc::new(NoOpConnection)));
    let mut direction = -1.0;
    c.bench_function("dispatch_nested_scroll_with_collaborators", |b| {
        b.iter(|| {
            let result =
                state.dispatch_nested_scroll(black_box(direction * 7.0), NestedScrollSource::Drag);
            if result.leftover.y != 0.0 {
                direction = -direction;
            }
            black_box(result)
        })
    });
}

fn layout_pass(c: &mut Criterion) {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let state = ready_state(&runtime);
    let header = FixedSize(Size::new(360.0, 300.0));
    let content = FixedSize(Size::new(360.0, 10_000.0));
    c.bench_function("layout_pass", |b| {
        b.iter(|| {
            black_box(NestedHeaderLayout::measure(
                &state,
                Constraints::tight(360.0, 800.0),
                &header,
                &content,
            ))
        })
    });
}

criterion_group!(
    dispatch,
    dispatch_alone,
    dispatch_with_collaborators,
    layout_pass
);
criterion_main!(dispatch);
