//! Headless harness for a header container
//!
//! The rule owns a runtime, a [`NestedHeaderState`] and fixed-size header and
//! content children. It lays them out after every frame and routes synthetic
//! pointer events to the region they start in.
//!
//! # Example
//!
//! ```
//! use nested_header_testing::NestedHeaderTestRule;
//!
//! let mut rule = NestedHeaderTestRule::new(360.0, 800.0, 300.0, 2000.0);
//! rule.drag(180.0, 250.0, 150.0);
//! assert_eq!(rule.state().offset(), -100.0);
//! ```

use nested_header::{
    NestedHeaderConfig, NestedHeaderLayout, NestedHeaderLayoutResult, NestedHeaderState,
    SavedNestedHeaderState,
};
use nested_header_core::{DefaultScheduler, Runtime, RuntimeHandle};
use nested_header_foundation::{PointerEvent, PointerId};
use nested_header_graphics::{Point, Size};
use nested_header_layout::{Constraints, FixedSize};
use std::sync::Arc;

/// Frame and pointer sampling interval.
pub const FRAME_INTERVAL_MS: i64 = 16;

/// Upper bound for [`NestedHeaderTestRule::wait_for_idle`].
const MAX_IDLE_FRAMES: usize = 2_000;

/// Pause before releasing a drag that should not fling.
const HOLD_MS: i64 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitRegion {
    Header,
    Content,
}

pub struct NestedHeaderTestRule {
    runtime: Runtime,
    state: NestedHeaderState,
    viewport: Size,
    header_height: f32,
    content_height: f32,
    layout: NestedHeaderLayoutResult,
    frame_time_nanos: u64,
    uptime_ms: i64,
    next_pointer: PointerId,
    /// Pointers that are down and the region they went down in.
    active: Vec<(PointerId, HitRegion)>,
}

impl NestedHeaderTestRule {
    pub fn new(width: f32, height: f32, header_height: f32, content_height: f32) -> Self {
        Self::with_config(
            width,
            height,
            header_height,
            content_height,
            NestedHeaderConfig::default(),
        )
    }

    pub fn with_config(
        width: f32,
        height: f32,
        header_height: f32,
        content_height: f32,
        config: NestedHeaderConfig,
    ) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let state = NestedHeaderState::new(runtime.handle(), config);
        Self::from_parts(runtime, state, width, height, header_height, content_height)
    }

    /// Recreates a container from saved state, as after process death.
    pub fn restore(
        width: f32,
        height: f32,
        header_height: f32,
        content_height: f32,
        saved: SavedNestedHeaderState,
    ) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let state =
            NestedHeaderState::restore(runtime.handle(), NestedHeaderConfig::default(), saved);
        Self::from_parts(runtime, state, width, height, header_height, content_height)
    }

    fn from_parts(
        runtime: Runtime,
        state: NestedHeaderState,
        width: f32,
        height: f32,
        header_height: f32,
        content_height: f32,
    ) -> Self {
        let viewport = Size::new(width, height);
        let layout = measure(&state, viewport, header_height, content_height);
        Self {
            runtime,
            state,
            viewport,
            header_height,
            content_height,
            layout,
            frame_time_nanos: 0,
            uptime_ms: 0,
            next_pointer: 1,
            active: Vec::new(),
        }
    }

    pub fn state(&self) -> &NestedHeaderState {
        &self.state
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Result of the most recent layout pass.
    pub fn layout(&self) -> NestedHeaderLayoutResult {
        self.layout
    }

    pub fn relayout(&mut self) -> NestedHeaderLayoutResult {
        self.layout = measure(
            &self.state,
            self.viewport,
            self.header_height,
            self.content_height,
        );
        self.layout
    }

    pub fn set_header_height(&mut self, height: f32) {
        self.header_height = height;
        self.relayout();
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
        self.relayout();
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
        self.relayout();
    }

    /// Runs one frame and lays out again.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_INTERVAL_MS as u64 * 1_000_000;
        self.uptime_ms += FRAME_INTERVAL_MS;
        self.runtime.handle().drain_frame_callbacks(self.frame_time_nanos);
        self.relayout();
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Pumps frames until no animation is pending. Returns the frame count.
    pub fn wait_for_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.handle().has_frame_callbacks() {
            assert!(
                frames < MAX_IDLE_FRAMES,
                "still animating after {} frames",
                MAX_IDLE_FRAMES
            );
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Moves the pointer clock without running frames.
    pub fn advance_uptime(&mut self, millis: i64) {
        self.uptime_ms += millis;
    }

    pub fn hit_test(&self, x: f32, y: f32) -> Option<HitRegion> {
        if self.layout.header.contains(x, y) {
            Some(HitRegion::Header)
        } else if self.layout.content.contains(x, y) {
            Some(HitRegion::Content)
        } else {
            None
        }
    }

    /// Puts a new pointer down. The region it lands in receives the rest of
    /// the gesture.
    pub fn press(&mut self, x: f32, y: f32) -> PointerEvent {
        let id = self.next_pointer;
        self.next_pointer += 1;
        let event = PointerEvent::down(id, Point::new(x, y), self.uptime_ms);
        if let Some(region) = self.hit_test(x, y) {
            self.active.push((id, region));
            self.deliver(region, &event);
        }
        event
    }

    pub fn move_pointer(&mut self, id: PointerId, x: f32, y: f32) -> PointerEvent {
        self.uptime_ms += FRAME_INTERVAL_MS;
        let event = PointerEvent::moved(id, Point::new(x, y), self.uptime_ms);
        if let Some(region) = self.region_of(id) {
            self.deliver(region, &event);
        }
        event
    }

    pub fn release(&mut self, id: PointerId, x: f32, y: f32) -> PointerEvent {
        self.uptime_ms += FRAME_INTERVAL_MS;
        let event = PointerEvent::up(id, Point::new(x, y), self.uptime_ms);
        self.finish_pointer(id, &event);
        event
    }

    pub fn cancel_pointer(&mut self, id: PointerId, x: f32, y: f32) -> PointerEvent {
        let event = PointerEvent::cancel(id, Point::new(x, y), self.uptime_ms);
        self.finish_pointer(id, &event);
        event
    }

    /// Drags vertically from `from_y` to `to_y` and holds still before the
    /// release, so no fling follows.
    pub fn drag(&mut self, x: f32, from_y: f32, to_y: f32) {
        let id = self.press(x, from_y).id;
        self.move_in_steps(id, x, from_y, to_y, 10);
        self.uptime_ms += HOLD_MS;
        self.release(id, x, to_y);
    }

    /// Drags from `from_y` to `to_y` in `steps` moves, one per frame, and
    /// releases at speed.
    pub fn swipe(&mut self, x: f32, from_y: f32, to_y: f32, steps: usize) {
        let id = self.press(x, from_y).id;
        self.move_in_steps(id, x, from_y, to_y, steps.max(1));
        self.release(id, x, to_y);
    }

    fn move_in_steps(&mut self, id: PointerId, x: f32, from_y: f32, to_y: f32, steps: usize) {
        let step_size = (to_y - from_y) / steps as f32;
        let mut y = from_y;
        for step in 1..=steps {
            y = if step == steps { to_y } else { y + step_size };
            self.move_pointer(id, x, y);
        }
    }

    fn region_of(&self, id: PointerId) -> Option<HitRegion> {
        self.active
            .iter()
            .find(|(pointer, _)| *pointer == id)
            .map(|(_, region)| *region)
    }

    fn finish_pointer(&mut self, id: PointerId, event: &PointerEvent) {
        if let Some(region) = self.region_of(id) {
            self.active.retain(|(pointer, _)| *pointer != id);
            self.deliver(region, event);
        }
    }

    /// Hands the event to its region and lays out again, as a host would
    /// after the offset moved.
    fn deliver(&mut self, region: HitRegion, event: &PointerEvent) {
        match region {
            HitRegion::Header => self.state.on_header_pointer_event(event),
            HitRegion::Content => self.state.on_content_pointer_event(event),
        }
        self.relayout();
    }
}

fn measure(
    state: &NestedHeaderState,
    viewport: Size,
    header_height: f32,
    content_height: f32,
) -> NestedHeaderLayoutResult {
    NestedHeaderLayout::measure(
        state,
        Constraints::tight(viewport.width, viewport.height),
        &FixedSize(Size::new(viewport.width, header_height)),
        &FixedSize(Size::new(viewport.width, content_height)),
    )
}
