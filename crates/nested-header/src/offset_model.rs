//! The header offset and the range it may move in.

/// Bounds for the header offset. `max` is the expanded position (0) and
/// `min` the fully collapsed one; `min <= max` always holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetRange {
    min: f32,
    max: f32,
}

impl Default for OffsetRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl OffsetRange {
    pub const EMPTY: OffsetRange = OffsetRange { min: 0.0, max: 0.0 };

    /// `min` is pulled up to `max` when it lies above it.
    pub fn new(min: f32, max: f32) -> Self {
        let max = if max.is_finite() { max.min(0.0) } else { 0.0 };
        let min = if min.is_finite() { min.min(max) } else { max };
        Self { min, max }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Distance between the expanded and collapsed positions.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn contains(&self, offset: f32) -> bool {
        offset >= self.min && offset <= self.max
    }

    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(self.min, self.max)
    }
}

/// The authoritative header offset.
///
/// Starts `NotReady`; every consume is a no-op until [`mark_ready`] is
/// called after the first layout pass that measured a header. All writes
/// are clamped to the current range.
///
/// [`mark_ready`]: OffsetModel::mark_ready
#[derive(Clone, Debug, Default)]
pub struct OffsetModel {
    offset: f32,
    range: OffsetRange,
    ready: bool,
}

impl OffsetModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a restored offset. It is kept as is until the first
    /// [`set_range`](Self::set_range) clamps it.
    pub fn with_offset(offset: f32) -> Self {
        Self {
            offset: sanitize(offset),
            ..Self::default()
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn range(&self) -> OffsetRange {
        self.range
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// Installs new bounds, clamping the offset into them. Returns true when
    /// the offset had to move.
    pub fn set_range(&mut self, min: f32, max: f32) -> bool {
        self.range = OffsetRange::new(min, max);
        let clamped = self.range.clamp(self.offset);
        let moved = clamped != self.offset;
        self.offset = clamped;
        moved
    }

    /// Moves toward `min` by up to `delta` (< 0). Returns the consumed
    /// amount, `0.0` when nothing moved.
    pub fn consume_hide(&mut self, delta: f32) -> f32 {
        if !self.ready || delta.is_nan() || delta >= 0.0 || self.offset <= self.range.min {
            return 0.0;
        }
        let consumed = if self.offset + delta <= self.range.min {
            self.range.min - self.offset
        } else {
            delta
        };
        self.offset += consumed;
        consumed
    }

    /// Moves toward `max` by up to `delta` (> 0).
    pub fn consume_show(&mut self, delta: f32) -> f32 {
        if !self.ready || delta.is_nan() || delta <= 0.0 || self.offset >= self.range.max {
            return 0.0;
        }
        let consumed = if self.offset + delta >= self.range.max {
            self.range.max - self.offset
        } else {
            delta
        };
        self.offset += consumed;
        consumed
    }

    /// Hides for negative deltas and shows for positive ones.
    pub fn consume(&mut self, delta: f32) -> f32 {
        if delta < 0.0 {
            self.consume_hide(delta)
        } else {
            self.consume_show(delta)
        }
    }

    pub fn try_consume_hide(&mut self, delta: f32) -> bool {
        self.consume_hide(delta) != 0.0
    }

    pub fn try_consume_show(&mut self, delta: f32) -> bool {
        self.consume_show(delta) != 0.0
    }

    /// Jumps to `offset`, clamped. Returns the applied change.
    pub fn snap_to(&mut self, offset: f32) -> f32 {
        if !self.ready || offset.is_nan() {
            return 0.0;
        }
        let target = self.range.clamp(offset);
        let delta = target - self.offset;
        self.offset = target;
        delta
    }
}

fn sanitize(offset: f32) -> f32 {
    if offset.is_finite() {
        offset.min(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(min: f32) -> OffsetModel {
        let mut model = OffsetModel::new();
        model.set_range(min, 0.0);
        model.mark_ready();
        model
    }

    #[test]
    fn range_keeps_min_below_max() {
        let range = OffsetRange::new(50.0, 0.0);
        assert_eq!(range.min(), 0.0);
        assert_eq!(range.max(), 0.0);
        assert_eq!(range.span(), 0.0);

        let range = OffsetRange::new(f32::NAN, 0.0);
        assert_eq!(range, OffsetRange::EMPTY);
    }

    #[test]
    fn not_ready_ignores_everything() {
        let mut model = OffsetModel::new();
        model.set_range(-300.0, 0.0);

        assert!(!model.try_consume_hide(-50.0));
        assert_eq!(model.snap_to(-100.0), 0.0);
        assert_eq!(model.offset(), 0.0);
    }

    #[test]
    fn hide_steps_and_clamps_at_min() {
        let mut model = ready(-300.0);
        for expected in [-50.0, -100.0, -150.0, -200.0] {
            assert_eq!(model.consume_hide(-50.0), -50.0);
            assert_eq!(model.offset(), expected);
        }

        assert_eq!(model.consume_hide(-150.0), -100.0);
        assert_eq!(model.offset(), -300.0);
        assert!(!model.try_consume_hide(-1.0));
    }

    #[test]
    fn show_clamps_at_zero() {
        let mut model = ready(-300.0);
        model.consume_hide(-40.0);

        assert_eq!(model.consume_show(100.0), 40.0);
        assert_eq!(model.offset(), 0.0);
        assert!(!model.try_consume_show(10.0));
    }

    #[test]
    fn wrong_sign_and_zero_are_noops() {
        let mut model = ready(-300.0);
        model.consume_hide(-100.0);

        assert_eq!(model.consume_hide(20.0), 0.0);
        assert_eq!(model.consume_show(-20.0), 0.0);
        assert_eq!(model.consume(0.0), 0.0);
        assert_eq!(model.consume(f32::NAN), 0.0);
        assert_eq!(model.offset(), -100.0);
    }

    #[test]
    fn shrinking_range_clamps_instead_of_resetting() {
        let mut model = ready(-300.0);
        model.consume_hide(-250.0);

        assert!(model.set_range(-120.0, 0.0));
        assert_eq!(model.offset(), -120.0);
        assert!(!model.set_range(-300.0, 0.0));
        assert_eq!(model.offset(), -120.0);
    }

    #[test]
    fn restored_offset_waits_for_first_range() {
        let mut model = OffsetModel::with_offset(-180.0);
        assert_eq!(model.offset(), -180.0);

        model.set_range(-100.0, 0.0);
        assert_eq!(model.offset(), -100.0);

        assert_eq!(OffsetModel::with_offset(f32::INFINITY).offset(), 0.0);
        assert_eq!(OffsetModel::with_offset(25.0).offset(), 0.0);
    }

    #[test]
    fn snap_is_clamped() {
        let mut model = ready(-200.0);
        assert_eq!(model.snap_to(-500.0), -200.0);
        assert_eq!(model.offset(), -200.0);
        assert_eq!(model.snap_to(10.0), 200.0);
        assert_eq!(model.offset(), 0.0);
    }
}
