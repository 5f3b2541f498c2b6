//! Assertion helpers for offsets produced by animations.

use nested_header_graphics::Rect;

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that `offset` lies in `[min, max]`.
pub fn assert_within(offset: f32, min: f32, max: f32, msg: &str) {
    assert!(
        offset >= min && offset <= max,
        "{}: {} outside [{}, {}]",
        msg,
        offset,
        min,
        max
    );
}

pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}
