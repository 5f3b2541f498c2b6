//! Shared gesture constants for touch/pointer handling.
//!
//! Values are in logical pixels. Hosts on very dense screens scale them by
//! their density before putting them into a config.

/// Touch slop: how far the pointer travels from the press position before a
/// drag may claim the gesture. Matches Android's `ViewConfiguration` (~8dp).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity on a baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Release velocity (px/sec) below which a header drag does not fling.
pub const MIN_FLING_VELOCITY: f32 = 300.0;
