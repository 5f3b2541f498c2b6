use nested_header_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event with consumption tracking for gesture disambiguation.
///
/// Several handlers see the same event (the header container on the initial
/// pass, the drag recognizer, the host's own handlers). Consuming it tells
/// the others that the movement is already claimed.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    /// Position in the receiving region's coordinates.
    pub position: Point,
    /// Milliseconds on a monotonic clock; feeds the velocity tracker.
    pub uptime_ms: i64,
    /// Shared via Rc<Cell> so consumption is visible across copies.
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Point, uptime_ms: i64) -> Self {
        Self {
            id,
            kind,
            position,
            uptime_ms,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(id: PointerId, position: Point, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Down, position, uptime_ms)
    }

    pub fn moved(id: PointerId, position: Point, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Move, position, uptime_ms)
    }

    pub fn up(id: PointerId, position: Point, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Up, position, uptime_ms)
    }

    pub fn cancel(id: PointerId, position: Point, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Cancel, position, uptime_ms)
    }

    /// Marks this event as claimed.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// Copy in another coordinate space, sharing the consumption state.
    pub fn copy_with_local_position(&self, position: Point) -> Self {
        Self {
            id: self.id,
            kind: self.kind,
            position,
            uptime_ms: self.uptime_ms,
            consumed: self.consumed.clone(),
        }
    }
}
