//! Geometric primitives: Point, Offset, Velocity, Size, Rect

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Offset travelled from `origin` to this point.
    pub fn offset_from(&self, origin: Point) -> Offset {
        Offset::new(self.x - origin.x, self.y - origin.y)
    }
}

/// A 2D displacement in pixels, e.g. a scroll delta offered to a consumer.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    /// Offset with only a vertical component.
    pub const fn vertical(y: f32) -> Self {
        Self { x: 0.0, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn copy_with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    pub fn copy_with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Self) -> Self::Output {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Offset {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Self::Output {
        Offset::new(-self.x, -self.y)
    }
}

/// A 2D velocity in pixels per second.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub const fn vertical(y: f32) -> Self {
        Self { x: 0.0, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Velocity {
    type Output = Velocity;

    fn add(self, rhs: Self) -> Self::Output {
        Velocity::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Velocity {
    type Output = Velocity;

    fn sub(self, rhs: Self) -> Self::Output {
        Velocity::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Velocity {
    type Output = Velocity;

    fn neg(self) -> Self::Output {
        Velocity::new(-self.x, -self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_arithmetic() {
        let a = Offset::new(1.0, -2.0);
        let b = Offset::vertical(5.0);
        assert_eq!(a + b, Offset::new(1.0, 3.0));
        assert_eq!(a - b, Offset::new(1.0, -7.0));
        assert_eq!(-a, Offset::new(-1.0, 2.0));
        assert!(Offset::ZERO.is_zero());
    }

    #[test]
    fn point_offset_from_origin() {
        let start = Point::new(10.0, 10.0);
        let end = Point::new(13.0, 6.0);
        assert_eq!(end.offset_from(start), Offset::new(3.0, -4.0));
        assert_eq!(end.offset_from(start).length(), 5.0);
    }

    #[test]
    fn rect_translate_and_contains() {
        let rect = Rect::from_size(Size::new(100.0, 50.0)).translate(0.0, -20.0);
        assert!(rect.contains(10.0, 0.0));
        assert!(!rect.contains(10.0, 40.0));
        assert_eq!(rect.bottom(), 30.0);
    }
}
