//! Screen-space geometry in physical pixels and the window overflow rule.

use core::ops::{Add, Sub};

/// Fraction of its own size a window may hang past a screen edge.
pub const MAX_OVERFLOW: f64 = 0.3;

/// Integer point in physical screen pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance; avoids the square root in threshold tests.
    #[inline]
    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// Window or screen extent in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A monitor's rectangle in the virtual desktop.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ScreenArea {
    pub origin: Point,
    pub size: Size,
}

impl ScreenArea {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { origin: Point::new(x, y), size: Size::new(width, height) }
    }
}

/// What a position is clamped against: the window's own size and the screen.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Placement {
    pub window: Size,
    pub screen: ScreenArea,
}

impl Placement {
    pub fn clamp(&self, pos: Point) -> Point {
        clamp_position(pos, self.window, self.screen)
    }
}

/// Clamps a window origin so at most [`MAX_OVERFLOW`] of the window's width
/// and height extend past each screen edge.
pub fn clamp_position(pos: Point, window: Size, screen: ScreenArea) -> Point {
    Point::new(
        clamp_axis(pos.x, window.width, screen.origin.x, screen.size.width),
        clamp_axis(pos.y, window.height, screen.origin.y, screen.size.height),
    )
}

fn clamp_axis(pos: i32, extent: u32, screen_start: i32, screen_extent: u32) -> i32 {
    let extent = i64::from(extent);
    let overflow = (extent as f64 * MAX_OVERFLOW) as i64;
    let min = i64::from(screen_start) - overflow;
    let max = i64::from(screen_start) + i64::from(screen_extent) - (extent - overflow);

    // Window much larger than the screen: pin to the leading edge.
    let clamped = if max < min { min } else { i64::from(pos).clamp(min, max) };
    clamped.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenArea = ScreenArea::new(0, 0, 1920, 1080);
    const WINDOW: Size = Size::new(300, 120);

    #[test]
    fn inside_position_is_unchanged() {
        let p = Point::new(100, 200);
        assert_eq!(clamp_position(p, WINDOW, SCREEN), p);
    }

    #[test]
    fn left_overflow_clamps_to_thirty_percent() {
        // -0.5w → -0.3w
        let p = clamp_position(Point::new(-150, 0), WINDOW, SCREEN);
        assert_eq!(p.x, -90);
    }

    #[test]
    fn right_overflow_clamps_to_seventy_percent_visible() {
        // W + 0.5w → W - 0.7w
        let p = clamp_position(Point::new(1920 + 150, 0), WINDOW, SCREEN);
        assert_eq!(p.x, 1920 - 210);
    }

    #[test]
    fn vertical_axis_uses_window_height() {
        assert_eq!(clamp_position(Point::new(0, -60), WINDOW, SCREEN).y, -36);
        assert_eq!(clamp_position(Point::new(0, 5000), WINDOW, SCREEN).y, 1080 - 84);
    }

    #[test]
    fn respects_monitor_origin() {
        let second = ScreenArea::new(1920, 0, 1280, 1024);
        assert_eq!(clamp_position(Point::new(0, 0), WINDOW, second).x, 1920 - 90);
    }

    #[test]
    fn boundary_values_are_kept() {
        let p = Point::new(-90, 1080 - 84);
        assert_eq!(clamp_position(p, WINDOW, SCREEN), p);
    }

    #[test]
    fn oversized_window_pins_to_leading_edge() {
        let tiny = ScreenArea::new(0, 0, 50, 50);
        let p = clamp_position(Point::new(400, 400), Size::new(1000, 1000), tiny);
        assert_eq!(p, Point::new(-300, -300));
    }

    #[test]
    fn distance_squared() {
        assert_eq!(Point::new(0, 0).distance_sq(Point::new(3, 4)), 25);
    }
}
