use serde::{Deserialize, Serialize};

/// A position relative to the view centre. `angle` is in degrees, 0 points
/// along +x and increasing angles sweep toward +y (screen-down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarPosition {
    pub radius: f64,
    pub angle: f64,
}

impl PolarPosition {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(radius: f64, angle: f64) -> Self {
        Self { radius, angle }
    }

    pub fn to_cartesian(&self) -> Point {
        let rad = self.angle.to_radians();
        Point::new(self.radius * rad.cos(), self.radius * rad.sin())
    }

    /// Inverse of [`PolarPosition::to_cartesian`], angle normalised to `[0, 360)`.
    pub fn from_cartesian(point: Point) -> Self {
        let radius = point.x.hypot(point.y);
        let angle = point.y.atan2(point.x).to_degrees().rem_euclid(360.0);
        Self { radius, angle }
    }

    pub(crate) fn sanitized(self) -> Self {
        Self {
            radius: self.radius.max(0.0),
            angle: self.angle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewSize {
    pub width: i32,
    pub height: i32,
}

impl ViewSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of side `2 * radius` centred in a view of the given size.
    pub fn centered_square(size: ViewSize, radius: f64) -> Self {
        let (w, h) = (size.width as f64, size.height as f64);
        Self::new(
            (w - radius * 2.0) / 2.0,
            (h - radius * 2.0) / 2.0,
            (w + radius * 2.0) / 2.0,
            (h + radius * 2.0) / 2.0,
        )
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}
