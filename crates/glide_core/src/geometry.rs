//! Geometry primitives in logical pixels

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether the height is a usable measurement.
    ///
    /// Boxes that have not been laid out yet report zero, and broken
    /// measurements can surface as NaN or infinity.
    pub fn is_measured(&self) -> bool {
        self.height.is_finite() && self.height > 0.0
    }

    /// Height if measured, otherwise zero
    pub fn height_or_zero(&self) -> f32 {
        if self.is_measured() {
            self.height
        } else {
            0.0
        }
    }
}
