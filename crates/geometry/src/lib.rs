//! Geometry for the recording overlay
//!
//! Value types shared by every crate of the workspace, plus the pure
//! functions that derive the overlay surface's frame, border thickness,
//! corner radius and rotation from a screen description.

pub mod corners;
pub mod frame;
pub mod rotation;
pub mod screen;

pub use corners::{compute_corner_radius, CornerRadiusCorrection, CORNER_RADIUS_CORRECTIONS};
pub use frame::{border_thickness, clamp_border_length, compute_frame, DEFAULT_BORDER_LENGTH};
pub use rotation::{rotate_point, rotation_angle, unrotate_point};
pub use screen::{DisplayMode, EdgeInsets, Orientation, ScreenDescriptor};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Invalid display mode `{0}`, expected WIDTHxHEIGHT@SCALE")]
    InvalidDisplayMode(String),

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Point in screen points (not pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Size in screen points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same size with width and height exchanged
    pub fn transposed(&self) -> Self {
        Self::new(self.height, self.width)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Rectangle in screen points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Half-open containment, matching how pointer hit areas are tested
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x()
            && point.x < self.right()
            && point.y >= self.y()
            && point.y < self.bottom()
    }

    /// Grow the rectangle by `amount` on every side (shrinks for negative amounts)
    pub fn outset(&self, amount: f64) -> Self {
        Self::new(
            self.x() - amount,
            self.y() - amount,
            self.width() + amount * 2.0,
            self.height() + amount * 2.0,
        )
    }
}
