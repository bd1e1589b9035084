//! Screen description supplied by the host

use crate::{GeometryError, GeometryResult, Rect, Size};
use std::fmt;
use std::str::FromStr;

/// Interface orientation of the screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Portrait,
        Orientation::PortraitUpsideDown,
        Orientation::LandscapeLeft,
        Orientation::LandscapeRight,
    ];

    pub fn is_landscape(&self) -> bool {
        matches!(self, Orientation::LandscapeLeft | Orientation::LandscapeRight)
    }

    /// Next orientation when turning the device a quarter turn clockwise
    pub fn rotated_clockwise(&self) -> Self {
        match self {
            Orientation::Portrait => Orientation::LandscapeLeft,
            Orientation::LandscapeLeft => Orientation::PortraitUpsideDown,
            Orientation::PortraitUpsideDown => Orientation::LandscapeRight,
            Orientation::LandscapeRight => Orientation::Portrait,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::PortraitUpsideDown => "portrait-upside-down",
            Orientation::LandscapeLeft => "landscape-left",
            Orientation::LandscapeRight => "landscape-right",
        }
    }
}

/// Safe-area insets, in points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Insets as measured in `orientation`, given the insets measured in portrait.
    ///
    /// In landscape-left the portrait top edge faces the screen's right edge,
    /// in landscape-right it faces the left edge.
    pub fn from_portrait(portrait: EdgeInsets, orientation: Orientation) -> Self {
        let p = portrait;
        match orientation {
            Orientation::Portrait => p,
            Orientation::PortraitUpsideDown => Self::new(p.bottom, p.right, p.top, p.left),
            Orientation::LandscapeLeft => Self::new(p.left, p.bottom, p.right, p.top),
            Orientation::LandscapeRight => Self::new(p.right, p.top, p.left, p.bottom),
        }
    }

    /// Inverse of [`EdgeInsets::from_portrait`]
    pub fn to_portrait(&self, orientation: Orientation) -> Self {
        let r = self;
        match orientation {
            Orientation::Portrait => *r,
            Orientation::PortraitUpsideDown => Self::new(r.bottom, r.right, r.top, r.left),
            Orientation::LandscapeLeft => Self::new(r.right, r.top, r.left, r.bottom),
            Orientation::LandscapeRight => Self::new(r.left, r.bottom, r.right, r.top),
        }
    }
}

/// Read-only description of the screen the overlay is bound to.
///
/// `bounds` follows the current orientation; `native_bounds` is the
/// portrait rectangle and never changes with rotation. Both are in points,
/// `scale` converts points to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenDescriptor {
    pub bounds: Rect,
    pub native_bounds: Rect,
    pub scale: f64,
    pub safe_area: EdgeInsets,
    pub orientation: Orientation,
}

impl ScreenDescriptor {
    /// Screen held in portrait with the given point size
    pub fn portrait(size: Size, scale: f64, safe_area: EdgeInsets) -> Self {
        let bounds = Rect::from_size(size);
        Self {
            bounds,
            native_bounds: bounds,
            scale: sanitize_scale(scale),
            safe_area,
            orientation: Orientation::Portrait,
        }
    }

    /// The same physical screen turned to `orientation`
    pub fn rotated(&self, orientation: Orientation) -> Self {
        let portrait_insets = self.safe_area.to_portrait(self.orientation);
        let native = self.native_bounds.size;
        let size = if orientation.is_landscape() {
            native.transposed()
        } else {
            native
        };

        Self {
            bounds: Rect::from_size(size),
            native_bounds: self.native_bounds,
            scale: self.scale,
            safe_area: EdgeInsets::from_portrait(portrait_insets, orientation),
            orientation,
        }
    }

    /// Safe-area insets as they read with the device held in portrait
    pub fn portrait_safe_area(&self) -> EdgeInsets {
        self.safe_area.to_portrait(self.orientation)
    }

    /// Native size in physical pixels
    pub fn native_pixel_size(&self) -> Size {
        Size::new(
            self.native_bounds.width() * self.scale,
            self.native_bounds.height() * self.scale,
        )
    }
}

fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Screen size and scale as written on the command line: `390x844@3`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMode {
    pub size: Size,
    pub scale: f64,
}

impl FromStr for DisplayMode {
    type Err = GeometryError;

    fn from_str(s: &str) -> GeometryResult<Self> {
        let invalid = || GeometryError::InvalidDisplayMode(s.to_string());

        let (dimensions, scale) = match s.trim().split_once('@') {
            Some((dimensions, scale)) => (dimensions, parse_dimension(scale)?),
            None => (s.trim(), 1.0),
        };
        let (width, height) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

        let size = Size::new(parse_dimension(width)?, parse_dimension(height)?);
        if size.is_empty() || scale <= 0.0 {
            return Err(invalid());
        }

        Ok(Self { size, scale })
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{}", self.size.width, self.size.height, self.scale)
    }
}

fn parse_dimension(raw: &str) -> GeometryResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| GeometryError::InvalidDimension(raw.to_string()))?;
    if !value.is_finite() {
        return Err(GeometryError::InvalidDimension(raw.to_string()));
    }
    Ok(value)
}
