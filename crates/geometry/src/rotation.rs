//! Rotation between the overlay's fixed coordinate space and the host's

use crate::{Orientation, Point, Size};
use std::f64::consts::{FRAC_PI_2, PI};

/// Angle (radians) applied to a surface that does not rotate with the device
pub fn rotation_angle(orientation: Orientation) -> f64 {
    match orientation {
        Orientation::Portrait => 0.0,
        Orientation::PortraitUpsideDown => PI,
        Orientation::LandscapeLeft => FRAC_PI_2,
        Orientation::LandscapeRight => -FRAC_PI_2,
    }
}

/// Map a point in overlay space to unrotated screen space.
///
/// `size` is the screen's portrait size `(W, H)`.
pub fn unrotate_point(point: Point, orientation: Orientation, size: Size) -> Point {
    let (w, h) = (size.width, size.height);
    match orientation {
        Orientation::Portrait => point,
        Orientation::PortraitUpsideDown => Point::new(w - point.x, h - point.y),
        Orientation::LandscapeLeft => Point::new(h - point.y, point.x),
        Orientation::LandscapeRight => Point::new(point.y, w - point.x),
    }
}

/// Inverse of [`unrotate_point`]
pub fn rotate_point(point: Point, orientation: Orientation, size: Size) -> Point {
    let (w, h) = (size.width, size.height);
    match orientation {
        Orientation::Portrait => point,
        Orientation::PortraitUpsideDown => Point::new(w - point.x, h - point.y),
        Orientation::LandscapeLeft => Point::new(point.y, h - point.x),
        Orientation::LandscapeRight => Point::new(w - point.y, point.x),
    }
}
