//! Surface frame and border thickness

use crate::{Rect, ScreenDescriptor};

/// Border length the overlay uses when none is configured
pub const DEFAULT_BORDER_LENGTH: f64 = 6.0;

/// Negative, NaN and infinite lengths collapse to zero
pub fn clamp_border_length(length: f64) -> f64 {
    if length.is_finite() && length > 0.0 {
        length
    } else {
        0.0
    }
}

/// Visible border thickness: the border is drawn centered on the surface
/// edge, so only half of it lands on screen.
pub fn border_thickness(border_length: f64) -> f64 {
    clamp_border_length(border_length) * 2.0
}

/// Frame of the overlay surface.
///
/// A surface that rotates with the device is measured against the
/// orientation-aware bounds; otherwise against the native portrait bounds,
/// and the caller pre-rotates it with [`crate::rotation_angle`].
pub fn compute_frame(screen: &ScreenDescriptor, border_length: f64, will_autorotate: bool) -> Rect {
    let base = if will_autorotate {
        screen.bounds
    } else {
        screen.native_bounds
    };
    base.outset(clamp_border_length(border_length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EdgeInsets, Orientation, Size};
    use pretty_assertions::assert_eq;

    fn screen(width: f64, height: f64) -> ScreenDescriptor {
        ScreenDescriptor::portrait(Size::new(width, height), 2.0, EdgeInsets::ZERO)
    }

    #[test]
    fn frame_expands_screen_by_length_on_every_side() {
        for (width, height) in [(320.0, 568.0), (390.0, 844.0), (1.0, 1.0), (0.0, 0.0)] {
            for length in [0.0, 0.5, 6.0, 20.0] {
                let frame = compute_frame(&screen(width, height), length, false);
                assert_eq!(frame.origin.x, -length);
                assert_eq!(frame.origin.y, -length);
                assert_eq!(frame.width(), width + 2.0 * length);
                assert_eq!(frame.height(), height + 2.0 * length);
            }
        }
    }

    #[test]
    fn small_phone_frame() {
        let frame = compute_frame(&screen(320.0, 568.0), DEFAULT_BORDER_LENGTH, false);
        assert_eq!(frame, Rect::new(-6.0, -6.0, 332.0, 580.0));
        assert_eq!(border_thickness(DEFAULT_BORDER_LENGTH), 12.0);
    }

    #[test]
    fn autorotating_surface_follows_oriented_bounds() {
        let landscape = screen(320.0, 568.0).rotated(Orientation::LandscapeRight);
        assert_eq!(
            compute_frame(&landscape, 6.0, true),
            Rect::new(-6.0, -6.0, 580.0, 332.0)
        );
        assert_eq!(
            compute_frame(&landscape, 6.0, false),
            Rect::new(-6.0, -6.0, 332.0, 580.0)
        );
    }

    #[test]
    fn invalid_lengths_clamp_to_zero() {
        let base = screen(100.0, 200.0);
        for length in [-3.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(compute_frame(&base, length, false), base.native_bounds);
            assert_eq!(border_thickness(length), 0.0);
        }
    }

    #[test]
    fn compute_frame_is_idempotent() {
        let base = screen(375.0, 812.0);
        assert_eq!(compute_frame(&base, 6.0, false), compute_frame(&base, 6.0, false));
    }
}
