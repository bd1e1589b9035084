//! Corner radius of the overlay on devices with rounded displays

use crate::{EdgeInsets, Size};

/// Known displays whose rounded corners do not match their top safe-area
/// inset, keyed on insets, scale and native resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRadiusCorrection {
    pub top_inset: f64,
    pub bottom_inset: f64,
    pub scale: f64,
    pub native_pixel_size: Size,
    pub extra_radius: f64,
}

impl CornerRadiusCorrection {
    fn matches(&self, insets: &EdgeInsets, scale: f64, native_size: Size) -> bool {
        insets.top == self.top_inset
            && insets.bottom == self.bottom_inset
            && scale == self.scale
            && native_size == self.native_pixel_size
    }
}

pub const CORNER_RADIUS_CORRECTIONS: &[CornerRadiusCorrection] = &[
    // 6.1" LCD notched phone
    CornerRadiusCorrection {
        top_inset: 44.0,
        bottom_inset: 34.0,
        scale: 2.0,
        native_pixel_size: Size {
            width: 828.0,
            height: 1792.0,
        },
        extra_radius: 4.0,
    },
];

/// Corner radius for the overlay border.
///
/// `insets` must be the portrait safe-area insets. Displays without a
/// bottom inset have square corners.
pub fn compute_corner_radius(insets: &EdgeInsets, scale: f64, native_size: Size) -> f64 {
    if !(insets.bottom > 0.0) {
        return 0.0;
    }

    let base = insets.top.max(0.0);
    match CORNER_RADIUS_CORRECTIONS
        .iter()
        .find(|correction| correction.matches(insets, scale, native_size))
    {
        Some(correction) => {
            tracing::trace!(
                ?native_size,
                extra = correction.extra_radius,
                "Applying corner radius correction"
            );
            base + correction.extra_radius
        }
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const XR: Size = Size {
        width: 828.0,
        height: 1792.0,
    };

    #[rstest]
    #[case::corrected_display(44.0, 34.0, 2.0, 48.0)]
    #[case::same_insets_at_3x(44.0, 34.0, 3.0, 44.0)]
    #[case::taller_notch(47.0, 34.0, 3.0, 47.0)]
    #[case::home_button(20.0, 0.0, 2.0, 0.0)]
    #[case::no_insets(0.0, 0.0, 1.0, 0.0)]
    fn corner_radius(
        #[case] top: f64,
        #[case] bottom: f64,
        #[case] scale: f64,
        #[case] expected: f64,
    ) {
        let insets = EdgeInsets::new(top, 0.0, bottom, 0.0);
        assert_eq!(compute_corner_radius(&insets, scale, XR), expected);
    }

    #[test]
    fn negative_bottom_inset_means_square_corners() {
        let insets = EdgeInsets::new(44.0, 0.0, -1.0, 0.0);
        assert_eq!(compute_corner_radius(&insets, 2.0, XR), 0.0);
    }

    #[test]
    fn correction_needs_the_measured_resolution() {
        let insets = EdgeInsets::new(44.0, 0.0, 34.0, 0.0);
        assert_eq!(compute_corner_radius(&insets, 2.0, Size::new(1242.0, 2688.0)), 44.0);
    }
}
