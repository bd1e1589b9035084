//! The overlay's animations

use crate::{Animation, BasicAnimation, KeyPath, KeyframeAnimation, Repeat, TimingCurve};
use std::time::Duration;

pub const BREATHING_KEY: &str = "breathe";
pub const BREATHING_VALUES: [f64; 4] = [1.0, 0.7, 0.5, 1.0];
pub const BREATHING_DURATION: Duration = Duration::from_secs(2);

/// Key shared by the show and hide transitions, so one replaces the other
pub const TRANSITION_KEY: &str = "borderWidth";
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Endless opacity loop. It stays attached to the layer for the surface's
/// whole life and is paused through [`crate::Playback`] instead of removed.
pub fn breathing() -> Animation {
    Animation::Keyframe(KeyframeAnimation {
        key_path: KeyPath::Opacity,
        values: BREATHING_VALUES.to_vec(),
        duration: BREATHING_DURATION,
        timing: TimingCurve::Linear,
        repeat: Repeat::Forever,
        removed_on_completion: false,
    })
}

/// Border width growing from nothing to `border_width`
pub fn show_transition(border_width: f64) -> Animation {
    border_transition(0.0, border_width, TimingCurve::EaseOut)
}

/// Border width shrinking from `border_width` to nothing
pub fn hide_transition(border_width: f64) -> Animation {
    border_transition(border_width, 0.0, TimingCurve::EaseIn)
}

fn border_transition(from: f64, to: f64, timing: TimingCurve) -> Animation {
    Animation::Basic(BasicAnimation {
        key_path: KeyPath::BorderWidth,
        from,
        to,
        duration: TRANSITION_DURATION,
        timing,
        removed_on_completion: true,
    })
}
