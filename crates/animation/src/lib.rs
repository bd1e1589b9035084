//! Declarative animation descriptors for the recording overlay
//!
//! The overlay never interpolates anything itself. It hands these
//! descriptors to the host compositor, which runs them and reports
//! completion back. [`Animation::sample`] is provided so compositors
//! without their own curve engine can evaluate them.

pub mod descriptors;
pub mod playback;
pub mod timing;

pub use descriptors::{
    breathing, hide_transition, show_transition, BREATHING_DURATION, BREATHING_KEY,
    BREATHING_VALUES, TRANSITION_DURATION, TRANSITION_KEY,
};
pub use playback::Playback;
pub use timing::TimingCurve;

use std::time::Duration;

/// Animated layer property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPath {
    Opacity,
    BorderWidth,
}

/// How many times an animation plays
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Repeat {
    Once,
    Count(f64),
    Forever,
}

impl Repeat {
    fn cycles(&self) -> Option<f64> {
        match *self {
            Repeat::Once => Some(1.0),
            Repeat::Count(count) if count.is_finite() && count > 0.0 => Some(count),
            Repeat::Count(_) => Some(1.0),
            Repeat::Forever => None,
        }
    }
}

/// Animation stepping through evenly spaced values
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeAnimation {
    pub key_path: KeyPath,
    pub values: Vec<f64>,
    pub duration: Duration,
    pub timing: TimingCurve,
    pub repeat: Repeat,
    pub removed_on_completion: bool,
}

/// Animation between two values
#[derive(Debug, Clone, PartialEq)]
pub struct BasicAnimation {
    pub key_path: KeyPath,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub timing: TimingCurve,
    pub removed_on_completion: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    Keyframe(KeyframeAnimation),
    Basic(BasicAnimation),
}

impl Animation {
    pub fn key_path(&self) -> KeyPath {
        match self {
            Animation::Keyframe(animation) => animation.key_path,
            Animation::Basic(animation) => animation.key_path,
        }
    }

    /// Length of one cycle
    pub fn duration(&self) -> Duration {
        match self {
            Animation::Keyframe(animation) => animation.duration,
            Animation::Basic(animation) => animation.duration,
        }
    }

    fn repeat(&self) -> Repeat {
        match self {
            Animation::Keyframe(animation) => animation.repeat,
            Animation::Basic(_) => Repeat::Once,
        }
    }

    /// Whether the compositor drops the animation once it has finished
    pub fn removed_on_completion(&self) -> bool {
        match self {
            Animation::Keyframe(animation) => animation.removed_on_completion,
            Animation::Basic(animation) => animation.removed_on_completion,
        }
    }

    /// Total active time, `None` for animations that never finish
    pub fn active_duration(&self) -> Option<Duration> {
        let cycles = self.repeat().cycles()?;
        if cycles == 1.0 {
            return Some(self.duration());
        }
        Duration::try_from_secs_f64(self.duration().as_secs_f64() * cycles).ok()
    }

    /// Whether the animation has logically completed after `elapsed` seconds of local time
    pub fn is_finished(&self, elapsed: f64) -> bool {
        match self.active_duration() {
            Some(active) => elapsed >= active.as_secs_f64(),
            None => false,
        }
    }

    /// Value of the animated property after `elapsed` seconds of local time.
    ///
    /// Returns `None` once a finished animation has been removed, meaning the
    /// layer shows its model value again.
    pub fn sample(&self, elapsed: f64) -> Option<f64> {
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let cycle = self.duration().as_secs_f64();

        let progress = if self.is_finished(elapsed) {
            if self.removed_on_completion() {
                return None;
            }
            1.0
        } else if cycle <= 0.0 {
            1.0
        } else {
            let cycles = elapsed / cycle;
            cycles - cycles.floor()
        };

        match self {
            Animation::Keyframe(animation) => sample_keyframes(animation, progress),
            Animation::Basic(animation) => {
                let eased = animation.timing.apply(progress);
                Some(animation.from + (animation.to - animation.from) * eased)
            }
        }
    }
}

fn sample_keyframes(animation: &KeyframeAnimation, progress: f64) -> Option<f64> {
    let values = &animation.values;
    let (first, last) = (values.first()?, values.last()?);
    if values.len() == 1 {
        return Some(*first);
    }

    let eased = animation.timing.apply(progress);
    if eased >= 1.0 {
        return Some(*last);
    }

    let segments = (values.len() - 1) as f64;
    let position = eased * segments;
    let index = position.floor() as usize;
    let local = position - index as f64;
    let from = values[index];
    let to = values[(index + 1).min(values.len() - 1)];
    Some(from + (to - from) * local)
}
