//! Layer playback speed

/// Speed and time offset of a layer's local clock.
///
/// A paused layer has speed 0 and is frozen at offset 0, so every
/// animation attached to it shows its first frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub speed: f64,
    pub time_offset: f64,
}

impl Playback {
    pub const RUNNING: Playback = Playback {
        speed: 1.0,
        time_offset: 0.0,
    };

    pub const PAUSED: Playback = Playback {
        speed: 0.0,
        time_offset: 0.0,
    };

    pub fn for_animated(animated: bool) -> Self {
        if animated {
            Self::RUNNING
        } else {
            Self::PAUSED
        }
    }

    pub fn is_paused(&self) -> bool {
        self.speed == 0.0
    }

    /// Local time after `elapsed` seconds of host time
    pub fn local_time(&self, elapsed: f64) -> f64 {
        self.time_offset + self.speed * elapsed
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::RUNNING
    }
}
