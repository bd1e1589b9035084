//! Software compositor for the simulated overlay layer

use overlay::animation::{Animation, KeyPath, Playback};
use overlay::{SurfaceLayout, TransitionTicket};
use std::time::{Duration, Instant};

struct RunningAnimation {
    key: String,
    animation: Animation,
    started: Instant,
    ticket: Option<TransitionTicket>,
}

/// What the painter draws for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub layout: SurfaceLayout,
    pub opacity: f64,
    pub border_width: f64,
}

/// The overlay's layer as the host sees it: the model values last applied
/// by the controller plus the animations running on top of them.
#[derive(Default)]
pub struct Layer {
    pub attached: bool,
    pub hidden: bool,
    pub layout: SurfaceLayout,
    pub playback: Playback,
    animations: Vec<RunningAnimation>,
}

impl Layer {
    pub fn attach(&mut self, layout: SurfaceLayout) {
        *self = Self {
            attached: true,
            hidden: true,
            layout,
            ..Self::default()
        };
    }

    pub fn detach(&mut self) {
        *self = Self::default();
    }

    /// Add `animation` under `key`, replacing any animation with that key
    pub fn add(
        &mut self,
        key: &str,
        animation: Animation,
        ticket: Option<TransitionTicket>,
        now: Instant,
    ) {
        self.remove(key);
        self.animations.push(RunningAnimation {
            key: key.to_string(),
            animation,
            started: now,
            ticket,
        });
    }

    pub fn remove(&mut self, key: &str) {
        self.animations.retain(|running| running.key != key);
    }

    pub fn animation_keys(&self) -> Vec<&str> {
        self.animations.iter().map(|running| running.key.as_str()).collect()
    }

    /// Change the layer clock. Ticketed animations frozen by a pause are
    /// returned with the host time they still had to run.
    pub fn set_playback(
        &mut self,
        playback: Playback,
        now: Instant,
    ) -> Vec<(TransitionTicket, Duration)> {
        let was_running = !self.playback.is_paused();
        self.playback = playback;
        if !(was_running && playback.is_paused()) {
            return Vec::new();
        }

        self.animations
            .iter_mut()
            .filter_map(|running| {
                let ticket = running.ticket.take()?;
                let remaining = running
                    .animation
                    .active_duration()?
                    .saturating_sub(now.saturating_duration_since(running.started));
                Some((ticket, remaining))
            })
            .collect()
    }

    fn local_time(&self, running: &RunningAnimation, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(running.started).as_secs_f64();
        self.playback.local_time(elapsed)
    }

    /// Retire finished animations, returning the tickets to report
    pub fn tick(&mut self, now: Instant) -> Vec<TransitionTicket> {
        let mut finished = Vec::new();
        let mut index = 0;
        while index < self.animations.len() {
            let running = &self.animations[index];
            if !running.animation.is_finished(self.local_time(running, now)) {
                index += 1;
                continue;
            }

            if let Some(ticket) = self.animations[index].ticket.take() {
                finished.push(ticket);
            }
            if self.animations[index].animation.removed_on_completion() {
                self.animations.remove(index);
            } else {
                index += 1;
            }
        }
        finished
    }

    /// Presentation values at `now`, or `None` when nothing is on screen
    pub fn present(&self, now: Instant) -> Option<Presentation> {
        if !self.attached || self.hidden {
            return None;
        }

        let mut opacity = 1.0;
        let mut border_width = self.layout.border_width;
        for running in &self.animations {
            let Some(value) = running.animation.sample(self.local_time(running, now)) else {
                continue;
            };
            match running.animation.key_path() {
                KeyPath::Opacity => opacity = value,
                KeyPath::BorderWidth => border_width = value,
            }
        }

        Some(Presentation {
            layout: self.layout,
            opacity,
            border_width,
        })
    }
}
