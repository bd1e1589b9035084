//! Boundary with the host environment
//!
//! The host owns the screen, the top-level surface the overlay draws into,
//! the compositor that runs animations, and the clock for deferred tasks.
//! Everything it reports back travels over the [`OverlayEvents`] channel and
//! is applied on the UI thread by [`crate::OverlayController::pump`].

use crate::surface::SurfaceLayout;
use crate::{OverlayError, OverlayResult};
use animation::{Animation, Playback};
use crossbeam_channel::Sender;
use geometry::{Orientation, ScreenDescriptor};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Identity of one overlay surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifies one hide transition. A ticket whose epoch is no longer
/// current is stale and completes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionTicket {
    pub surface: SurfaceId,
    pub epoch: u64,
}

/// Notification from the host
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// Screen size, scale, insets or orientation changed
    ScreenChanged(ScreenDescriptor),
    OrientationChanged(Orientation),
    /// Compositor finished an animation added with this ticket
    TransitionFinished(TransitionTicket),
    /// Deferred task scheduled through [`OverlayHost::schedule`] fired
    DeferredHideFired(TransitionTicket),
}

/// Sending half of a controller's event channel
#[derive(Debug, Clone)]
pub struct OverlayEvents {
    tx: Sender<OverlayEvent>,
}

impl OverlayEvents {
    pub(crate) fn new(tx: Sender<OverlayEvent>) -> Self {
        Self { tx }
    }

    /// Fails only once the controller is gone
    pub fn send(&self, event: OverlayEvent) -> OverlayResult<()> {
        self.tx.send(event).map_err(|_| OverlayError::Disconnected)
    }

    pub fn screen_changed(&self, screen: ScreenDescriptor) -> OverlayResult<()> {
        self.send(OverlayEvent::ScreenChanged(screen))
    }

    pub fn orientation_changed(&self, orientation: Orientation) -> OverlayResult<()> {
        self.send(OverlayEvent::OrientationChanged(orientation))
    }

    pub fn transition_finished(&self, ticket: TransitionTicket) -> OverlayResult<()> {
        self.send(OverlayEvent::TransitionFinished(ticket))
    }

    pub fn deferred_hide_fired(&self, ticket: TransitionTicket) -> OverlayResult<()> {
        self.send(OverlayEvent::DeferredHideFired(ticket))
    }
}

/// Everything the overlay needs from its environment
pub trait OverlayHost {
    /// Screen the overlay is bound to, `None` when no screen is available
    fn screen(&self) -> Option<ScreenDescriptor>;

    /// Whether a top-level surface rotates together with the device
    fn will_autorotate(&self) -> bool {
        false
    }

    /// Receive the channel used to report screen changes, animation
    /// completions and deferred tasks.
    fn subscribe(&mut self, _events: OverlayEvents) {}

    /// Create a surface drawn above all ordinary content. The surface starts hidden.
    fn attach_surface(&mut self, id: SurfaceId, layout: &SurfaceLayout) -> bool;

    fn detach_surface(&mut self, id: SurfaceId);

    fn apply_layout(&mut self, id: SurfaceId, layout: &SurfaceLayout);

    fn set_hidden(&mut self, id: SurfaceId, hidden: bool);

    /// Attach an animation under `key`, replacing any animation already
    /// attached under it. Returns whether the compositor will report
    /// completion for `ticket`.
    fn add_animation(
        &mut self,
        id: SurfaceId,
        key: &str,
        animation: Animation,
        ticket: Option<TransitionTicket>,
    ) -> bool;

    fn remove_animation(&mut self, id: SurfaceId, key: &str);

    fn set_playback(&mut self, id: SurfaceId, playback: Playback);

    /// Fire [`OverlayEvent::DeferredHideFired`] once after `delay`
    fn schedule(&mut self, delay: Duration, ticket: TransitionTicket);

    fn focused_surface(&self) -> Option<SurfaceId> {
        None
    }

    /// Ask for `id` to become the focused top-level surface. Returns
    /// whether the host supports and granted the request.
    fn request_focus(&mut self, _id: SurfaceId) -> bool {
        false
    }

    fn restore_focus(&mut self, _previous: Option<SurfaceId>) {}
}
