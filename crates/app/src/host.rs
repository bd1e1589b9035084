//! Host side of the simulated device
//!
//! `DemoHost` is everything the overlay needs from its environment: the
//! screen, one top-level layer, the compositor clock, a deferred task runner
//! and keyboard focus. The layer is shared with the painter.

use crate::compositor::Layer;
use crate::scheduler::Scheduler;
use overlay::animation::{Animation, Playback};
use overlay::geometry::{Orientation, ScreenDescriptor};
use overlay::{OverlayEvents, OverlayHost, SurfaceId, SurfaceLayout, TransitionTicket};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub type SharedLayer = Arc<Mutex<Layer>>;

pub struct DemoHost {
    screen: ScreenDescriptor,
    layer: SharedLayer,
    scheduler: Scheduler,
    events: Option<OverlayEvents>,
    attached: Option<SurfaceId>,
    /// Surface owning keyboard focus; starts with the app's own window
    focused: Option<SurfaceId>,
}

impl DemoHost {
    pub fn new(screen: ScreenDescriptor, app_window: SurfaceId, scheduler: Scheduler) -> Self {
        Self {
            screen,
            layer: SharedLayer::default(),
            scheduler,
            events: None,
            attached: None,
            focused: Some(app_window),
        }
    }

    pub fn layer(&self) -> SharedLayer {
        self.layer.clone()
    }

    pub fn screen_descriptor(&self) -> ScreenDescriptor {
        self.screen
    }

    pub fn focused(&self) -> Option<SurfaceId> {
        self.focused
    }

    /// Turn the device and notify the overlay
    pub fn rotate(&mut self, orientation: Orientation) {
        if self.screen.orientation == orientation {
            return;
        }
        self.screen = self.screen.rotated(orientation);
        debug!(orientation = orientation.label(), "Device rotated");
        self.notify(|events| events.orientation_changed(orientation));
    }

    /// Swap in another screen, keeping the current orientation
    pub fn replace_screen(&mut self, screen: ScreenDescriptor) {
        self.screen = screen.rotated(self.screen.orientation);
        let screen = self.screen;
        self.notify(|events| events.screen_changed(screen));
    }

    fn notify(&self, send: impl FnOnce(&OverlayEvents) -> overlay::OverlayResult<()>) {
        if let Some(events) = &self.events {
            if let Err(e) = send(events) {
                warn!(error = %e, "Could not notify the overlay");
            }
        }
    }

    fn owns(&self, id: SurfaceId) -> bool {
        self.attached == Some(id)
    }
}

impl OverlayHost for DemoHost {
    fn screen(&self) -> Option<ScreenDescriptor> {
        Some(self.screen)
    }

    fn subscribe(&mut self, events: OverlayEvents) {
        self.events = Some(events);
    }

    fn attach_surface(&mut self, id: SurfaceId, layout: &SurfaceLayout) -> bool {
        if self.attached.is_some_and(|current| current != id) {
            return false;
        }
        self.attached = Some(id);
        self.layer.lock().attach(*layout);
        true
    }

    fn detach_surface(&mut self, id: SurfaceId) {
        if self.owns(id) {
            self.attached = None;
            self.layer.lock().detach();
        }
    }

    fn apply_layout(&mut self, id: SurfaceId, layout: &SurfaceLayout) {
        if self.owns(id) {
            self.layer.lock().layout = *layout;
        }
    }

    fn set_hidden(&mut self, id: SurfaceId, hidden: bool) {
        if self.owns(id) {
            self.layer.lock().hidden = hidden;
        }
    }

    fn add_animation(
        &mut self,
        id: SurfaceId,
        key: &str,
        animation: Animation,
        ticket: Option<TransitionTicket>,
    ) -> bool {
        if !self.owns(id) {
            return false;
        }
        let mut layer = self.layer.lock();
        // A paused layer clock never completes anything
        let reports = !layer.playback.is_paused();
        let ticket = if reports { ticket } else { None };
        layer.add(key, animation, ticket, Instant::now());
        reports
    }

    fn remove_animation(&mut self, id: SurfaceId, key: &str) {
        if self.owns(id) {
            self.layer.lock().remove(key);
        }
    }

    fn set_playback(&mut self, id: SurfaceId, playback: Playback) {
        if !self.owns(id) {
            return;
        }
        let stalled = self.layer.lock().set_playback(playback, Instant::now());
        for (ticket, remaining) in stalled {
            self.schedule(remaining, ticket);
        }
    }

    fn schedule(&mut self, delay: Duration, ticket: TransitionTicket) {
        match &self.events {
            Some(events) => self.scheduler.schedule(delay, ticket, events.clone()),
            None => warn!(epoch = ticket.epoch, "No overlay subscribed, dropping deferred hide"),
        }
    }

    fn focused_surface(&self) -> Option<SurfaceId> {
        self.focused
    }

    fn request_focus(&mut self, id: SurfaceId) -> bool {
        if !self.owns(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    fn restore_focus(&mut self, previous: Option<SurfaceId>) {
        self.focused = previous;
    }
}
