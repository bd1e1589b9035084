//! Public façade of the overlay

use crate::color::Color;
use crate::host::{OverlayEvent, OverlayEvents, OverlayHost, SurfaceId, TransitionTicket};
use crate::router::{Route, ViewHandle, ViewId};
use crate::surface::{OverlayConfig, OverlaySurface, SurfaceLayout};
use crate::{OverlayError, OverlayResult};
use animation::{
    breathing, hide_transition, show_transition, BREATHING_KEY, TRANSITION_DURATION,
    TRANSITION_KEY,
};
use crossbeam_channel::{unbounded, Receiver};
use geometry::{Point, DEFAULT_BORDER_LENGTH};
use tracing::{debug, trace, warn};

/// Settled or in-flight visibility of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
    /// Hide transition running; completes only for a ticket with this epoch
    Hiding { epoch: u64 },
}

/// Options for the one-call convenience constructors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayOptions {
    pub color: Color,
    pub border_length: f64,
    pub animated: bool,
    pub interactions_enabled: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            color: Color::RED,
            border_length: DEFAULT_BORDER_LENGTH,
            animated: true,
            interactions_enabled: true,
        }
    }
}

/// Owns one overlay surface and drives it through the host.
///
/// While the overlay is attached (visible or fading out) the controller is
/// the surface's owner; dropping it detaches the surface immediately.
pub struct OverlayController<H: OverlayHost> {
    host: H,
    surface: OverlaySurface,
    visibility: Visibility,
    attached: bool,
    epoch: u64,
    /// Surface that had focus before the overlay claimed it
    focus_claim: Option<Option<SurfaceId>>,
    events: OverlayEvents,
    inbox: Receiver<OverlayEvent>,
}

impl<H: OverlayHost> OverlayController<H> {
    /// Create a hidden overlay. Without a screen the overlay stays inert
    /// until the host reports one.
    pub fn new(mut host: H) -> Self {
        let (tx, inbox) = unbounded();
        let events = OverlayEvents::new(tx);
        host.subscribe(events.clone());

        let surface = OverlaySurface::new(SurfaceId::new(), host.screen(), host.will_autorotate());
        debug!(
            surface = %surface.id(),
            has_screen = surface.screen().is_some(),
            "Created overlay"
        );

        Self {
            host,
            surface,
            visibility: Visibility::Hidden,
            attached: false,
            epoch: 0,
            focus_claim: None,
            events,
            inbox,
        }
    }

    /// Like [`Self::new`], but fails when the host has no screen
    pub fn try_new(host: H) -> OverlayResult<Self> {
        if host.screen().is_none() {
            return Err(OverlayError::NoScreen);
        }
        Ok(Self::new(host))
    }

    /// Hidden overlay configured from `options`
    pub fn with_options(host: H, options: OverlayOptions) -> Self {
        let mut controller = Self::new(host);
        controller.surface.set_color(options.color);
        controller.surface.set_border_length(options.border_length);
        controller.surface.set_animated(options.animated);
        if !options.interactions_enabled {
            controller.surface.policy_mut().disable(&[]);
        }
        controller
    }

    /// Configure and show an overlay in one call
    pub fn add(host: H, options: OverlayOptions) -> Self {
        let mut controller = Self::with_options(host, options);
        controller.show(false);
        controller
    }

    /// Hide the overlay at once and release it
    pub fn remove(mut self) {
        self.hide(false);
    }

    pub fn id(&self) -> SurfaceId {
        self.surface.id()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Another sender for the controller's event channel
    pub fn events(&self) -> OverlayEvents {
        self.events.clone()
    }

    pub fn config(&self) -> &OverlayConfig {
        self.surface.config()
    }

    pub fn color(&self) -> Color {
        self.config().color
    }

    pub fn border_length(&self) -> f64 {
        self.config().border_length
    }

    pub fn is_animated(&self) -> bool {
        self.config().animated
    }

    /// True from `show` until a hide has fully completed
    pub fn is_visible(&self) -> bool {
        self.config().visible
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn has_pending_hide(&self) -> bool {
        matches!(self.visibility, Visibility::Hiding { .. })
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn interactions_enabled(&self) -> bool {
        self.surface.policy().interactions_enabled()
    }

    pub fn whitelist(&self) -> Vec<ViewId> {
        self.surface.policy().whitelist()
    }

    pub fn layout(&self) -> &SurfaceLayout {
        self.surface.layout()
    }

    pub fn show(&mut self, animated: bool) {
        self.pump();
        self.refresh_screen();
        if self.surface.screen().is_none() {
            debug!(surface = %self.id(), "No screen available, ignoring show");
            return;
        }

        match self.visibility {
            Visibility::Visible => {
                self.flush();
                return;
            }
            Visibility::Hiding { .. } => {
                // Abandon the fade; its completion now carries a stale epoch.
                self.epoch += 1;
                self.surface.set_border_collapsed(false);
                self.host.remove_animation(self.surface.id(), TRANSITION_KEY);
                self.visibility = Visibility::Visible;
                self.flush();
                debug!(surface = %self.id(), "Hide cancelled by show");
                return;
            }
            Visibility::Hidden => {}
        }

        if !self.attached && !self.attach() {
            return;
        }

        self.epoch += 1;
        self.surface.set_border_collapsed(false);
        self.surface.set_visible(true);
        self.flush();

        let id = self.surface.id();
        if animated {
            let animation = show_transition(self.surface.layout().border_width);
            self.host.add_animation(id, TRANSITION_KEY, animation, None);
        }
        self.host.set_hidden(id, false);
        self.visibility = Visibility::Visible;
        debug!(surface = %id, animated, "Overlay shown");
    }

    pub fn hide(&mut self, animated: bool) {
        self.pump();
        match self.visibility {
            Visibility::Hidden => return,
            Visibility::Hiding { .. } if animated => return,
            _ => {}
        }

        if !animated {
            self.finish_hide();
            return;
        }

        self.epoch += 1;
        let id = self.surface.id();
        let ticket = TransitionTicket {
            surface: id,
            epoch: self.epoch,
        };
        let width = self.surface.layout().border_width;

        // The model width drops to zero now so nothing pops back once the
        // transition is removed.
        self.surface.set_border_collapsed(true);
        self.flush();

        let notifies = self
            .host
            .add_animation(id, TRANSITION_KEY, hide_transition(width), Some(ticket));
        if !notifies {
            self.host.schedule(TRANSITION_DURATION, ticket);
        }

        self.visibility = Visibility::Hiding { epoch: ticket.epoch };
        debug!(
            surface = %id,
            epoch = ticket.epoch,
            deferred = !notifies,
            "Hide transition started"
        );
    }

    pub fn set_color(&mut self, color: Color) {
        if self.surface.set_color(color) {
            self.flush();
        }
    }

    pub fn set_border_length(&mut self, length: f64) {
        if self.surface.set_border_length(length) {
            self.flush();
        }
    }

    pub fn set_animated(&mut self, animated: bool) {
        if self.surface.set_animated(animated) {
            self.flush();
        }
    }

    /// Claim every event on the overlay except those landing on `views`.
    /// Replaces any previous whitelist.
    ///
    /// The overlay holds the views weakly; keep them alive for as long as
    /// they should stay reachable.
    pub fn disable_interactions(&mut self, except_for: &[ViewHandle]) {
        self.surface.policy_mut().disable(except_for);
        debug!(surface = %self.id(), whitelist = except_for.len(), "Interactions disabled");
        if self.attached {
            self.claim_focus();
        }
    }

    /// Claim events again with the whitelist registered by the last
    /// [`Self::disable_interactions`]
    pub fn disable_interactions_again(&mut self) {
        self.surface.policy_mut().disable_again();
        debug!(
            surface = %self.id(),
            whitelist = self.surface.policy().whitelist().len(),
            "Interactions disabled again"
        );
        if self.attached {
            self.claim_focus();
        }
    }

    /// Let events pass through again. The whitelist is kept.
    pub fn enable_interactions(&mut self) {
        self.surface.policy_mut().enable();
        debug!(surface = %self.id(), "Interactions enabled");
        self.release_focus();
    }

    /// Route a pointer event at `point`, in surface coordinates
    pub fn hit_test(&self, point: Point) -> Route {
        if !self.attached {
            return Route::PassThrough;
        }
        self.surface.route(point)
    }

    /// Whether the overlay consumes an event at `point`
    pub fn point_inside(&self, point: Point) -> bool {
        self.hit_test(point).is_claimed()
    }

    /// Apply every pending host notification. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let pending: Vec<OverlayEvent> = self.inbox.try_iter().collect();
        let count = pending.len();
        for event in pending {
            self.handle_event(event);
        }
        count
    }

    pub fn handle_event(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::ScreenChanged(screen) => {
                trace!(surface = %self.id(), ?screen, "Screen changed");
                if self.surface.set_screen(screen) {
                    self.flush();
                }
            }
            OverlayEvent::OrientationChanged(orientation) => {
                trace!(
                    surface = %self.id(),
                    orientation = orientation.label(),
                    "Orientation changed"
                );
                if self.surface.set_orientation(orientation) {
                    self.flush();
                }
            }
            OverlayEvent::TransitionFinished(ticket) | OverlayEvent::DeferredHideFired(ticket) => {
                if self.is_current_hide(ticket) {
                    self.finish_hide();
                } else {
                    trace!(surface = %self.id(), epoch = ticket.epoch, "Ignoring stale transition");
                }
            }
        }
    }

    fn is_current_hide(&self, ticket: TransitionTicket) -> bool {
        ticket.surface == self.surface.id()
            && self.visibility == (Visibility::Hiding { epoch: ticket.epoch })
            && ticket.epoch == self.epoch
    }

    fn refresh_screen(&mut self) {
        if let Some(screen) = self.host.screen() {
            self.surface.set_screen(screen);
        }
        self.surface.set_will_autorotate(self.host.will_autorotate());
    }

    fn attach(&mut self) -> bool {
        let id = self.surface.id();
        let layout = *self.surface.layout();
        if !self.host.attach_surface(id, &layout) {
            warn!(error = %OverlayError::AttachRejected(id), "Overlay not shown");
            return false;
        }
        self.attached = true;

        self.host.set_hidden(id, true);
        self.host.add_animation(id, BREATHING_KEY, breathing(), None);
        self.host.set_playback(id, layout.playback);
        if !self.surface.policy().interactions_enabled() {
            self.claim_focus();
        }
        debug!(surface = %id, "Surface attached");
        true
    }

    fn finish_hide(&mut self) {
        self.epoch += 1;
        self.surface.set_visible(false);
        self.surface.set_border_collapsed(false);
        self.visibility = Visibility::Hidden;

        if self.attached {
            let id = self.surface.id();
            self.host.remove_animation(id, TRANSITION_KEY);
            self.host.set_hidden(id, true);
            self.release_focus();
            self.host.detach_surface(id);
            self.attached = false;
            debug!(surface = %id, "Overlay hidden");
        }
    }

    /// Push the current layout to the host, if attached
    fn flush(&mut self) {
        if !self.attached {
            return;
        }
        let id = self.surface.id();
        let layout = *self.surface.layout();
        self.host.apply_layout(id, &layout);
        self.host.set_playback(id, layout.playback);
    }

    /// Ask for focus unless the overlay already has it. A repeated claim
    /// keeps the surface recorded by the first one.
    fn claim_focus(&mut self) {
        let id = self.surface.id();
        let focused = self.host.focused_surface();
        if focused == Some(id) {
            return;
        }
        if self.host.request_focus(id) {
            self.focus_claim.get_or_insert(focused);
        }
    }

    fn release_focus(&mut self) {
        if let Some(previous) = self.focus_claim.take() {
            self.host.restore_focus(previous);
        }
    }
}

impl<H: OverlayHost> Drop for OverlayController<H> {
    fn drop(&mut self) {
        if self.attached {
            debug!(surface = %self.id(), "Dropped while attached, detaching");
            let id = self.surface.id();
            self.release_focus();
            self.host.detach_surface(id);
            self.attached = false;
        }
    }
}
