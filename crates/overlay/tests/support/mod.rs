//! Recording host used by the controller tests

#![allow(dead_code)]

use overlay::animation::{Animation, Playback};
use overlay::geometry::{EdgeInsets, Point, Rect, ScreenDescriptor, Size};
use overlay::{
    HitTestable, OverlayEvents, OverlayHost, SurfaceId, SurfaceLayout, TransitionTicket, ViewId,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Attach(SurfaceId),
    Detach(SurfaceId),
    ApplyLayout(SurfaceLayout),
    SetHidden(bool),
    AddAnimation {
        key: String,
        animation: Animation,
        ticket: Option<TransitionTicket>,
    },
    RemoveAnimation(String),
    SetPlayback(Playback),
    Schedule(Duration, TransitionTicket),
    RequestFocus(SurfaceId),
    RestoreFocus(Option<SurfaceId>),
}

pub struct MockHost {
    pub screen: Option<ScreenDescriptor>,
    pub autorotate: bool,
    pub reports_completion: bool,
    pub accept_attach: bool,
    pub supports_focus: bool,
    pub focused: Option<SurfaceId>,
    pub events: Option<OverlayEvents>,
    pub calls: Vec<Call>,
    /// Detached surfaces, readable after the host itself is gone
    pub detached: Arc<Mutex<Vec<SurfaceId>>>,
}

impl MockHost {
    pub fn new(screen: Option<ScreenDescriptor>) -> Self {
        Self {
            screen,
            autorotate: false,
            reports_completion: true,
            accept_attach: true,
            supports_focus: false,
            focused: None,
            events: None,
            calls: Vec::new(),
            detached: Arc::default(),
        }
    }

    pub fn small_phone() -> Self {
        Self::new(Some(small_phone_screen()))
    }

    pub fn without_completion(mut self) -> Self {
        self.reports_completion = false;
        self
    }

    pub fn with_focus(mut self, focused: SurfaceId) -> Self {
        self.supports_focus = true;
        self.focused = Some(focused);
        self
    }

    pub fn animations_added(&self) -> Vec<(String, Option<TransitionTicket>)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::AddAnimation { key, ticket, .. } => Some((key.clone(), *ticket)),
                _ => None,
            })
            .collect()
    }

    pub fn scheduled(&self) -> Vec<(Duration, TransitionTicket)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Schedule(delay, ticket) => Some((*delay, *ticket)),
                _ => None,
            })
            .collect()
    }

    pub fn hidden_flags(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetHidden(hidden) => Some(*hidden),
                _ => None,
            })
            .collect()
    }

    pub fn last_layout(&self) -> Option<SurfaceLayout> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::ApplyLayout(layout) => Some(*layout),
            _ => None,
        })
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl OverlayHost for MockHost {
    fn screen(&self) -> Option<ScreenDescriptor> {
        self.screen
    }

    fn will_autorotate(&self) -> bool {
        self.autorotate
    }

    fn subscribe(&mut self, events: OverlayEvents) {
        self.events = Some(events);
    }

    fn attach_surface(&mut self, id: SurfaceId, _layout: &SurfaceLayout) -> bool {
        if self.accept_attach {
            self.calls.push(Call::Attach(id));
        }
        self.accept_attach
    }

    fn detach_surface(&mut self, id: SurfaceId) {
        self.calls.push(Call::Detach(id));
        self.detached.lock().unwrap().push(id);
    }

    fn apply_layout(&mut self, _id: SurfaceId, layout: &SurfaceLayout) {
        self.calls.push(Call::ApplyLayout(*layout));
    }

    fn set_hidden(&mut self, _id: SurfaceId, hidden: bool) {
        self.calls.push(Call::SetHidden(hidden));
    }

    fn add_animation(
        &mut self,
        _id: SurfaceId,
        key: &str,
        animation: Animation,
        ticket: Option<TransitionTicket>,
    ) -> bool {
        self.calls.push(Call::AddAnimation {
            key: key.to_string(),
            animation,
            ticket,
        });
        self.reports_completion
    }

    fn remove_animation(&mut self, _id: SurfaceId, key: &str) {
        self.calls.push(Call::RemoveAnimation(key.to_string()));
    }

    fn set_playback(&mut self, _id: SurfaceId, playback: Playback) {
        self.calls.push(Call::SetPlayback(playback));
    }

    fn schedule(&mut self, delay: Duration, ticket: TransitionTicket) {
        self.calls.push(Call::Schedule(delay, ticket));
    }

    fn focused_surface(&self) -> Option<SurfaceId> {
        self.focused
    }

    fn request_focus(&mut self, id: SurfaceId) -> bool {
        if !self.supports_focus {
            return false;
        }
        self.calls.push(Call::RequestFocus(id));
        self.focused = Some(id);
        true
    }

    fn restore_focus(&mut self, previous: Option<SurfaceId>) {
        self.calls.push(Call::RestoreFocus(previous));
        self.focused = previous;
    }
}

pub fn small_phone_screen() -> ScreenDescriptor {
    ScreenDescriptor::portrait(Size::new(320.0, 568.0), 2.0, EdgeInsets::new(20.0, 0.0, 0.0, 0.0))
}

/// Rectangular view in unrotated screen coordinates
pub struct BoxView {
    pub id: ViewId,
    pub frame: Rect,
}

impl BoxView {
    pub fn new(id: ViewId, frame: Rect) -> Self {
        Self { id, frame }
    }
}

impl HitTestable for BoxView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn convert_from_screen(&self, point: Point) -> Point {
        point.offset(-self.frame.x(), -self.frame.y())
    }

    fn point_inside(&self, point: Point) -> bool {
        Rect::from_size(self.frame.size).contains(point)
    }
}
