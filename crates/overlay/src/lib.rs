//! Recording overlay
//!
//! Animated border drawn above an application's content to signal an
//! ongoing recording, with selective input pass-through.

pub mod color;
pub mod controller;
pub mod host;
pub mod router;
pub mod surface;

pub use color::Color;
pub use controller::{OverlayController, OverlayOptions, Visibility};
pub use host::{OverlayEvent, OverlayEvents, OverlayHost, SurfaceId, TransitionTicket};
pub use router::{HitTestable, InteractionPolicy, Route, ViewHandle, ViewId};
pub use surface::{OverlayConfig, OverlaySurface, SurfaceLayout};

pub use animation;
pub use geometry;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("No screen available for the overlay")]
    NoScreen,

    #[error("Host refused to attach surface {0}")]
    AttachRejected(SurfaceId),

    #[error("Overlay event channel disconnected")]
    Disconnected,

    #[error("Invalid color `{0}`, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
}

pub type OverlayResult<T> = Result<T, OverlayError>;
