//! Overlay surface state
//!
//! Holds the configuration and interaction policy of one overlay, and the
//! layout derived from them for the current screen. Every change re-derives
//! the layout; the controller decides when to hand it to the host.

use crate::color::Color;
use crate::host::SurfaceId;
use crate::router::{InteractionPolicy, Route};
use animation::Playback;
use geometry::{
    border_thickness, clamp_border_length, compute_corner_radius, compute_frame, rotation_angle,
    Orientation, Point, Rect, ScreenDescriptor, DEFAULT_BORDER_LENGTH,
};

/// User-facing configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayConfig {
    pub color: Color,
    pub border_length: f64,
    pub animated: bool,
    pub visible: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            color: Color::RED,
            border_length: DEFAULT_BORDER_LENGTH,
            animated: true,
            visible: false,
        }
    }
}

/// Values the host applies to the drawable surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Position and size in screen coordinates
    pub frame: Rect,
    /// The surface's own coordinate space; its origin is offset so local
    /// coordinates coincide with screen coordinates.
    pub bounds: Rect,
    /// Rotation (radians) applied to a surface that does not autorotate
    pub rotation: f64,
    pub border_width: f64,
    pub corner_radius: f64,
    pub color: Color,
    pub playback: Playback,
    pub opaque: bool,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self {
            frame: Rect::default(),
            bounds: Rect::default(),
            rotation: 0.0,
            border_width: 0.0,
            corner_radius: 0.0,
            color: Color::RED,
            playback: Playback::RUNNING,
            opaque: false,
        }
    }
}

pub struct OverlaySurface {
    id: SurfaceId,
    config: OverlayConfig,
    policy: InteractionPolicy,
    screen: Option<ScreenDescriptor>,
    will_autorotate: bool,
    /// Border drawn at zero width while a hide transition plays out
    border_collapsed: bool,
    layout: SurfaceLayout,
}

impl OverlaySurface {
    pub fn new(id: SurfaceId, screen: Option<ScreenDescriptor>, will_autorotate: bool) -> Self {
        let mut surface = Self {
            id,
            config: OverlayConfig::default(),
            policy: InteractionPolicy::default(),
            screen,
            will_autorotate,
            border_collapsed: false,
            layout: SurfaceLayout::default(),
        };
        surface.recompute();
        surface
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn policy(&self) -> &InteractionPolicy {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut InteractionPolicy {
        &mut self.policy
    }

    pub fn screen(&self) -> Option<&ScreenDescriptor> {
        self.screen.as_ref()
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    /// Each setter returns whether the derived layout changed
    pub fn set_color(&mut self, color: Color) -> bool {
        self.config.color = color;
        self.recompute()
    }

    pub fn set_border_length(&mut self, length: f64) -> bool {
        self.config.border_length = clamp_border_length(length);
        self.recompute()
    }

    pub fn set_animated(&mut self, animated: bool) -> bool {
        self.config.animated = animated;
        self.recompute()
    }

    pub fn set_visible(&mut self, visible: bool) -> bool {
        self.config.visible = visible;
        self.recompute()
    }

    pub fn set_border_collapsed(&mut self, collapsed: bool) -> bool {
        self.border_collapsed = collapsed;
        self.recompute()
    }

    pub fn set_screen(&mut self, screen: ScreenDescriptor) -> bool {
        self.screen = Some(screen);
        self.recompute()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        let Some(screen) = self.screen else {
            return false;
        };
        if screen.orientation == orientation {
            return false;
        }
        self.screen = Some(screen.rotated(orientation));
        self.recompute()
    }

    pub fn set_will_autorotate(&mut self, will_autorotate: bool) -> bool {
        self.will_autorotate = will_autorotate;
        self.recompute()
    }

    /// Re-derive the layout, returning whether it changed
    pub fn recompute(&mut self) -> bool {
        let layout = derive_layout(
            &self.config,
            self.screen.as_ref(),
            self.will_autorotate,
            self.border_collapsed,
        );
        let changed = layout != self.layout;
        self.layout = layout;
        changed
    }

    /// Route a point given in surface coordinates.
    ///
    /// An autorotating surface already lives in the current orientation's
    /// space, so only a pre-rotated one has its points unrotated.
    pub fn route(&self, point: Point) -> Route {
        let Some(screen) = &self.screen else {
            return Route::PassThrough;
        };
        let orientation = if self.will_autorotate {
            Orientation::Portrait
        } else {
            screen.orientation
        };
        self.policy.route(
            point,
            self.layout.bounds,
            orientation,
            screen.native_bounds.size,
        )
    }
}

fn derive_layout(
    config: &OverlayConfig,
    screen: Option<&ScreenDescriptor>,
    will_autorotate: bool,
    border_collapsed: bool,
) -> SurfaceLayout {
    let playback = Playback::for_animated(config.animated);
    let Some(screen) = screen else {
        return SurfaceLayout {
            color: config.color,
            playback,
            ..SurfaceLayout::default()
        };
    };

    let length = clamp_border_length(config.border_length);
    let frame = compute_frame(screen, length, will_autorotate);
    let bounds = Rect::new(-length, -length, frame.width(), frame.height());
    let rotation = if will_autorotate {
        0.0
    } else {
        rotation_angle(screen.orientation)
    };
    let border_width = if border_collapsed {
        0.0
    } else {
        border_thickness(length)
    };
    let corner_radius = compute_corner_radius(
        &screen.portrait_safe_area(),
        screen.scale,
        screen.native_pixel_size(),
    );

    SurfaceLayout {
        frame,
        bounds,
        rotation,
        border_width,
        corner_radius,
        color: config.color,
        playback,
        opaque: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{HitTestable, ViewHandle, ViewId};
    use geometry::{EdgeInsets, Size};
    use pretty_assertions::assert_eq;
    use std::f64::consts::FRAC_PI_2;
    use std::sync::Arc;

    fn phone() -> ScreenDescriptor {
        ScreenDescriptor::portrait(
            Size::new(320.0, 568.0),
            2.0,
            EdgeInsets::new(20.0, 0.0, 0.0, 0.0),
        )
    }

    fn notched() -> ScreenDescriptor {
        ScreenDescriptor::portrait(
            Size::new(414.0, 896.0),
            2.0,
            EdgeInsets::new(44.0, 0.0, 34.0, 0.0),
        )
    }

    #[test]
    fn default_layout() {
        let surface = OverlaySurface::new(SurfaceId::new(), Some(phone()), false);
        let layout = surface.layout();
        assert_eq!(layout.frame, Rect::new(-6.0, -6.0, 332.0, 580.0));
        assert_eq!(layout.bounds, Rect::new(-6.0, -6.0, 332.0, 580.0));
        assert_eq!(layout.border_width, 12.0);
        assert_eq!(layout.corner_radius, 0.0);
        assert_eq!(layout.color, Color::RED);
        assert_eq!(layout.playback, Playback::RUNNING);
        assert!(!layout.opaque);
        assert_eq!(*surface.config(), OverlayConfig::default());
    }

    #[test]
    fn setters_recompute_layout() {
        let mut surface = OverlaySurface::new(SurfaceId::new(), Some(phone()), false);

        assert!(surface.set_border_length(10.0));
        assert_eq!(surface.layout().frame, Rect::new(-10.0, -10.0, 340.0, 588.0));
        assert_eq!(surface.layout().border_width, 20.0);

        assert!(surface.set_animated(false));
        assert_eq!(surface.layout().playback, Playback::PAUSED);

        let blue = Color::rgba(0.0, 0.0, 1.0, 1.0);
        assert!(surface.set_color(blue));
        assert_eq!(surface.layout().color, blue);

        assert!(!surface.set_color(blue));
    }

    #[test]
    fn negative_length_clamps() {
        let mut surface = OverlaySurface::new(SurfaceId::new(), Some(phone()), false);
        surface.set_border_length(-4.0);
        assert_eq!(surface.config().border_length, 0.0);
        assert_eq!(surface.layout().frame, Rect::new(0.0, 0.0, 320.0, 568.0));
        assert_eq!(surface.layout().border_width, 0.0);
    }

    #[test]
    fn corner_radius_survives_rotation() {
        let mut surface = OverlaySurface::new(SurfaceId::new(), Some(notched()), false);
        assert_eq!(surface.layout().corner_radius, 48.0);

        assert!(surface.set_orientation(Orientation::LandscapeLeft));
        assert_eq!(surface.layout().corner_radius, 48.0);
        assert_eq!(surface.layout().rotation, FRAC_PI_2);
        assert_eq!(surface.layout().frame, Rect::new(-6.0, -6.0, 426.0, 908.0));
    }

    #[test]
    fn autorotating_surface_is_not_pre_rotated() {
        let mut surface = OverlaySurface::new(SurfaceId::new(), Some(phone()), true);
        surface.set_orientation(Orientation::LandscapeRight);
        assert_eq!(surface.layout().rotation, 0.0);
        assert_eq!(surface.layout().frame, Rect::new(-6.0, -6.0, 580.0, 332.0));
    }

    struct Target(Rect);

    impl HitTestable for Target {
        fn id(&self) -> ViewId {
            5
        }

        fn convert_from_screen(&self, point: Point) -> Point {
            point.offset(-self.0.x(), -self.0.y())
        }

        fn point_inside(&self, point: Point) -> bool {
            Rect::from_size(self.0.size).contains(point)
        }
    }

    #[test]
    fn autorotating_surface_routes_without_unrotating() {
        // Bottom-right corner of the landscape screen
        let target: ViewHandle = Arc::new(Target(Rect::new(540.0, 300.0, 20.0, 20.0)));

        let mut rotating = OverlaySurface::new(SurfaceId::new(), Some(phone()), true);
        rotating.set_orientation(Orientation::LandscapeRight);
        rotating.policy_mut().disable(&[target.clone()]);
        assert_eq!(rotating.route(Point::new(545.0, 305.0)), Route::Forward(5));

        let mut fixed = OverlaySurface::new(SurfaceId::new(), Some(phone()), false);
        fixed.set_orientation(Orientation::LandscapeRight);
        fixed.policy_mut().disable(&[target.clone()]);
        assert_eq!(fixed.route(Point::new(545.0, 305.0)), Route::PassThrough);
        assert_eq!(fixed.route(Point::new(15.0, 545.0)), Route::Forward(5));
    }

    #[test]
    fn collapsed_border_keeps_geometry() {
        let mut surface = OverlaySurface::new(SurfaceId::new(), Some(phone()), false);
        surface.set_border_collapsed(true);
        assert_eq!(surface.layout().border_width, 0.0);
        assert_eq!(surface.layout().frame, Rect::new(-6.0, -6.0, 332.0, 580.0));
    }

    #[test]
    fn screenless_surface_stores_config() {
        let mut surface = OverlaySurface::new(SurfaceId::new(), None, false);
        surface.set_border_length(8.0);
        assert_eq!(surface.layout().frame, Rect::default());
        assert!(!surface.set_orientation(Orientation::LandscapeLeft));
        assert_eq!(surface.route(Point::new(1.0, 1.0)), Route::PassThrough);

        assert!(surface.set_screen(phone()));
        assert_eq!(surface.layout().frame, Rect::new(-8.0, -8.0, 336.0, 584.0));
    }
}
