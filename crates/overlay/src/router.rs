//! Input routing
//!
//! Decides whether a pointer event landing on the overlay is claimed by it
//! or forwarded to the content beneath.

use geometry::{unrotate_point, Orientation, Point, Rect, Size};
use std::sync::{Arc, Weak};

/// Host-assigned identity of a view
pub type ViewId = u64;

/// A view that may receive events through the overlay
pub trait HitTestable {
    fn id(&self) -> ViewId;

    /// Map a point in unrotated screen space into the view's own space
    fn convert_from_screen(&self, point: Point) -> Point;

    /// Whether `point` (in the view's own space) is inside its hit area
    fn point_inside(&self, point: Point) -> bool;

    /// Deepest interactive descendant at `point` (in the view's own space)
    fn hit_test(&self, point: Point) -> Option<ViewId> {
        self.point_inside(point).then(|| self.id())
    }

    /// Hidden or disabled views never receive events
    fn is_interactive(&self) -> bool {
        true
    }
}

pub type ViewHandle = Arc<dyn HitTestable + Send + Sync>;

/// Routing decision for one pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Not claimed; dispatch continues to the content beneath
    PassThrough,
    /// Delivered to a whitelisted view (or its deepest descendant)
    Forward(ViewId),
    /// Consumed by the overlay
    Claimed,
}

impl Route {
    pub fn is_claimed(&self) -> bool {
        matches!(self, Route::Claimed)
    }
}

#[derive(Debug, Clone)]
struct WhitelistEntry {
    id: ViewId,
    view: Weak<dyn HitTestable + Send + Sync>,
}

/// Whether interactions pass through the overlay, and which views stay
/// reachable when they do not.
#[derive(Debug, Clone)]
pub struct InteractionPolicy {
    enabled: bool,
    whitelist: Vec<WhitelistEntry>,
}

impl Default for InteractionPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            whitelist: Vec::new(),
        }
    }
}

impl InteractionPolicy {
    pub fn interactions_enabled(&self) -> bool {
        self.enabled
    }

    /// Whitelisted views in registration order, including ones the host has since dropped
    pub fn whitelist(&self) -> Vec<ViewId> {
        self.whitelist.iter().map(|entry| entry.id).collect()
    }

    /// Block interactions except for `views`, which replace the previous whitelist.
    ///
    /// Only weak references are kept; the caller must keep the views alive
    /// for them to stay reachable.
    pub fn disable(&mut self, views: &[ViewHandle]) {
        self.enabled = false;
        self.whitelist = views
            .iter()
            .map(|view| WhitelistEntry {
                id: view.id(),
                view: Arc::downgrade(view),
            })
            .collect();
    }

    /// Let every event through. The whitelist is kept for a later [`Self::disable_again`].
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Block interactions again with the previously registered whitelist
    pub fn disable_again(&mut self) {
        self.enabled = false;
    }

    /// Route a point given in overlay space.
    ///
    /// `bounds` is the overlay's own rectangle, `orientation` and
    /// `portrait_size` describe the screen it covers.
    pub fn route(
        &self,
        point: Point,
        bounds: Rect,
        orientation: Orientation,
        portrait_size: Size,
    ) -> Route {
        if self.enabled || !bounds.contains(point) {
            return Route::PassThrough;
        }

        let unrotated = unrotate_point(point, orientation, portrait_size);
        for entry in &self.whitelist {
            let Some(view) = entry.view.upgrade() else {
                tracing::trace!(view = entry.id, "Skipping invalidated whitelist entry");
                continue;
            };
            if !view.is_interactive() {
                continue;
            }

            let local = view.convert_from_screen(unrotated);
            if view.point_inside(local) {
                let target = view.hit_test(local).unwrap_or_else(|| view.id());
                return Route::Forward(target);
            }
        }

        Route::Claimed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Points a view was asked to convert
    #[derive(Default)]
    struct Recorder(Mutex<Vec<Point>>);

    impl Recorder {
        fn push(&self, point: Point) {
            self.0.lock().unwrap().push(point);
        }

        fn points(&self) -> Vec<Point> {
            self.0.lock().unwrap().clone()
        }
    }

    struct AlwaysHit {
        id: ViewId,
        seen: Recorder,
    }

    impl HitTestable for AlwaysHit {
        fn id(&self) -> ViewId {
            self.id
        }

        fn convert_from_screen(&self, point: Point) -> Point {
            self.seen.push(point);
            point
        }

        fn point_inside(&self, _point: Point) -> bool {
            true
        }
    }

    struct AlwaysMiss {
        id: ViewId,
    }

    impl HitTestable for AlwaysMiss {
        fn id(&self) -> ViewId {
            self.id
        }

        fn convert_from_screen(&self, point: Point) -> Point {
            point
        }

        fn point_inside(&self, _point: Point) -> bool {
            false
        }
    }

    /// Container whose hit area is a frame, with one child button inside
    struct Panel {
        frame: Rect,
        button: Rect,
    }

    impl HitTestable for Panel {
        fn id(&self) -> ViewId {
            10
        }

        fn convert_from_screen(&self, point: Point) -> Point {
            point.offset(-self.frame.x(), -self.frame.y())
        }

        fn point_inside(&self, point: Point) -> bool {
            Rect::from_size(self.frame.size).contains(point)
        }

        fn hit_test(&self, point: Point) -> Option<ViewId> {
            if self.button.contains(point) {
                Some(11)
            } else if self.point_inside(point) {
                Some(self.id())
            } else {
                None
            }
        }
    }

    const SCREEN: Size = Size {
        width: 400.0,
        height: 800.0,
    };

    fn bounds() -> Rect {
        Rect::from_size(SCREEN).outset(6.0)
    }

    fn hit(id: ViewId) -> Arc<AlwaysHit> {
        Arc::new(AlwaysHit {
            id,
            seen: Recorder::default(),
        })
    }

    fn disabled_with(views: &[ViewHandle]) -> InteractionPolicy {
        let mut policy = InteractionPolicy::default();
        policy.disable(views);
        policy
    }

    #[test]
    fn enabled_policy_never_claims() {
        let mut policy = InteractionPolicy::default();
        policy.disable(&[Arc::new(AlwaysMiss { id: 1 })]);
        policy.enable();

        for point in [Point::new(0.0, 0.0), Point::new(200.0, 400.0), Point::new(-3.0, 900.0)] {
            for orientation in Orientation::ALL {
                assert_eq!(
                    policy.route(point, bounds(), orientation, SCREEN),
                    Route::PassThrough
                );
            }
        }
    }

    #[test]
    fn first_matching_view_wins() {
        let miss: ViewHandle = Arc::new(AlwaysMiss { id: 1 });
        let second: ViewHandle = hit(2);
        let third: ViewHandle = hit(3);
        let views = vec![miss, second, third];
        let policy = disabled_with(&views);

        assert_eq!(
            policy.route(Point::new(50.0, 50.0), bounds(), Orientation::Portrait, SCREEN),
            Route::Forward(2)
        );
    }

    #[test]
    fn overlay_claims_when_nothing_matches() {
        let policy = disabled_with(&[Arc::new(AlwaysMiss { id: 1 })]);
        assert_eq!(
            policy.route(Point::new(50.0, 50.0), bounds(), Orientation::Portrait, SCREEN),
            Route::Claimed
        );
        assert!(disabled_with(&[])
            .route(Point::new(1.0, 1.0), bounds(), Orientation::Portrait, SCREEN)
            .is_claimed());
    }

    #[test]
    fn points_outside_the_overlay_pass_through() {
        let policy = disabled_with(&[]);
        assert_eq!(
            policy.route(Point::new(410.0, 10.0), bounds(), Orientation::Portrait, SCREEN),
            Route::PassThrough
        );
        assert_eq!(
            policy.route(Point::new(-5.0, -5.0), bounds(), Orientation::Portrait, SCREEN),
            Route::Claimed
        );
    }

    #[test]
    fn views_receive_unrotated_points() {
        let view = hit(7);
        let handle: ViewHandle = view.clone();
        let policy = disabled_with(&[handle]);

        policy.route(Point::new(10.0, 20.0), bounds(), Orientation::LandscapeLeft, SCREEN);
        assert_eq!(view.seen.points(), vec![Point::new(780.0, 10.0)]);
    }

    #[test]
    fn dropped_views_fall_through() {
        let gone: ViewHandle = hit(1);
        let policy = disabled_with(&[gone.clone(), hit(2) as ViewHandle]);
        drop(gone);

        // `hit(2)` was never kept alive either, so both entries are gone.
        assert_eq!(
            policy.route(Point::new(5.0, 5.0), bounds(), Orientation::Portrait, SCREEN),
            Route::Claimed
        );
        assert_eq!(policy.whitelist(), vec![1, 2]);
    }

    #[test]
    fn forwards_to_deepest_descendant() {
        let panel: ViewHandle = Arc::new(Panel {
            frame: Rect::new(100.0, 700.0, 200.0, 80.0),
            button: Rect::new(10.0, 10.0, 60.0, 40.0),
        });
        let policy = disabled_with(&[panel.clone()]);

        let route = |x, y| policy.route(Point::new(x, y), bounds(), Orientation::Portrait, SCREEN);
        assert_eq!(route(120.0, 720.0), Route::Forward(11));
        assert_eq!(route(250.0, 760.0), Route::Forward(10));
        assert_eq!(route(50.0, 50.0), Route::Claimed);
    }

    #[test]
    fn disable_replaces_whitelist() {
        let a: ViewHandle = hit(1);
        let b: ViewHandle = hit(2);
        let c: ViewHandle = hit(3);

        let mut policy = InteractionPolicy::default();
        policy.disable(&[a, b]);
        policy.disable(&[c]);
        assert_eq!(policy.whitelist(), vec![3]);
    }

    #[test]
    fn enable_keeps_whitelist_for_later() {
        let a: ViewHandle = hit(1);
        let b: ViewHandle = hit(2);

        let mut policy = InteractionPolicy::default();
        policy.disable(&[a.clone(), b.clone()]);
        policy.enable();
        assert!(policy.interactions_enabled());
        assert_eq!(policy.whitelist(), vec![1, 2]);

        policy.disable_again();
        assert_eq!(
            policy.route(Point::new(5.0, 5.0), bounds(), Orientation::Portrait, SCREEN),
            Route::Forward(1)
        );
    }
}
