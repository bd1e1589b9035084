//! Content views of the simulated app

use overlay::geometry::{EdgeInsets, Point, Rect, Size};
use overlay::{HitTestable, ViewHandle, ViewId};
use parking_lot::Mutex;
use std::sync::Arc;

pub const STOP_VIEW: ViewId = 100;

const BUTTON_HEIGHT: f64 = 44.0;
const MARGIN: f64 = 16.0;

/// A tappable rectangle laid out in the current orientation's screen space
pub struct DemoView {
    id: ViewId,
    label: &'static str,
    frame: Mutex<Rect>,
}

impl DemoView {
    pub fn new(id: ViewId, label: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id,
            label,
            frame: Mutex::new(Rect::default()),
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn frame(&self) -> Rect {
        *self.frame.lock()
    }

    pub fn set_frame(&self, frame: Rect) {
        *self.frame.lock() = frame;
    }

    pub fn handle(self: &Arc<Self>) -> ViewHandle {
        self.clone()
    }
}

impl HitTestable for DemoView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn convert_from_screen(&self, point: Point) -> Point {
        let frame = self.frame();
        point.offset(-frame.x(), -frame.y())
    }

    fn point_inside(&self, point: Point) -> bool {
        Rect::from_size(self.frame().size).contains(point)
    }
}

/// Views of the simulated app: a column of content buttons and the stop
/// control the overlay keeps reachable.
pub struct ContentViews {
    pub buttons: Vec<Arc<DemoView>>,
    pub stop: Arc<DemoView>,
}

impl ContentViews {
    pub fn new() -> Self {
        let buttons = ["Compose", "Search", "Settings"]
            .into_iter()
            .zip(1..)
            .map(|(label, id)| DemoView::new(id, label))
            .collect();
        Self {
            buttons,
            stop: DemoView::new(STOP_VIEW, "Stop recording"),
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &Arc<DemoView>> {
        self.buttons.iter().chain(std::iter::once(&self.stop))
    }

    pub fn find(&self, id: ViewId) -> Option<&Arc<DemoView>> {
        self.all().find(|view| view.id == id)
    }

    /// Topmost view under `point`, in screen space
    pub fn view_at(&self, point: Point) -> Option<&Arc<DemoView>> {
        self.all().find(|view| view.frame().contains(point))
    }

    /// Lay the views out for a screen of `size` with `safe_area` insets
    pub fn layout(&self, size: Size, safe_area: EdgeInsets) {
        let left = safe_area.left + MARGIN;
        let width = (size.width - safe_area.left - safe_area.right - MARGIN * 2.0).max(0.0);

        let mut y = safe_area.top + MARGIN;
        for button in &self.buttons {
            button.set_frame(Rect::new(left, y, width, BUTTON_HEIGHT));
            y += BUTTON_HEIGHT + MARGIN / 2.0;
        }

        let stop_y = size.height - safe_area.bottom - MARGIN - BUTTON_HEIGHT;
        self.stop.set_frame(Rect::new(left, stop_y, width, BUTTON_HEIGHT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay::geometry::{Orientation, ScreenDescriptor};
    use pretty_assertions::assert_eq;

    fn laid_out(orientation: Orientation) -> (ContentViews, ScreenDescriptor) {
        let screen = ScreenDescriptor::portrait(
            Size::new(390.0, 844.0),
            3.0,
            EdgeInsets::new(47.0, 0.0, 34.0, 0.0),
        )
        .rotated(orientation);
        let views = ContentViews::new();
        views.layout(screen.bounds.size, screen.safe_area);
        (views, screen)
    }

    #[test]
    fn stop_sits_above_the_home_indicator() {
        let (views, _) = laid_out(Orientation::Portrait);
        assert_eq!(views.stop.frame(), Rect::new(16.0, 750.0, 358.0, 44.0));
        assert_eq!(views.view_at(Point::new(100.0, 770.0)).map(|view| view.id), Some(STOP_VIEW));
    }

    #[test]
    fn landscape_layout_respects_side_insets() {
        let (views, screen) = laid_out(Orientation::LandscapeLeft);
        assert_eq!(screen.safe_area.left, 34.0);
        assert_eq!(views.buttons[0].frame().x(), 50.0);
        assert_eq!(views.buttons[0].frame().width(), 844.0 - 34.0 - 47.0 - 32.0);
        assert!(views.stop.frame().bottom() <= screen.bounds.height());
    }

    #[test]
    fn views_are_found_by_id() {
        let views = ContentViews::new();
        assert_eq!(views.find(2).map(|view| view.label()), Some("Search"));
        assert_eq!(views.find(STOP_VIEW).map(|view| view.label()), Some("Stop recording"));
        assert!(views.find(42).is_none());
    }
}
