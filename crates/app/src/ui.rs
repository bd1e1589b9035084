//! Simulated device window

use crate::device::Device;
use crate::host::{DemoHost, SharedLayer};
use crate::views::{ContentViews, STOP_VIEW};
use eframe::egui;
use overlay::geometry::{rotate_point, Orientation, Point, ScreenDescriptor};
use overlay::{Color, HitTestable, OverlayController, OverlayEvents, Route, ViewId, Visibility};
use std::time::Instant;
use tracing::{debug, info};

const DEVICE_MARGIN: f32 = 24.0;

/// What the last pointer press on the simulated screen did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// Reached the app through a non-blocking overlay
    Content(Option<ViewId>),
    /// Delivered to a whitelisted view through a blocking overlay
    Forwarded(ViewId),
    Blocked,
}

pub struct DemoApp {
    overlay: OverlayController<DemoHost>,
    layer: SharedLayer,
    events: OverlayEvents,
    views: ContentViews,
    device: Device,
    animate_transitions: bool,
    status: String,
}

impl DemoApp {
    pub fn new(overlay: OverlayController<DemoHost>, views: ContentViews, device: Device) -> Self {
        let layer = overlay.host().layer();
        let events = overlay.events();
        Self {
            overlay,
            layer,
            events,
            views,
            device,
            animate_transitions: true,
            status: "Tap the simulated screen".to_string(),
        }
    }

    fn screen(&self) -> ScreenDescriptor {
        self.overlay.host().screen_descriptor()
    }

    /// Report finished animations and apply everything the host sent
    fn drive(&mut self, now: Instant) {
        let finished = self.layer.lock().tick(now);
        for ticket in finished {
            if let Err(e) = self.events.transition_finished(ticket) {
                debug!(error = %e, "Transition finished after the overlay went away");
            }
        }
        self.overlay.pump();

        let screen = self.screen();
        self.views.layout(screen.bounds.size, screen.safe_area);
    }

    /// Route a press at `point`, given in the current orientation's screen space
    pub fn press(&mut self, point: Point) -> PressOutcome {
        let screen = self.screen();
        let surface_point = rotate_point(point, screen.orientation, screen.native_bounds.size);

        let outcome = match self.overlay.hit_test(surface_point) {
            Route::PassThrough => {
                PressOutcome::Content(self.views.view_at(point).map(|view| view.id()))
            }
            Route::Forward(id) => PressOutcome::Forwarded(id),
            Route::Claimed => PressOutcome::Blocked,
        };

        let target = match &outcome {
            PressOutcome::Content(Some(id)) | PressOutcome::Forwarded(id) => Some(*id),
            _ => None,
        };
        if target == Some(STOP_VIEW) {
            self.overlay.hide(self.animate_transitions);
        }

        self.status = self.describe(&outcome);
        debug!(?point, ?outcome, "Press routed");
        outcome
    }

    fn describe(&self, outcome: &PressOutcome) -> String {
        let label = |id: ViewId| self.views.find(id).map_or("unknown view", |view| view.label());
        match outcome {
            PressOutcome::Content(Some(id)) => format!("{} received the tap", label(*id)),
            PressOutcome::Content(None) => "Tap reached the app background".to_string(),
            PressOutcome::Forwarded(id) => {
                format!("{} received the tap through the overlay", label(*id))
            }
            PressOutcome::Blocked => "Tap blocked by the overlay".to_string(),
        }
    }

    fn set_interactions(&mut self, pass_through: bool) {
        if pass_through {
            self.overlay.enable_interactions();
        } else {
            self.overlay.disable_interactions(&[self.views.stop.handle()]);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Recording overlay");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("Show").clicked() {
                self.overlay.show(self.animate_transitions);
            }
            if ui.button("Hide").clicked() {
                self.overlay.hide(self.animate_transitions);
            }
        });
        ui.checkbox(&mut self.animate_transitions, "Animate show and hide");

        let mut breathing = self.overlay.is_animated();
        if ui.checkbox(&mut breathing, "Breathing").changed() {
            self.overlay.set_animated(breathing);
        }

        let mut pass_through = self.overlay.interactions_enabled();
        if ui.checkbox(&mut pass_through, "Touches pass through").changed() {
            self.set_interactions(pass_through);
        }

        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Color");
            let mut color = to_color32(self.overlay.color());
            if ui.color_edit_button_srgba(&mut color).changed() {
                let [r, g, b, a] = color.to_srgba_unmultiplied();
                self.overlay.set_color(Color::from_rgba8(r, g, b, a));
            }
        });

        let mut length = self.overlay.border_length();
        if ui
            .add(egui::Slider::new(&mut length, 0.0..=24.0).text("Border length"))
            .changed()
        {
            self.overlay.set_border_length(length);
        }

        ui.separator();

        let current = self.screen().orientation;
        ui.label("Orientation");
        ui.horizontal_wrapped(|ui| {
            for orientation in Orientation::ALL {
                if ui.selectable_label(current == orientation, orientation.label()).clicked() {
                    self.overlay.host_mut().rotate(orientation);
                }
            }
        });
        if ui.button("Rotate clockwise").clicked() {
            self.overlay.host_mut().rotate(current.rotated_clockwise());
        }

        let mut device = self.device;
        egui::ComboBox::from_label("Device")
            .selected_text(device.label())
            .show_ui(ui, |ui| {
                for preset in Device::ALL {
                    ui.selectable_value(&mut device, preset, preset.label());
                }
            });
        if device != self.device {
            info!(device = device.label(), "Switching device");
            self.device = device;
            self.overlay.host_mut().replace_screen(device.screen());
        }

        ui.separator();

        let layout = *self.overlay.layout();
        let focus = if self.overlay.host().focused() == Some(self.overlay.id()) {
            "overlay"
        } else {
            "app"
        };
        egui::Grid::new("overlay_state").num_columns(2).show(ui, |ui| {
            ui.label("State");
            ui.label(visibility_label(self.overlay.visibility()));
            ui.end_row();
            ui.label("Frame");
            ui.label(format!(
                "{:.0}, {:.0}  {:.0} x {:.0}",
                layout.frame.x(),
                layout.frame.y(),
                layout.frame.width(),
                layout.frame.height()
            ));
            ui.end_row();
            ui.label("Corner radius");
            ui.label(format!("{:.0}", layout.corner_radius));
            ui.end_row();
            ui.label("Key surface");
            ui.label(focus);
            ui.end_row();
        });

        ui.add_space(12.0);
        ui.label(egui::RichText::new(&self.status).strong());
    }

    fn device_screen(&mut self, ui: &mut egui::Ui, now: Instant) {
        let screen = self.screen();
        let size = screen.bounds.size;
        let available = ui.available_size() - egui::vec2(DEVICE_MARGIN, DEVICE_MARGIN) * 2.0;
        let zoom = (available.x / size.width as f32)
            .min(available.y / size.height as f32)
            .max(0.05);

        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let screen_rect = egui::Rect::from_center_size(
            response.rect.center(),
            egui::vec2(size.width as f32, size.height as f32) * zoom,
        );
        let to_screen = |point: Point| {
            screen_rect.min + egui::vec2(point.x as f32, point.y as f32) * zoom
        };
        let to_rect = |rect: overlay::geometry::Rect| {
            egui::Rect::from_min_max(
                to_screen(rect.origin),
                to_screen(Point::new(rect.right(), rect.bottom())),
            )
        };

        let radius = self.overlay.layout().corner_radius as f32 * zoom;
        painter.rect_filled(screen_rect.expand(10.0), radius + 10.0, egui::Color32::from_gray(20));
        painter.rect_filled(screen_rect, radius, egui::Color32::from_rgb(245, 245, 245));

        for view in self.views.all() {
            let rect = to_rect(view.frame());
            let fill = if view.id() == STOP_VIEW {
                egui::Color32::from_rgb(220, 53, 69)
            } else {
                egui::Color32::from_rgb(0, 122, 255)
            };
            painter.rect_filled(rect, 8.0 * zoom, fill);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                view.label(),
                egui::FontId::proportional(15.0 * zoom),
                egui::Color32::WHITE,
            );
        }

        if let Some(presented) = self.layer.lock().present(now) {
            let length = self.overlay.border_length() as f32 * zoom;
            let width = presented.border_width as f32 * zoom;
            if width > 0.0 {
                let outer = screen_rect.expand(length);
                let alpha = presented.opacity.clamp(0.0, 1.0) as f32;
                let [r, g, b, a] = presented.layout.color.to_rgba8();
                let faded = (a as f32 * alpha) as u8;
                let color = egui::Color32::from_rgba_unmultiplied(r, g, b, faded);
                painter.with_clip_rect(screen_rect).rect_stroke(
                    outer.shrink(width / 2.0),
                    presented.layout.corner_radius as f32 * zoom,
                    egui::Stroke::new(width, color),
                );
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = (pos - screen_rect.min) / zoom;
                self.press(Point::new(local.x as f64, local.y as f64));
            }
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.drive(now);

        egui::SidePanel::left("controls")
            .resizable(false)
            .min_width(260.0)
            .show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_gray(60)))
            .show(ctx, |ui| self.device_screen(ui, now));

        // Keep the compositor ticking for the breathing animation
        ctx.request_repaint();
    }
}

fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn visibility_label(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Hidden => "hidden",
        Visibility::Visible => "visible",
        Visibility::Hiding { .. } => "hiding",
    }
}
