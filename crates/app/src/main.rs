//! Recording overlay demo
//!
//! Simulates a device screen in a desktop window and drives the overlay on
//! top of it, with the window acting as the overlay's host.

mod compositor;
mod device;
mod host;
mod logging;
mod scheduler;
mod ui;
mod views;

use crate::device::{custom_screen, Device};
use crate::host::DemoHost;
use crate::scheduler::Scheduler;
use crate::ui::DemoApp;
use crate::views::ContentViews;
use clap::Parser;
use eframe::egui;
use overlay::geometry::{DisplayMode, DEFAULT_BORDER_LENGTH};
use overlay::{Color, OverlayController, OverlayOptions, SurfaceId};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "recording-overlay-demo",
    version,
    about = "Recording overlay on a simulated device"
)]
struct Args {
    /// Border color, #RRGGBB or #RRGGBBAA
    #[arg(long, default_value = "#FF0000")]
    color: Color,

    /// Border length in points
    #[arg(long, default_value_t = DEFAULT_BORDER_LENGTH)]
    length: f64,

    /// Start with the breathing animation paused
    #[arg(long)]
    no_animation: bool,

    /// Start with touches blocked except for the stop control
    #[arg(long)]
    locked: bool,

    /// Custom screen as WIDTHxHEIGHT@SCALE, e.g. 600x800@2
    #[arg(long, conflicts_with = "device")]
    screen: Option<DisplayMode>,

    /// Preset device
    #[arg(long, value_enum)]
    device: Option<Device>,
}

impl Args {
    fn options(&self) -> OverlayOptions {
        OverlayOptions {
            color: self.color,
            border_length: self.length,
            animated: !self.no_animation,
            interactions_enabled: true,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();

    let device = args.device.unwrap_or_default();
    let screen = match args.screen {
        Some(mode) => custom_screen(mode),
        None => device.screen(),
    };
    info!(?screen, "Starting demo");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Recording Overlay")
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Recording Overlay",
        native_options,
        Box::new(move |cc| {
            let scheduler = Scheduler::spawn(cc.egui_ctx.clone());
            let host = DemoHost::new(screen, SurfaceId::new(), scheduler);
            let mut overlay = OverlayController::add(host, args.options());

            let views = ContentViews::new();
            if args.locked {
                overlay.disable_interactions(&[views.stop.handle()]);
            }
            Ok(Box::new(DemoApp::new(overlay, views, device)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Demo window failed: {e}"))
}
