//! Simulated devices

use clap::ValueEnum;
use overlay::geometry::{DisplayMode, EdgeInsets, ScreenDescriptor, Size};

/// Preset screens selectable with `--device`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Device {
    /// 320x568 @2x, status bar only
    Compact,
    /// 390x844 @3x with a notch and a home indicator
    #[default]
    Notched,
    /// 414x896 @2x LCD notch, whose corners need a correction
    NotchedLcd,
    /// 1024x1366 @2x tablet with a home indicator
    Tablet,
}

impl Device {
    pub const ALL: [Device; 4] = [
        Device::Compact,
        Device::Notched,
        Device::NotchedLcd,
        Device::Tablet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Device::Compact => "Compact",
            Device::Notched => "Notched",
            Device::NotchedLcd => "Notched LCD",
            Device::Tablet => "Tablet",
        }
    }

    /// The device's screen, held in portrait
    pub fn screen(&self) -> ScreenDescriptor {
        let (width, height, scale, top, bottom) = match self {
            Device::Compact => (320.0, 568.0, 2.0, 20.0, 0.0),
            Device::Notched => (390.0, 844.0, 3.0, 47.0, 34.0),
            Device::NotchedLcd => (414.0, 896.0, 2.0, 44.0, 34.0),
            Device::Tablet => (1024.0, 1366.0, 2.0, 24.0, 20.0),
        };
        ScreenDescriptor::portrait(
            Size::new(width, height),
            scale,
            EdgeInsets::new(top, 0.0, bottom, 0.0),
        )
    }
}

/// Screen for a `--screen WxH@scale` override. Custom screens have no
/// safe area, hence square corners.
pub fn custom_screen(mode: DisplayMode) -> ScreenDescriptor {
    ScreenDescriptor::portrait(mode.size, mode.scale, EdgeInsets::ZERO)
}
