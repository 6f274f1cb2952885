//! Status bar adjustment for the light/dark display setting.

use bitflags::bitflags;

/// Bits of the platform `uiMode` configuration value that hold the night mode.
pub const UI_MODE_NIGHT_MASK: u32 = 0x30;
pub const UI_MODE_NIGHT_UNDEFINED: u32 = 0x00;
pub const UI_MODE_NIGHT_NO: u32 = 0x10;
pub const UI_MODE_NIGHT_YES: u32 = 0x20;

bitflags! {
    /// System UI visibility flags, with the platform's values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SystemUiVisibility: u32 {
        /// Draw status bar icons dark so they stay visible on a light background.
        const LIGHT_STATUS_BAR = 0x2000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NightMode {
    Undefined,
    /// Light display.
    No,
    /// Dark display.
    Yes,
}

impl NightMode {
    pub fn from_ui_mode(ui_mode: u32) -> Self {
        match ui_mode & UI_MODE_NIGHT_MASK {
            UI_MODE_NIGHT_NO => NightMode::No,
            UI_MODE_NIGHT_YES => NightMode::Yes,
            _ => NightMode::Undefined,
        }
    }
}

/// A window whose status bar rendering can be changed.
pub trait StatusBarSurface {
    fn set_system_ui_visibility(&mut self, flags: SystemUiVisibility);
}

/// Switches the status bar to dark icons when `ui_mode` is light. Any other mode leaves the surface
/// untouched.
pub fn apply_display_mode(ui_mode: u32, surface: &mut impl StatusBarSurface) {
    if NightMode::from_ui_mode(ui_mode) == NightMode::No {
        surface.set_system_ui_visibility(SystemUiVisibility::LIGHT_STATUS_BAR);
    }
}
