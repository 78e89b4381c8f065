//! Reusable egui widget components with Tailwind-inspired styling.
//!
//! - **Buttons**: pill-shaped trigger buttons with an optional icon
//! - **Menu**: icon menu items and the dropdown panel frame
//! - **Icons**: bundled SVG icons (tint them, they are drawn in white)

pub mod buttons;
pub mod icons;
pub mod menu;

pub use buttons::PillButton;
pub use menu::{MenuItem, dropdown_frame};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Pill button height
    pub const BUTTON_HEIGHT: f32 = 36.0;
    /// Menu item height
    pub const MENU_ITEM_HEIGHT: f32 = 36.0;
    /// Width of dropdown panels (Tailwind `w-48`)
    pub const DROPDOWN_WIDTH: f32 = 192.0;
    /// Gap between a trigger and its dropdown (Tailwind `mt-2`)
    pub const DROPDOWN_GAP: f32 = 8.0;
    /// Small icon size (Tailwind `w-4`)
    pub const ICON_SMALL: f32 = 16.0;
    /// Menu icon size (Tailwind `w-5`)
    pub const ICON_MEDIUM: f32 = 20.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius (Tailwind `rounded-lg`)
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Share button fill (chocolate)
    pub const BRAND: Color32 = Color32::from_rgb(0xD2, 0x69, 0x1E);
    /// Share button hover fill (saddle brown)
    pub const BRAND_HOVER: Color32 = Color32::from_rgb(0x8B, 0x45, 0x13);
    /// Text color (gray-700)
    pub const TEXT: Color32 = Color32::from_rgb(55, 65, 81);
    /// Muted icon color (gray-500)
    pub const MUTED: Color32 = Color32::from_rgb(107, 114, 128);
    /// Border color (gray-200)
    pub const BORDER: Color32 = Color32::from_rgb(229, 231, 235);
    /// Hover background (gray-100)
    pub const HOVER_BG: Color32 = Color32::from_rgb(243, 244, 246);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::WHITE;
    /// Success / WhatsApp (green-500)
    pub const GREEN: Color32 = Color32::from_rgb(34, 197, 94);
    /// Mail (blue-500)
    pub const BLUE: Color32 = Color32::from_rgb(59, 130, 246);
}
