//! Bundled SVG icons. Requires an SVG image loader to be installed
//! (`egui_extras::install_image_loaders`).

use egui::{ImageSource, include_image};

pub fn share() -> ImageSource<'static> {
    include_image!("../assets/share.svg")
}

pub fn whatsapp() -> ImageSource<'static> {
    include_image!("../assets/whatsapp.svg")
}

pub fn mail() -> ImageSource<'static> {
    include_image!("../assets/mail.svg")
}

/// Clipboard with an arrow.
pub fn copy() -> ImageSource<'static> {
    include_image!("../assets/copy.svg")
}

pub fn check() -> ImageSource<'static> {
    include_image!("../assets/check.svg")
}
