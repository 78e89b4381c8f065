//! MySTRO Share
//!
//! Application shell hosting the library share widget: windowing, click
//! routing, clipboard access and outbound links for native and WASM.

mod app;
mod config;
mod platform;
mod ui;

pub use app::{App, AppError};
pub use config::{AppConfig, ConfigError};
pub use platform::{PlatformClipboard, open_url};
pub use ui::{UiAction, render_ui};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
