//! WebAssembly entry point and platform-specific code.

use crate::config::{AppConfig, UrlParams};
use wasm_bindgen::prelude::*;

/// Read `user` and `library` from the query string, falling back to the hash.
/// Supports formats like `?user=clara&library=Piano%20Sonatas`
pub fn get_url_params() -> UrlParams {
    let Some(window) = web_sys::window() else {
        return UrlParams::default();
    };
    let location = window.location();

    let mut params = location
        .search()
        .map(|search| UrlParams::parse(&search))
        .unwrap_or_default();

    if let Ok(hash) = location.hash() {
        params = params.or(UrlParams::parse(&hash));
    }

    params
}

/// Origin of the current page, e.g. `https://mystro.example`.
pub fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

/// Build the configuration from the page location.
pub fn config_from_page() -> AppConfig {
    let mut config = AppConfig::default();
    config.apply_url_params(get_url_params());
    if let Some(origin) = page_origin() {
        config.origin = origin;
    }
    config
}

/// Find or create the `mystro-canvas` element and size it to the viewport.
pub fn create_canvas() -> Option<web_sys::HtmlCanvasElement> {
    let window = web_sys::window()?;
    let document = window.document()?;

    if let Some(loading) = document.get_element_by_id("loading") {
        loading.remove();
    }

    let canvas = document
        .get_element_by_id("mystro-canvas")
        .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .or_else(|| {
            let canvas = document.create_element("canvas").ok()?;
            canvas.set_id("mystro-canvas");
            let parent = document
                .get_element_by_id("app")
                .or_else(|| document.body().map(Into::into))?;
            parent.append_child(&canvas).ok()?;
            canvas.dyn_into::<web_sys::HtmlCanvasElement>().ok()
        })?;

    let viewport_width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(480.0);
    let viewport_height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(360.0);
    let dpr = window.device_pixel_ratio();
    canvas.set_width((viewport_width * dpr) as u32);
    canvas.set_height((viewport_height * dpr) as u32);

    let style = canvas.style();
    for (property, value) in [
        ("width", "100%"),
        ("height", "100%"),
        ("display", "block"),
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
    ] {
        let _ = style.set_property(property, value);
    }

    log::info!(
        "Canvas created: {}x{} (dpr: {})",
        viewport_width,
        viewport_height,
        dpr
    );
    Some(canvas)
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub async fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to initialize logger: {}", e).into());
    }

    log::info!("Starting MySTRO Share (WASM)");

    let config = config_from_page();
    if let Some(ref user) = config.username {
        log::info!("Sharing library of '{}' from {}", user, config.origin);
    }

    if let Err(e) = crate::App::run(config).await {
        log::error!("{}", e);
    }
}
