//! Platform capabilities used by the share widget: the system clipboard and
//! opening outbound links.

pub use imp::{PlatformClipboard, open_url};

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
mod imp {
    use mystro_core::{Clipboard, ClipboardError, PendingWrite};

    /// System clipboard via arboard. The handle is kept alive so the
    /// copied text survives on X11/Wayland without a clipboard manager.
    #[derive(Default)]
    pub struct PlatformClipboard {
        clipboard: Option<arboard::Clipboard>,
    }

    impl PlatformClipboard {
        pub fn new() -> Self {
            Self::default()
        }

        fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
            if self.clipboard.is_none() {
                let clipboard = arboard::Clipboard::new().map_err(to_clipboard_error)?;
                self.clipboard = Some(clipboard);
            }
            self.clipboard
                .as_mut()
                .ok_or_else(|| ClipboardError::Unavailable("clipboard not initialized".to_string()))
        }
    }

    impl Clipboard for PlatformClipboard {
        fn write_text(&mut self, text: &str) -> PendingWrite {
            let result = self
                .handle()
                .and_then(|clipboard| clipboard.set_text(text).map_err(to_clipboard_error));
            if result.is_err() {
                // Reconnect on the next attempt.
                self.clipboard = None;
            }
            PendingWrite::resolved(result)
        }
    }

    fn to_clipboard_error(error: arboard::Error) -> ClipboardError {
        ClipboardError::Unavailable(error.to_string())
    }

    /// Open a link through egui; egui-winit hands it to the system browser
    /// or mail handler.
    pub fn open_url(ctx: &egui::Context, url: &str, new_tab: bool) {
        log::debug!("Opening {}", url);
        ctx.open_url(egui::OpenUrl {
            url: url.to_string(),
            new_tab,
        });
    }
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use mystro_core::{Clipboard, ClipboardError, PendingWrite};
    use wasm_bindgen::JsValue;

    /// Browser clipboard via the async Clipboard API.
    #[derive(Default)]
    pub struct PlatformClipboard;

    impl PlatformClipboard {
        pub fn new() -> Self {
            Self
        }
    }

    impl Clipboard for PlatformClipboard {
        fn write_text(&mut self, text: &str) -> PendingWrite {
            let Some(window) = web_sys::window() else {
                return PendingWrite::resolved(Err(ClipboardError::Unavailable(
                    "no window".to_string(),
                )));
            };
            let navigator = window.navigator();

            // navigator.clipboard is missing outside secure contexts.
            let supported = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
                .map(|value| !value.is_undefined())
                .unwrap_or(false);
            if !supported {
                return PendingWrite::resolved(Err(ClipboardError::Unavailable(
                    "Clipboard API not supported".to_string(),
                )));
            }

            let promise = navigator.clipboard().write_text(text);
            let (pending, completer) = PendingWrite::channel();
            wasm_bindgen_futures::spawn_local(async move {
                let result = wasm_bindgen_futures::JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(to_clipboard_error);
                completer.complete(result);
            });
            pending
        }
    }

    fn to_clipboard_error(error: JsValue) -> ClipboardError {
        let name = js_sys::Reflect::get(&error, &JsValue::from_str("name"))
            .ok()
            .and_then(|name| name.as_string())
            .unwrap_or_default();
        let message = format!("{:?}", error);
        if name == "NotAllowedError" {
            ClipboardError::PermissionDenied(message)
        } else {
            ClipboardError::Unavailable(message)
        }
    }

    /// Open a link. New tabs never get a handle back to this page.
    pub fn open_url(_ctx: &egui::Context, url: &str, new_tab: bool) {
        let Some(window) = web_sys::window() else {
            return;
        };
        log::debug!("Opening {}", url);
        let result = if new_tab {
            window
                .open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer")
                .map(|_| ())
        } else {
            window.location().set_href(url)
        };
        if let Err(e) = result {
            log::error!("Failed to open {}: {:?}", url, e);
        }
    }
}

#[cfg(not(any(feature = "native", target_arch = "wasm32")))]
mod imp {
    use mystro_core::{Clipboard, ClipboardError, PendingWrite};

    /// Placeholder when no clipboard backend is compiled in.
    #[derive(Default)]
    pub struct PlatformClipboard;

    impl PlatformClipboard {
        pub fn new() -> Self {
            Self
        }
    }

    impl Clipboard for PlatformClipboard {
        fn write_text(&mut self, _text: &str) -> PendingWrite {
            PendingWrite::resolved(Err(ClipboardError::Unavailable(
                "no clipboard backend (enable the `native` feature)".to_string(),
            )))
        }
    }

    pub fn open_url(ctx: &egui::Context, url: &str, new_tab: bool) {
        ctx.open_url(egui::OpenUrl {
            url: url.to_string(),
            new_tab,
        });
    }
}
