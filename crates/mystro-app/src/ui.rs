//! UI components using egui.

use egui::{Align2, Context, Rect, Vec2};
use mystro_core::{Clock, ShareTargets, ShareWidget};
use mystro_widgets::{MenuItem, PillButton, dropdown_frame, icons, sizing, theme};

/// Actions triggered by the share UI, applied by the application shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// The trigger button was clicked.
    ToggleShare,
    /// Copy the share URL to the clipboard.
    CopyLink,
    /// Open an outbound link.
    OpenUrl { url: String, new_tab: bool },
}

/// Margin between the trigger and the window corner.
const SCREEN_MARGIN: f32 = 16.0;

/// Render the share button and, when open, its dropdown.
///
/// Reports the region covered by both back to the widget so the
/// outside-click listener can hit-test against it.
pub fn render_ui<C: Clock>(ctx: &Context, share: &mut ShareWidget<C>) -> Option<UiAction> {
    let mut action = None;

    let trigger = egui::Area::new(egui::Id::new("share_trigger"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-SCREEN_MARGIN, SCREEN_MARGIN))
        .show(ctx, |ui| {
            PillButton::new("Share")
                .icon(icons::share())
                .tooltip(&share.targets().share_url)
                .show(ui)
        });
    if trigger.inner.clicked() {
        action = Some(UiAction::ToggleShare);
    }

    let mut region = trigger.response.rect;

    if share.is_panel_open() {
        let targets = share.targets();
        let copied = share.is_copied();
        let dropdown = egui::Area::new(egui::Id::new("share_dropdown"))
            .pivot(Align2::RIGHT_TOP)
            .fixed_pos(region.right_bottom() + Vec2::new(0.0, sizing::DROPDOWN_GAP))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| render_dropdown(ui, targets, copied));

        region = region.union(dropdown.response.rect);
        if let Some(dropdown_action) = dropdown.inner {
            action = Some(dropdown_action);
        }
    }

    share.set_root_region(to_kurbo_rect(region));
    action
}

fn render_dropdown(ui: &mut egui::Ui, targets: &ShareTargets, copied: bool) -> Option<UiAction> {
    dropdown_frame()
        .show(ui, |ui| {
            // Frame margins make up the rest of the dropdown width.
            ui.set_width(sizing::DROPDOWN_WIDTH - 16.0);
            ui.spacing_mut().item_spacing = Vec2::new(0.0, 8.0);

            let mut action = None;

            if MenuItem::new(icons::whatsapp(), "Share on WhatsApp")
                .tint(theme::GREEN)
                .show(ui)
                .clicked()
            {
                action = Some(UiAction::OpenUrl {
                    url: targets.whatsapp_link.clone(),
                    new_tab: true,
                });
            }

            if MenuItem::new(icons::mail(), "Share via Email")
                .tint(theme::BLUE)
                .show(ui)
                .clicked()
            {
                action = Some(UiAction::OpenUrl {
                    url: targets.mailto_link.clone(),
                    new_tab: false,
                });
            }

            let copy_item = if copied {
                MenuItem::new(icons::check(), "Copied!").tint(theme::GREEN)
            } else {
                MenuItem::new(icons::copy(), "Copy Link").tint(theme::MUTED)
            };
            if copy_item.tooltip(&targets.share_url).show(ui).clicked() {
                action = Some(UiAction::CopyLink);
            }

            action
        })
        .inner
}

fn to_kurbo_rect(rect: Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.max.x as f64,
        rect.max.y as f64,
    )
}
