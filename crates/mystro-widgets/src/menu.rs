//! Menu components: icon menu items and dropdown frames.

use egui::{
    Color32, CornerRadius, CursorIcon, Frame, Image, ImageSource, Margin, Pos2, Rect, Response,
    Sense, Stroke, Ui, vec2,
};

use crate::{sizing, theme};

/// A full-width dropdown entry with a tinted icon and a label.
pub struct MenuItem<'a> {
    icon: ImageSource<'a>,
    icon_tint: Color32,
    label: &'a str,
    tooltip: Option<&'a str>,
}

impl<'a> MenuItem<'a> {
    /// Create a menu item.
    pub fn new(icon: ImageSource<'a>, label: &'a str) -> Self {
        Self {
            icon,
            icon_tint: theme::MUTED,
            label,
            tooltip: None,
        }
    }

    /// Set the icon color.
    pub fn tint(mut self, tint: Color32) -> Self {
        self.icon_tint = tint;
        self
    }

    /// Hover text, e.g. the link the item opens.
    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Show the item. Check `clicked()` on the response.
    pub fn show(self, ui: &mut Ui) -> Response {
        let size = vec2(ui.available_width(), sizing::MENU_ITEM_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            if response.hovered() {
                ui.painter().rect_filled(
                    rect,
                    CornerRadius::same(sizing::PANEL_RADIUS),
                    theme::HOVER_BG,
                );
            }

            let icon_rect = Rect::from_min_size(
                Pos2::new(rect.left() + 8.0, rect.center().y - sizing::ICON_MEDIUM / 2.0),
                vec2(sizing::ICON_MEDIUM, sizing::ICON_MEDIUM),
            );
            Image::new(self.icon)
                .fit_to_exact_size(icon_rect.size())
                .tint(self.icon_tint)
                .paint_at(ui, icon_rect);

            ui.painter().text(
                Pos2::new(icon_rect.right() + 8.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.label,
                egui::FontId::proportional(14.0),
                theme::TEXT,
            );
        }

        let response = match self.tooltip {
            Some(tooltip) => response.on_hover_text(tooltip),
            None => response,
        };
        response.on_hover_cursor(CursorIcon::PointingHand)
    }
}

/// Frame for dropdown panels: white card with border and a large soft shadow.
pub fn dropdown_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 15,
            offset: [0, 10],
            color: Color32::from_black_alpha(25),
        })
        .inner_margin(Margin::same(8))
}
