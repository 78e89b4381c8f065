//! Button components: pill-shaped buttons with icon and label.

use egui::{
    Align2, Color32, CornerRadius, CursorIcon, Image, ImageSource, Pos2, Rect, Response, Sense, Ui,
    vec2,
};

use crate::{sizing, theme};

/// Style configuration for pill buttons.
#[derive(Clone)]
pub struct PillButtonStyle {
    /// Button height
    pub height: f32,
    /// Horizontal padding on each side
    pub padding_x: f32,
    /// Space between icon and label
    pub gap: f32,
    /// Icon size
    pub icon_size: f32,
    /// Label font size
    pub font_size: f32,
    /// Corner radius
    pub corner_radius: u8,
    /// Background color
    pub fill: Color32,
    /// Background color when hovered
    pub hover_fill: Color32,
    /// Label and icon color
    pub text_color: Color32,
}

impl Default for PillButtonStyle {
    fn default() -> Self {
        Self::brand()
    }
}

impl PillButtonStyle {
    /// Solid brand-colored button with white text (`px-4 py-2 rounded`).
    pub fn brand() -> Self {
        Self {
            height: sizing::BUTTON_HEIGHT,
            padding_x: 16.0,
            gap: 8.0,
            icon_size: sizing::ICON_SMALL,
            font_size: 14.0,
            corner_radius: sizing::CORNER_RADIUS,
            fill: theme::BRAND,
            hover_fill: theme::BRAND_HOVER,
            text_color: Color32::WHITE,
        }
    }
}

/// A filled button with an optional leading icon.
pub struct PillButton<'a> {
    label: &'a str,
    icon: Option<ImageSource<'a>>,
    tooltip: Option<&'a str>,
    style: PillButtonStyle,
}

impl<'a> PillButton<'a> {
    /// Create a new button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            icon: None,
            tooltip: None,
            style: PillButtonStyle::default(),
        }
    }

    /// Show an icon before the label.
    pub fn icon(mut self, icon: ImageSource<'a>) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Hover text.
    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Show the button. The response carries the click and the button rect.
    pub fn show(self, ui: &mut Ui) -> Response {
        let style = &self.style;
        let font_id = egui::FontId::proportional(style.font_size);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            font_id.clone(),
            Color32::PLACEHOLDER, // Color doesn't matter for sizing
        );
        let icon_width = if self.icon.is_some() {
            style.icon_size + style.gap
        } else {
            0.0
        };
        let width = style.padding_x * 2.0 + icon_width + galley.size().x;

        let (rect, response) = ui.allocate_exact_size(vec2(width, style.height), Sense::click());

        if ui.is_rect_visible(rect) {
            let fill = if response.hovered() {
                style.hover_fill
            } else {
                style.fill
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(style.corner_radius), fill);

            let mut x = rect.left() + style.padding_x;
            if let Some(icon) = self.icon {
                let icon_rect = Rect::from_min_size(
                    Pos2::new(x, rect.center().y - style.icon_size / 2.0),
                    vec2(style.icon_size, style.icon_size),
                );
                Image::new(icon)
                    .fit_to_exact_size(icon_rect.size())
                    .tint(style.text_color)
                    .paint_at(ui, icon_rect);
                x += icon_width;
            }

            ui.painter().text(
                Pos2::new(x, rect.center().y),
                Align2::LEFT_CENTER,
                self.label,
                font_id,
                style.text_color,
            );
        }

        let response = match self.tooltip {
            Some(tooltip) => response.on_hover_text(tooltip),
            None => response,
        };
        response.on_hover_cursor(CursorIcon::PointingHand)
    }
}
