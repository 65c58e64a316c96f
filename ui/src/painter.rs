//! egui-backed label painter.

use meshmark_core::math::Vec2;
use meshmark_overlay::render::{Color, LabelPainter, Rect};

/// Draws overlay labels onto an [`egui::Painter`].
///
/// Coordinates match egui's: y-down logical points over the full screen
/// rect the painter was created for.
pub struct EguiLabelPainter<'a> {
    painter: &'a egui::Painter,
}

impl<'a> EguiLabelPainter<'a> {
    pub fn new(painter: &'a egui::Painter) -> Self {
        Self { painter }
    }
}

impl LabelPainter for EguiLabelPainter<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.painter
            .rect_filled(to_egui_rect(rect), egui::CornerRadius::ZERO, to_color32(color));
    }

    fn text(&mut self, pos: Vec2, font_size: u32, color: Color, text: &str) {
        self.painter.text(
            egui::pos2(pos.x, pos.y),
            egui::Align2::LEFT_BOTTOM,
            text,
            egui::FontId::proportional(font_size as f32),
            to_color32(color),
        );
    }
}

fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_max(egui::pos2(rect.x0, rect.y0), egui::pos2(rect.x1, rect.y1))
}

fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        (color[3] * 255.0).round() as u8,
    )
}
