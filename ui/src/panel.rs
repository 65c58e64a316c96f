//! Overlay control panel.

use meshmark_core::mesh::ElementKind;
use meshmark_core::scene::Scene;
use meshmark_overlay::settings::{FONT_SIZE_MAX, FONT_SIZE_MIN};
use meshmark_overlay::{DrawHandlers, OpReport, OverlaySession, OverlaySettings, ops};

/// Draw the overlay panel, running any operation the user clicked.
///
/// Returns the operation's report so the caller can surface the message
/// (status bar, toast) however it likes.
pub fn overlay_panel(
    ui: &mut egui::Ui,
    scene: &mut Scene,
    settings: &mut OverlaySettings,
    session: &mut OverlaySession,
    handlers: &DrawHandlers,
) -> Option<OpReport> {
    let mut report = None;

    if !settings.running {
        if ui.button("Start").clicked() {
            report = Some(ops::toggle_overlay_op(scene, settings, session, handlers));
        }
        return report;
    }

    if ui.button("Stop").clicked() {
        report = Some(ops::toggle_overlay_op(scene, settings, session, handlers));
    }
    ui.checkbox(&mut settings.show_verts, "Vertices");
    ui.checkbox(&mut settings.show_edges, "Edges");
    ui.checkbox(&mut settings.show_faces, "Faces");

    ui.separator();
    ui.label("Assign persistent IDs:");
    ui.horizontal(|ui| {
        if ui.button("Verts").clicked() {
            report = Some(ops::assign_ids_op(scene, ElementKind::Vertex));
        }
        if ui.button("Edges").clicked() {
            report = Some(ops::assign_ids_op(scene, ElementKind::Edge));
        }
        if ui.button("Faces").clicked() {
            report = Some(ops::assign_ids_op(scene, ElementKind::Face));
        }
    });

    ui.label("Clear IDs:");
    ui.horizontal(|ui| {
        if ui.button("Verts").clicked() {
            report = Some(ops::clear_ids_op(scene, ElementKind::Vertex));
        }
        if ui.button("Edges").clicked() {
            report = Some(ops::clear_ids_op(scene, ElementKind::Edge));
        }
        if ui.button("Faces").clicked() {
            report = Some(ops::clear_ids_op(scene, ElementKind::Face));
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.color_edit_button_rgba_unmultiplied(&mut settings.box_color);
        ui.label("Box color");
    });
    ui.horizontal(|ui| {
        ui.color_edit_button_rgba_unmultiplied(&mut settings.text_color);
        ui.label("Text color");
    });
    ui.horizontal(|ui| {
        let mut size = settings.font_size();
        ui.add(egui::DragValue::new(&mut size).range(FONT_SIZE_MIN..=FONT_SIZE_MAX));
        ui.label("Font size");
        settings.set_font_size(size);
    });

    if let Some(report) = &report {
        log::info!("{}", report.message);
    }
    report
}
