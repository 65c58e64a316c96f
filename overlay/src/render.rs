//! Overlay renderer: anchor resolution, projection, and label drawing.
//!
//! The renderer is host-agnostic: it reads the scene, projects anchors
//! through a [`ScreenProjector`], and emits rectangles and text through a
//! [`LabelPainter`]. Painter coordinates are y-down pixels.

use meshmark_core::math::{Mat4, Vec2, Vec3, Vec4, transform_point};
use meshmark_core::mesh::{ElementKind, MeshData};
use meshmark_core::scene::{ObjectMode, Scene};

use crate::edit_scope::EditScope;
use crate::layers::{id_layer_name, snapshot_layer_name};
use crate::settings::OverlaySettings;

/// RGBA color, components in 0..=1.
pub type Color = [f32; 4];

/// Screen-space rectangle in painter coordinates (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Label box centered on `pos`: width scales with the digit count,
/// height with the font size.
pub fn label_rect(pos: Vec2, ch_count: usize, font_size: u32) -> Rect {
    let width = ch_count as f32 * font_size as f32;
    let height = font_size as f32 * 1.5;
    Rect::new(
        pos.x - width * 0.5,
        pos.y - height * 0.5,
        pos.x + width * 0.5,
        pos.y + height * 0.5,
    )
}

/// Maps world-space points to painter coordinates.
pub trait ScreenProjector {
    /// `None` means off-screen: the label is silently skipped.
    fn project(&self, world: Vec3) -> Option<Vec2>;
}

/// Immediate-mode 2D drawing surface for labels.
pub trait LabelPainter {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw `text` with `pos` as the bottom-left corner of the glyph run.
    fn text(&mut self, pos: Vec2, font_size: u32, color: Color, text: &str);
}

/// [`ScreenProjector`] over a view-projection matrix and a viewport rect.
pub struct CameraProjector {
    view_proj: Mat4,
    viewport: Rect,
}

impl CameraProjector {
    pub fn new(view_proj: Mat4, viewport: Rect) -> Self {
        Self {
            view_proj,
            viewport,
        }
    }
}

impl ScreenProjector for CameraProjector {
    fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }
        Some(Vec2::new(
            self.viewport.x0 + (ndc_x + 1.0) * 0.5 * self.viewport.width(),
            self.viewport.y0 + (1.0 - ndc_y) * 0.5 * self.viewport.height(),
        ))
    }
}

struct Label {
    id: i32,
    anchor: Vec3,
}

/// Draw ID labels for the active object's tagged, selected elements.
///
/// Returns the number of labels drawn. In edit mode the live selection
/// flags are read directly; otherwise the snapshot layers are used, going
/// through a temporary [`EditScope`] that restores the prior active object,
/// mode, and selection before anything is drawn.
pub fn draw_overlay(
    scene: &mut Scene,
    settings: &OverlaySettings,
    projector: &dyn ScreenProjector,
    painter: &mut dyn LabelPainter,
) -> usize {
    if !settings.running {
        return 0;
    }
    let Some(active) = scene.active() else {
        return 0;
    };
    let Some(object) = scene.object(active) else {
        return 0;
    };
    if !object.is_mesh() {
        return 0;
    }
    let world = *object.world();
    let in_edit = object.mode() == ObjectMode::Edit;

    let mut labels = Vec::new();
    if in_edit {
        let Some(object) = scene.object_mut(active) else {
            return 0;
        };
        match object.edit_mesh() {
            Ok(mesh) => collect_labels(&mesh, settings, false, &mut labels),
            Err(err) => {
                log::warn!("overlay skipped: {err}");
                return 0;
            }
        }
    } else {
        match EditScope::enter(scene, active) {
            Ok(mut scope) => match scope.edit_mesh() {
                Ok(mesh) => collect_labels(&mesh, settings, true, &mut labels),
                Err(err) => log::warn!("overlay skipped: {err}"),
            },
            Err(err) => {
                log::warn!("overlay skipped: {err}");
                return 0;
            }
        }
        // Scope dropped: prior state is back before any drawing happens.
    }

    let mut drawn = 0;
    for label in labels {
        let world_pos = transform_point(&world, label.anchor);
        let Some(pos) = projector.project(world_pos) else {
            continue;
        };
        let text = label.id.to_string();
        let rect = label_rect(pos, text.len(), settings.font_size());
        painter.fill_rect(rect, settings.box_color);
        // Text sits 5px in from the box's bottom-left corner (y down).
        painter.text(
            Vec2::new(rect.x0 + 5.0, rect.y1 - 5.0),
            settings.font_size(),
            settings.text_color,
            &text,
        );
        drawn += 1;
    }
    drawn
}

fn collect_labels(
    mesh: &MeshData,
    settings: &OverlaySettings,
    use_snapshot: bool,
    out: &mut Vec<Label>,
) {
    for kind in ElementKind::ALL {
        if !settings.shows(kind) {
            continue;
        }
        let Some(id_layer) = mesh.int_layer(kind, id_layer_name(kind)) else {
            continue;
        };
        // Outside edit mode a kind without a snapshot has nothing to show.
        let snapshot_layer = if use_snapshot {
            match mesh.int_layer(kind, snapshot_layer_name(kind)) {
                Some(layer) => Some(layer),
                None => continue,
            }
        } else {
            None
        };

        for index in 0..mesh.element_count(kind) {
            let selected = match snapshot_layer {
                Some(layer) => match layer.value(index) {
                    Ok(flag) => flag == 1,
                    Err(err) => {
                        log::warn!("skipping {} {index}: {err}", kind.singular());
                        continue;
                    }
                },
                None => mesh.is_selected(kind, index),
            };
            if !selected {
                continue;
            }
            let id = match id_layer.value(index) {
                Ok(id) => id,
                Err(err) => {
                    log::warn!("skipping {} {index}: {err}", kind.singular());
                    continue;
                }
            };
            if id <= 0 {
                continue;
            }
            let Some(anchor) = mesh.anchor(kind, index) else {
                log::warn!("no anchor for {} {index}", kind.singular());
                continue;
            };
            out.push(Label { id, anchor });
        }
    }
}
