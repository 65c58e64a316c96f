//! egui glue for the Meshmark overlay.
//!
//! - [`EguiLabelPainter`] — [`LabelPainter`](meshmark_overlay::LabelPainter)
//!   backed by an [`egui::Painter`]
//! - [`overlay_panel`] — the overlay's control panel

mod painter;
mod panel;

pub use painter::EguiLabelPainter;
pub use panel::overlay_panel;
