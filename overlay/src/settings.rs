//! Per-scene overlay configuration.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use meshmark_core::mesh::ElementKind;

use crate::render::Color;

/// Smallest accepted label font size.
pub const FONT_SIZE_MIN: u32 = 10;
/// Largest accepted label font size.
pub const FONT_SIZE_MAX: u32 = 50;

const DEFAULT_FONT_SIZE: u32 = 14;
const DEFAULT_BOX_COLOR: Color = [0.0, 0.0, 0.0, 0.7];
const DEFAULT_TEXT_COLOR: Color = [1.0, 1.0, 1.0, 1.0];

/// Scene-level overlay configuration.
///
/// `running` gates the whole overlay; the `show_*` toggles hide individual
/// element kinds. The font size is clamped to 10–50 on every write,
/// including deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    pub running: bool,
    pub show_verts: bool,
    pub show_edges: bool,
    pub show_faces: bool,
    pub box_color: Color,
    pub text_color: Color,
    #[serde(deserialize_with = "deserialize_font_size")]
    font_size: u32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            running: false,
            show_verts: true,
            show_edges: true,
            show_faces: true,
            box_color: DEFAULT_BOX_COLOR,
            text_color: DEFAULT_TEXT_COLOR,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl OverlaySettings {
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Set the label font size, clamped to [`FONT_SIZE_MIN`]..=[`FONT_SIZE_MAX`].
    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
    }

    /// Whether labels for one element kind are shown.
    pub fn shows(&self, kind: ElementKind) -> bool {
        match kind {
            ElementKind::Vertex => self.show_verts,
            ElementKind::Edge => self.show_edges,
            ElementKind::Face => self.show_faces,
        }
    }

    /// Parse settings from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("failed to parse overlay settings: {e}"))
    }

    /// Serialize settings to a TOML string.
    pub fn to_toml_str(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("failed to serialize overlay settings: {e}"))
    }
}

fn deserialize_font_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    u32::deserialize(deserializer).map(|v| v.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX))
}

/// Load settings from a TOML file.
///
/// Returns `Err` with a human-readable message if the file cannot be read
/// or parsed.
pub fn load_settings(path: &Path) -> Result<OverlaySettings, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    OverlaySettings::from_toml_str(&content)
}

/// Save settings to a TOML file.
pub fn save_settings(path: &Path, settings: &OverlaySettings) -> Result<(), String> {
    let text = settings.to_toml_str()?;
    std::fs::write(path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))
}
