/// Tier presets: the label/color pairs new boards are seeded with.
use serde::{Deserialize, Serialize};

use crate::color::HexColor;

/// One tier template. Boards built from presets use the label as the
/// initial tier id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPreset {
    pub label: String,
    pub color: HexColor,
}

impl TierPreset {
    pub fn new(label: impl Into<String>, color: HexColor) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// The classic S through F ladder.
pub fn default_presets() -> Vec<TierPreset> {
    vec![
        TierPreset::new("S", HexColor::rgb(255, 127, 127)),
        TierPreset::new("A", HexColor::rgb(255, 191, 127)),
        TierPreset::new("B", HexColor::rgb(255, 223, 127)),
        TierPreset::new("C", HexColor::rgb(255, 255, 127)),
        TierPreset::new("D", HexColor::rgb(191, 255, 127)),
        TierPreset::new("F", HexColor::rgb(127, 255, 127)),
    ]
}
