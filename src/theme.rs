use serde::{Deserialize, Serialize};

use crate::text_metrics::DEFAULT_FONT_FAMILY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub font_family: String,
    /// Word colors, picked by a hash of the word text.
    pub word_colors: Vec<String>,
    pub left_fill: String,
    pub left_stroke: String,
    pub right_fill: String,
    pub right_stroke: String,
    pub circle_stroke_width: f32,
    pub label_color: String,
    pub label_font_size: f32,
    pub left_label: Option<String>,
    pub right_label: Option<String>,
    pub background: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::plum()
    }
}

impl Theme {
    pub fn plum() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            word_colors: [
                "#6b2d5b", // plum
                "#2d5b4b", // green
                "#c4723a", // terracotta
                "#8b3a62", // plum-light
                "#3a6b5b", // green-light
                "#c4a265", // gold
                "#722f37", // burgundy
                "#b8956a", // gold-muted
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            left_fill: "rgba(107, 45, 91, 0.06)".to_string(),
            left_stroke: "rgba(107, 45, 91, 0.25)".to_string(),
            right_fill: "rgba(45, 91, 75, 0.06)".to_string(),
            right_stroke: "rgba(45, 91, 75, 0.25)".to_string(),
            circle_stroke_width: 1.5,
            label_color: "#6b2d5b".to_string(),
            label_font_size: 13.0,
            left_label: None,
            right_label: None,
            background: "#FDF8F3".to_string(),
        }
    }

    pub fn ink() -> Self {
        Self {
            font_family: "Georgia, serif".to_string(),
            word_colors: ["#1C2430", "#3B4A61", "#5A6B85", "#7A8AA6"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            left_fill: "rgba(28, 36, 48, 0.04)".to_string(),
            left_stroke: "#C7D2E5".to_string(),
            right_fill: "rgba(28, 36, 48, 0.04)".to_string(),
            right_stroke: "#C7D2E5".to_string(),
            circle_stroke_width: 1.0,
            label_color: "#1C2430".to_string(),
            label_font_size: 12.0,
            left_label: None,
            right_label: None,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "plum" | "default" => Some(Self::plum()),
            "ink" => Some(Self::ink()),
            _ => None,
        }
    }
}
