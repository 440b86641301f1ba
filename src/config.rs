use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Tuning knobs for the word packer. Defaults give the stock plum diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Fraction of the diameter the two circles overlap by.
    pub overlap_ratio: f32,
    /// Circle radius as a fraction of the container width.
    pub radius_factor: f32,
    /// Gap added around each word's text box, in px.
    pub padding: f32,
    pub max_font_size: f32,
    pub min_font_size: f32,
    pub font_step: f32,
    /// Global cap is `density_factor / sqrt(total entries)`.
    pub density_factor: f32,
    pub line_height: f32,
    pub region_scale_both: f32,
    pub region_scale_side: f32,
    /// Inset from the circle edges that word corners must respect, in px.
    pub inset_margin: f32,
    pub spiral_steps: usize,
    pub spiral_angle_step: f32,
    pub spiral_radius_step: f32,
    /// Preferred rotations in degrees, indexed by hash.
    pub rotation_angles: Vec<f32>,
    /// Cell size of the placed-word index, in px.
    pub grid_cell: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            overlap_ratio: 0.72,
            radius_factor: 0.36,
            padding: 2.0,
            max_font_size: 14.0,
            min_font_size: 7.0,
            font_step: 1.0,
            density_factor: 150.0,
            line_height: 1.0,
            region_scale_both: 0.7,
            region_scale_side: 0.55,
            inset_margin: 6.0,
            spiral_steps: 1200,
            spiral_angle_step: 0.25,
            spiral_radius_step: 0.7,
            rotation_angles: vec![0.0, 0.0, 0.0, -18.0, 18.0, -30.0, 30.0],
            grid_cell: 32.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("maxFontSize ({max}) is below minFontSize ({min})")]
    FontRange { min: f32, max: f32 },
    #[error("overlapRatio must be in [0, 1), got {0}")]
    OverlapRatio(f32),
    #[error("spiralSteps must be at least 1")]
    NoSpiralSteps,
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("minFontSize", self.min_font_size),
            ("fontStep", self.font_step),
            ("radiusFactor", self.radius_factor),
            ("lineHeight", self.line_height),
            ("gridCell", self.grid_cell),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.max_font_size >= self.min_font_size) {
            return Err(ConfigError::FontRange {
                min: self.min_font_size,
                max: self.max_font_size,
            });
        }
        if !(0.0..1.0).contains(&self.overlap_ratio) {
            return Err(ConfigError::OverlapRatio(self.overlap_ratio));
        }
        if self.spiral_steps == 0 {
            return Err(ConfigError::NoSpiralSteps);
        }
        if self.rotation_angles.is_empty() {
            return Err(ConfigError::Empty("rotationAngles"));
        }
        Ok(())
    }
}

/// Virtual canvas the layout runs in; viewers scale it to their viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 460.0,
            background: "#FDF8F3".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::default();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.word_colors.is_empty() {
            return Err(ConfigError::Empty("wordColors"));
        }
        self.layout.validate()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    word_colors: Option<Vec<String>>,
    left_fill: Option<String>,
    left_stroke: Option<String>,
    right_fill: Option<String>,
    right_stroke: Option<String>,
    label_color: Option<String>,
    left_label: Option<String>,
    right_label: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfig>,
    width: Option<f32>,
    height: Option<f32>,
}

/// Parse a JSON5 config document and overlay it on the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(name) = parsed.theme.as_deref() {
        config.theme =
            Theme::by_name(name).ok_or_else(|| anyhow::anyhow!("Unknown theme `{name}`"))?;
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.word_colors {
            config.theme.word_colors = v;
        }
        if let Some(v) = vars.left_fill {
            config.theme.left_fill = v;
        }
        if let Some(v) = vars.left_stroke {
            config.theme.left_stroke = v;
        }
        if let Some(v) = vars.right_fill {
            config.theme.right_fill = v;
        }
        if let Some(v) = vars.right_stroke {
            config.theme.right_stroke = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if vars.left_label.is_some() {
            config.theme.left_label = vars.left_label;
        }
        if vars.right_label.is_some() {
            config.theme.right_label = vars.right_label;
        }
        if let Some(v) = vars.background {
            config.theme.background = v.clone();
            config.render.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }
    if let Some(width) = parsed.width {
        config.render.width = width;
    }
    if let Some(height) = parsed.height {
        config.render.height = height;
    }

    config.validate()?;
    Ok(config)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}
