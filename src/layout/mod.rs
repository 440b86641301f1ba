pub mod collision;
pub mod geometry;
pub mod sizing;
pub mod variety;

pub use collision::{PlacedRects, Rect, aabb_overlap, rects_overlap};
pub use geometry::{CircleGeometry, compute_circles, in_region, region_centroid};

use serde::Serialize;
use tracing::{debug, debug_span, trace};

use crate::config::{ConfigError, LayoutConfig};
use crate::ir::{Entry, Section};
use crate::text_metrics::TextMeasurer;
use crate::theme::Theme;

use sizing::{font_ladder, global_font_cap, region_font_cap};
use variety::{color_for_word, preferred_rotation, text_len};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWord {
    pub id: String,
    pub text: String,
    pub section: Section,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    /// Degrees, clockwise in screen coordinates.
    pub rotation: f32,
    pub color: String,
}

/// Output of one layout pass. Every input entry lands in exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub placed: Vec<PlacedWord>,
    pub hidden: Vec<Entry>,
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty() && self.hidden.is_empty()
    }

    pub fn placed_ids(&self) -> impl Iterator<Item = &str> {
        self.placed.iter().map(|word| word.id.as_str())
    }

    pub fn hidden_in(&self, section: Section) -> impl Iterator<Item = &Entry> {
        self.hidden.iter().filter(move |entry| entry.section == section)
    }

    /// Caption for the overflow list, e.g. "and 3 more…".
    pub fn hidden_summary(&self) -> Option<String> {
        match self.hidden.len() {
            0 => None,
            n => Some(format!("and {n} more\u{2026}")),
        }
    }
}

/// Lay out entries with the default theme and tuning.
///
/// Sections are packed lens first, then left, then right. Within a section the
/// longest words go first; each word walks font sizes downward and, per size,
/// an outward spiral from the section anchor until its rotated box fits the
/// region without touching anything already placed.
pub fn layout_words<M: TextMeasurer + ?Sized>(
    entries: &[Entry],
    width: f32,
    height: f32,
    measurer: &mut M,
) -> LayoutResult {
    pack(
        entries,
        width,
        height,
        &Theme::default(),
        &LayoutConfig::default(),
        measurer,
    )
}

/// Owns a measurer and a validated configuration; one per thread or request.
#[derive(Debug)]
pub struct WordPacker<M> {
    theme: Theme,
    config: LayoutConfig,
    measurer: M,
}

impl<M: TextMeasurer> WordPacker<M> {
    pub fn new(measurer: M) -> Self {
        Self {
            theme: Theme::default(),
            config: LayoutConfig::default(),
            measurer,
        }
    }

    pub fn with_config(theme: Theme, config: LayoutConfig, measurer: M) -> Result<Self, ConfigError> {
        if theme.word_colors.is_empty() {
            return Err(ConfigError::Empty("wordColors"));
        }
        config.validate()?;
        Ok(Self {
            theme,
            config,
            measurer,
        })
    }

    pub fn layout(&mut self, entries: &[Entry], width: f32, height: f32) -> LayoutResult {
        pack(
            entries,
            width,
            height,
            &self.theme,
            &self.config,
            &mut self.measurer,
        )
    }

    pub fn geometry(&self, width: f32, height: f32) -> CircleGeometry {
        compute_circles(width, height, &self.config)
    }

    /// Oriented box a placed word occupies.
    pub fn word_rect(&mut self, word: &PlacedWord) -> Rect {
        word_rect(word, &self.config, &mut self.measurer)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn measurer_mut(&mut self) -> &mut M {
        &mut self.measurer
    }

    pub fn into_measurer(self) -> M {
        self.measurer
    }
}

/// Rebuild the oriented box of a placed word, as the packer tested it.
pub fn word_rect<M: TextMeasurer + ?Sized>(
    word: &PlacedWord,
    config: &LayoutConfig,
    measurer: &mut M,
) -> Rect {
    let (hw, hh) = half_extents(&word.text, word.font_size, config, measurer);
    Rect {
        cx: word.x,
        cy: word.y,
        hw,
        hh,
        angle: word.rotation.to_radians(),
    }
}

fn half_extents<M: TextMeasurer + ?Sized>(
    text: &str,
    font_size: f32,
    config: &LayoutConfig,
    measurer: &mut M,
) -> (f32, f32) {
    let text_width = measurer.measure(text, font_size);
    (
        (text_width + config.padding) / 2.0,
        (font_size * config.line_height + config.padding) / 2.0,
    )
}

pub(crate) fn pack<M: TextMeasurer + ?Sized>(
    entries: &[Entry],
    width: f32,
    height: f32,
    theme: &Theme,
    config: &LayoutConfig,
    measurer: &mut M,
) -> LayoutResult {
    if entries.is_empty() || !(width > 0.0) || !(height > 0.0) {
        return LayoutResult::default();
    }
    let _span = debug_span!("layout_words", entries = entries.len(), width, height).entered();

    let g = compute_circles(width, height, config);
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(entries.len());
    let mut hidden: Vec<Entry> = Vec::new();
    let mut rects = PlacedRects::new(config.grid_cell);
    let global_cap = global_font_cap(entries.len(), config);

    for section in Section::PACKING_ORDER {
        let mut section_entries: Vec<&Entry> =
            entries.iter().filter(|e| e.section == section).collect();
        if section_entries.is_empty() {
            continue;
        }
        section_entries.sort_by(|a, b| text_len(&b.text).cmp(&text_len(&a.text)));

        let origin = region_centroid(section, &g);
        let cap = global_cap.min(region_font_cap(section, section_entries.len(), g.r, config));
        debug!(%section, count = section_entries.len(), cap, "packing section");

        let target = Target {
            section,
            geometry: &g,
            origin,
            cap,
        };
        for (index, entry) in section_entries.into_iter().enumerate() {
            match place_entry(entry, index, &target, &rects, theme, config, measurer) {
                Some((word, rect)) => {
                    trace!(
                        id = %word.id,
                        x = word.x,
                        y = word.y,
                        font_size = word.font_size,
                        rotation = word.rotation,
                        "placed word"
                    );
                    rects.insert(rect);
                    placed.push(word);
                }
                None => {
                    debug!(id = %entry.id, %section, "no room for entry");
                    hidden.push(entry.clone());
                }
            }
        }
    }

    debug!(placed = placed.len(), hidden = hidden.len(), "layout complete");
    LayoutResult { placed, hidden }
}

struct Target<'a> {
    section: Section,
    geometry: &'a CircleGeometry,
    origin: (f32, f32),
    cap: f32,
}

fn place_entry<M: TextMeasurer + ?Sized>(
    entry: &Entry,
    index: usize,
    target: &Target<'_>,
    rects: &PlacedRects,
    theme: &Theme,
    config: &LayoutConfig,
    measurer: &mut M,
) -> Option<(PlacedWord, Rect)> {
    let preferred = preferred_rotation(&entry.text, index, &config.rotation_angles);
    // Level text has the tightest box, so it is the fallback.
    let candidates = [preferred, 0.0];
    let rotations = if preferred != 0.0 {
        &candidates[..]
    } else {
        &candidates[1..]
    };

    for &rotation in rotations {
        let angle = rotation.to_radians();
        for font_size in font_ladder(target.cap, config) {
            let (hw, hh) = half_extents(&entry.text, font_size, config, measurer);
            if let Some(rect) = spiral_search(hw, hh, angle, target, rects, config) {
                let word = PlacedWord {
                    id: entry.id.clone(),
                    text: entry.text.clone(),
                    section: entry.section,
                    x: rect.cx,
                    y: rect.cy,
                    font_size,
                    rotation,
                    color: color_for_word(&entry.text, &theme.word_colors).to_string(),
                };
                return Some((word, rect));
            }
        }
    }
    None
}

/// Point `step` of the search spiral around `origin`.
pub fn spiral_point(origin: (f32, f32), step: usize, config: &LayoutConfig) -> (f32, f32) {
    let theta = step as f32 * config.spiral_angle_step;
    let radius = step as f32 * config.spiral_radius_step;
    let (sin, cos) = theta.sin_cos();
    (origin.0 + radius * cos, origin.1 + radius * sin)
}

fn spiral_search(
    hw: f32,
    hh: f32,
    angle: f32,
    target: &Target<'_>,
    rects: &PlacedRects,
    config: &LayoutConfig,
) -> Option<Rect> {
    (0..config.spiral_steps).find_map(|step| {
        let (cx, cy) = spiral_point(target.origin, step, config);
        let candidate = Rect {
            cx,
            cy,
            hw,
            hh,
            angle,
        };
        let inside = candidate.corners().iter().all(|&(px, py)| {
            in_region(px, py, target.section, target.geometry, config.inset_margin)
        });
        (inside && !rects.collides(&candidate)).then_some(candidate)
    })
}
