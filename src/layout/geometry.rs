use serde::Serialize;

use crate::config::LayoutConfig;
use crate::ir::Section;

/// Two equal circles sharing a vertical centre line `cy`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleGeometry {
    pub cx1: f32,
    pub cy: f32,
    pub cx2: f32,
    pub r: f32,
}

pub fn compute_circles(width: f32, height: f32, config: &LayoutConfig) -> CircleGeometry {
    let r = width * config.radius_factor;
    let d = r * 2.0 * (1.0 - config.overlap_ratio);
    CircleGeometry {
        cx1: width / 2.0 - d / 2.0,
        cy: height / 2.0,
        cx2: width / 2.0 + d / 2.0,
        r,
    }
}

impl CircleGeometry {
    /// Inside the left circle shrunk by `margin` (a negative margin grows it).
    pub fn in_left(&self, x: f32, y: f32, margin: f32) -> bool {
        in_circle(x, y, self.cx1, self.cy, self.r - margin)
    }

    pub fn in_right(&self, x: f32, y: f32, margin: f32) -> bool {
        in_circle(x, y, self.cx2, self.cy, self.r - margin)
    }

    /// Distance between the two centres.
    pub fn separation(&self) -> f32 {
        self.cx2 - self.cx1
    }
}

fn in_circle(x: f32, y: f32, cx: f32, cy: f32, radius: f32) -> bool {
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= radius * radius
}

/// Region membership with an inward margin.
///
/// A side region shrinks its own circle by `margin` and grows the excluded
/// circle by the same amount, so words keep clear of the lens boundary.
pub fn in_region(x: f32, y: f32, section: Section, g: &CircleGeometry, margin: f32) -> bool {
    match section {
        Section::Left => g.in_left(x, y, margin) && !g.in_right(x, y, -margin),
        Section::Right => !g.in_left(x, y, -margin) && g.in_right(x, y, margin),
        Section::Both => g.in_left(x, y, margin) && g.in_right(x, y, margin),
    }
}

/// Spiral origin for a section. A stable interior anchor, not a true centroid:
/// the lens uses the midpoint of the centres, a crescent the midpoint between
/// its centre and its outer edge.
pub fn region_centroid(section: Section, g: &CircleGeometry) -> (f32, f32) {
    match section {
        Section::Both => ((g.cx1 + g.cx2) / 2.0, g.cy),
        Section::Left => ((g.cx1 + (g.cx1 - g.r)) / 2.0, g.cy),
        Section::Right => ((g.cx2 + (g.cx2 + g.r)) / 2.0, g.cy),
    }
}
