use std::collections::HashMap;
use std::f32::consts::SQRT_2;

/// Oriented bounding box of one word at a trial font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub cx: f32,
    pub cy: f32,
    /// Half-width.
    pub hw: f32,
    /// Half-height.
    pub hh: f32,
    /// Rotation in radians.
    pub angle: f32,
}

impl Rect {
    pub fn corners(&self) -> [(f32, f32); 4] {
        let (sin, cos) = self.angle.sin_cos();
        let dxs = [-self.hw, self.hw, self.hw, -self.hw];
        let dys = [-self.hh, -self.hh, self.hh, self.hh];
        let mut out = [(0.0, 0.0); 4];
        for i in 0..4 {
            out[i] = (
                self.cx + dxs[i] * cos - dys[i] * sin,
                self.cy + dxs[i] * sin + dys[i] * cos,
            );
        }
        out
    }

    /// Radius of the circle that contains the rectangle at any rotation.
    pub fn reach(&self) -> f32 {
        self.hw.max(self.hh) * SQRT_2
    }
}

/// Conservative pre-check: `false` means the rectangles cannot overlap.
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    let reach = a.reach() + b.reach();
    (a.cx - b.cx).abs() < reach && (a.cy - b.cy).abs() < reach
}

/// Exact overlap test for two rotated rectangles. Touching edges do not count.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let corners_a = a.corners();
    let corners_b = b.corners();

    let mut axes: Vec<(f32, f32)> = Vec::with_capacity(4);
    for corners in [&corners_a, &corners_b] {
        for i in 0..2 {
            let dx = corners[i + 1].0 - corners[i].0;
            let dy = corners[i + 1].1 - corners[i].1;
            let len = (dx * dx + dy * dy).sqrt();
            if len > 0.0 {
                axes.push((-dy / len, dx / len));
            }
        }
    }

    for (ax, ay) in axes {
        let (min_a, max_a) = project(&corners_a, ax, ay);
        let (min_b, max_b) = project(&corners_b, ax, ay);
        if max_a <= min_b || max_b <= min_a {
            return false;
        }
    }
    true
}

fn project(corners: &[(f32, f32); 4], ax: f32, ay: f32) -> (f32, f32) {
    corners
        .iter()
        .map(|(px, py)| px * ax + py * ay)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p), hi.max(p))
        })
}

/// Rectangles committed during one layout pass, bucketed by the cells their
/// reach square touches. Lookups return the same answer as a linear scan.
#[derive(Debug, Clone)]
pub struct PlacedRects {
    cell: f32,
    rects: Vec<Rect>,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl PlacedRects {
    pub fn new(cell: f32) -> Self {
        Self {
            cell: cell.max(1.0),
            rects: Vec::new(),
            cells: HashMap::new(),
        }
    }

    pub fn insert(&mut self, rect: Rect) {
        let idx = self.rects.len();
        let (x0, y0, x1, y1) = self.cell_span(&rect);
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                self.cells.entry((ix, iy)).or_default().push(idx);
            }
        }
        self.rects.push(rect);
    }

    /// Whether `candidate` overlaps any committed rectangle.
    pub fn collides(&self, candidate: &Rect) -> bool {
        let (x0, y0, x1, y1) = self.cell_span(candidate);
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                let Some(bucket) = self.cells.get(&(ix, iy)) else {
                    continue;
                };
                for &idx in bucket {
                    let placed = &self.rects[idx];
                    if aabb_overlap(candidate, placed) && rects_overlap(candidate, placed) {
                        return true;
                    }
                }
            }
        }
        false
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    fn cell_span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let reach = rect.reach();
        (
            ((rect.cx - reach) / self.cell).floor() as i32,
            ((rect.cy - reach) / self.cell).floor() as i32,
            ((rect.cx + reach) / self.cell).floor() as i32,
            ((rect.cy + reach) / self.cell).floor() as i32,
        )
    }
}
