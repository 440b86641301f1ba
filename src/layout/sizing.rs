use crate::config::LayoutConfig;
use crate::ir::Section;

fn clamp_font(size: f32, config: &LayoutConfig) -> f32 {
    config.max_font_size.min(config.min_font_size.max(size))
}

/// Cap shared by every region; shrinks as the whole diagram fills up.
pub fn global_font_cap(total_entries: usize, config: &LayoutConfig) -> f32 {
    clamp_font(
        config.density_factor / (total_entries as f32).sqrt(),
        config,
    )
}

pub fn region_scale(section: Section, config: &LayoutConfig) -> f32 {
    match section {
        Section::Both => config.region_scale_both,
        Section::Left | Section::Right => config.region_scale_side,
    }
}

/// Cap for one region. Crescents pack worse than the lens, hence the lower scale.
pub fn region_font_cap(
    section: Section,
    section_entries: usize,
    radius: f32,
    config: &LayoutConfig,
) -> f32 {
    clamp_font(
        radius * region_scale(section, config) / (section_entries as f32).sqrt(),
        config,
    )
}

/// Trial font sizes from `cap` down to the configured minimum.
pub fn font_ladder(cap: f32, config: &LayoutConfig) -> FontLadder {
    FontLadder {
        next: cap,
        min: config.min_font_size,
        step: config.font_step,
    }
}

#[derive(Debug, Clone)]
pub struct FontLadder {
    next: f32,
    min: f32,
    step: f32,
}

impl Iterator for FontLadder {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if !(self.step > 0.0) || !(self.next >= self.min) {
            return None;
        }
        let size = self.next;
        self.next -= self.step;
        Some(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_cap_is_clamped() {
        let config = LayoutConfig::default();
        assert_eq!(global_font_cap(1, &config), config.max_font_size);
        assert_eq!(global_font_cap(100_000, &config), config.min_font_size);
        let mid = global_font_cap(225, &config);
        assert!((mid - 10.0).abs() < 1e-4);
    }

    #[test]
    fn region_cap_favours_the_lens() {
        let config = LayoutConfig::default();
        let both = region_font_cap(Section::Both, 400, 216.0, &config);
        let left = region_font_cap(Section::Left, 400, 216.0, &config);
        assert!(both > left);
    }

    #[test]
    fn caps_never_grow_with_more_entries() {
        let config = LayoutConfig::default();
        let mut prev = f32::INFINITY;
        for n in 1..500 {
            let cap = region_font_cap(Section::Left, n, 72.0, &config);
            assert!(cap <= prev, "cap grew at n={n}");
            prev = cap;
        }
    }

    #[test]
    fn ladder_walks_down_to_minimum() {
        let config = LayoutConfig::default();
        let sizes: Vec<f32> = font_ladder(9.5, &config).collect();
        assert_eq!(sizes, vec![9.5, 8.5, 7.5]);
        let whole: Vec<f32> = font_ladder(14.0, &config).collect();
        assert_eq!(whole.len(), 8);
        assert_eq!(whole.last(), Some(&7.0));
    }

    #[test]
    fn ladder_is_empty_below_minimum() {
        let config = LayoutConfig::default();
        assert_eq!(font_ladder(6.0, &config).count(), 0);
    }
}
