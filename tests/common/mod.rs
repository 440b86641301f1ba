use std::collections::HashSet;

use venn_layout::layout::{compute_circles, in_region, rects_overlap, word_rect};
use venn_layout::{Entry, GlyphTableMeasurer, LayoutConfig, LayoutResult};

/// Partition, containment and non-overlap for one layout pass.
pub fn check_layout(
    entries: &[Entry],
    result: &LayoutResult,
    width: f32,
    height: f32,
    config: &LayoutConfig,
) -> Result<(), String> {
    let mut seen = HashSet::new();
    let mut ids: Vec<&str> = result
        .placed
        .iter()
        .map(|w| w.id.as_str())
        .chain(result.hidden.iter().map(|e| e.id.as_str()))
        .collect();
    for id in &ids {
        if !seen.insert(*id) {
            return Err(format!("entry {id} reported twice"));
        }
    }
    let mut expected: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    ids.sort_unstable();
    expected.sort_unstable();
    if ids != expected {
        return Err(format!("ids {ids:?} do not cover input {expected:?}"));
    }

    let g = compute_circles(width, height, config);
    let mut measurer = GlyphTableMeasurer;
    let rects: Vec<_> = result
        .placed
        .iter()
        .map(|word| word_rect(word, config, &mut measurer))
        .collect();
    for (word, rect) in result.placed.iter().zip(&rects) {
        for (x, y) in rect.corners() {
            if !in_region(x, y, word.section, &g, config.inset_margin) {
                return Err(format!("{} has a corner outside {}", word.id, word.section));
            }
        }
    }
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects_overlap(&rects[i], &rects[j]) {
                return Err(format!(
                    "{} overlaps {}",
                    result.placed[i].id, result.placed[j].id
                ));
            }
        }
    }
    Ok(())
}
