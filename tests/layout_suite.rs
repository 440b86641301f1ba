mod common;

use std::path::Path;

use common::check_layout;
use venn_layout::layout::{compute_circles, in_region};
use venn_layout::{
    Entry, GlyphTableMeasurer, LayoutConfig, Section, Theme, WordPacker, layout_words,
    parse_entries, render_svg,
};

fn load_fixture(name: &str) -> Vec<Entry> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_entries(&input).expect("fixture parse failed")
}

#[test]
fn lay_out_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let fixtures = ["trio.json", "shared_things.txt", "wrapped.json"];
    let config = LayoutConfig::default();
    for name in fixtures {
        let entries = load_fixture(name);
        assert!(!entries.is_empty(), "{name}: no entries");
        let result = layout_words(&entries, 600.0, 460.0, &mut GlyphTableMeasurer);
        check_layout(&entries, &result, 600.0, 460.0, &config)
            .unwrap_or_else(|err| panic!("{name}: {err}"));
        let svg = render_svg(&result, 600.0, 460.0, &Theme::default(), &config);
        assert!(svg.contains("<svg"), "{name}: missing <svg tag");
        assert!(svg.contains("</svg>"), "{name}: missing </svg tag");
    }
}

#[test]
fn trio_lands_in_lens_and_crescents() {
    let entries = load_fixture("trio.json");
    let result = layout_words(&entries, 600.0, 460.0, &mut GlyphTableMeasurer);
    assert_eq!(result.placed.len(), 3);
    assert!(result.hidden.is_empty());

    let g = compute_circles(600.0, 460.0, &LayoutConfig::default());
    let find = |id: &str| result.placed.iter().find(|w| w.id == id).unwrap();
    let a = find("a");
    assert!(g.in_left(a.x, a.y, 0.0) && g.in_right(a.x, a.y, 0.0));
    let b = find("b");
    assert!(in_region(b.x, b.y, Section::Left, &g, 0.0));
    let c = find("c");
    assert!(in_region(c.x, c.y, Section::Right, &g, 0.0));
}

#[test]
fn overfull_crescent_hides_the_rest() {
    let entries: Vec<Entry> = (0..200)
        .map(|i| Entry::new(format!("w{i}"), format!("word{i}"), Section::Left))
        .collect();
    let result = layout_words(&entries, 200.0, 150.0, &mut GlyphTableMeasurer);
    assert!(!result.hidden.is_empty());
    check_layout(&entries, &result, 200.0, 150.0, &LayoutConfig::default()).unwrap();
    assert!(result.hidden.iter().all(|e| e.section == Section::Left));
}

#[test]
fn single_very_long_word_is_hidden() {
    let text = "a".repeat(30) + &"m".repeat(32);
    let entries = [Entry::new("long", text, Section::Left)];
    let result = layout_words(&entries, 200.0, 150.0, &mut GlyphTableMeasurer);
    assert!(result.placed.is_empty());
    assert_eq!(result.hidden.len(), 1);
}

#[test]
fn layout_is_deterministic() {
    let entries = load_fixture("shared_things.txt");
    let first = layout_words(&entries, 600.0, 460.0, &mut GlyphTableMeasurer);
    let second = layout_words(&entries, 600.0, 460.0, &mut GlyphTableMeasurer);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn reused_packer_matches_fresh_calls() {
    let entries = load_fixture("shared_things.txt");
    let mut packer = WordPacker::new(venn_layout::CachedMeasurer::new(GlyphTableMeasurer));
    let warm_up = packer.layout(&entries, 600.0, 460.0);
    let again = packer.layout(&entries, 600.0, 460.0);
    let fresh = layout_words(&entries, 600.0, 460.0, &mut GlyphTableMeasurer);
    assert_eq!(warm_up, fresh);
    assert_eq!(again, fresh);
}

#[test]
fn color_ignores_section_and_position() {
    let entries = [
        Entry::new("x", "origami", Section::Left),
        Entry::new("y", "origami", Section::Right),
        Entry::new("z", "origami", Section::Both),
        Entry::new("filler", "marmalade", Section::Both),
    ];
    let result = layout_words(&entries, 600.0, 460.0, &mut GlyphTableMeasurer);
    let colors: Vec<&str> = result
        .placed
        .iter()
        .filter(|w| w.text == "origami")
        .map(|w| w.color.as_str())
        .collect();
    assert_eq!(colors.len(), 3);
    assert!(colors.iter().all(|c| *c == colors[0]));
}

#[test]
fn hidden_entries_are_returned_untouched() {
    let mut entries = load_fixture("wrapped.json");
    let long = Entry {
        created_at: Some("2025-02-14T10:00:00Z".to_string()),
        ..Entry::new("big", "x".repeat(120), Section::Right)
    };
    entries.push(long.clone());
    let result = layout_words(&entries, 600.0, 460.0, &mut GlyphTableMeasurer);
    assert_eq!(result.hidden, vec![long]);
}
