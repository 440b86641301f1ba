use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use venn_layout::config::LayoutConfig;
use venn_layout::ir::{Entry, Section};
use venn_layout::layout::layout_words;
use venn_layout::render::render_svg;
use venn_layout::text_metrics::{CachedMeasurer, GlyphTableMeasurer};
use venn_layout::theme::Theme;

const WORDS: [&str; 12] = [
    "ballet",
    "yarn",
    "coffee",
    "crosswords",
    "night markets",
    "sourdough",
    "bouldering",
    "watercolours",
    "tea",
    "vinyl",
    "chess openings",
    "long walks",
];

fn synthetic_entries(count: usize) -> Vec<Entry> {
    let sections = [Section::Both, Section::Left, Section::Right];
    (0..count)
        .map(|i| {
            Entry::new(
                format!("e{i}"),
                format!("{} {}", WORDS[i % WORDS.len()], i / WORDS.len()),
                sections[i % sections.len()],
            )
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for count in [3usize, 24, 60, 150] {
        let entries = synthetic_entries(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, data| {
            b.iter(|| {
                let result = layout_words(black_box(data), 600.0, 460.0, &mut GlyphTableMeasurer);
                black_box(result.placed.len());
            });
        });
    }
    group.finish();
}

fn bench_layout_cached_measurer(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_cached_measurer");
    for count in [24usize, 150] {
        let entries = synthetic_entries(count);
        let mut measurer = CachedMeasurer::new(GlyphTableMeasurer);
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, data| {
            b.iter(|| {
                let result = layout_words(black_box(data), 600.0, 460.0, &mut measurer);
                black_box(result.placed.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let theme = Theme::default();
    let config = LayoutConfig::default();
    for count in [24usize, 150] {
        let result = layout_words(&synthetic_entries(count), 600.0, 460.0, &mut GlyphTableMeasurer);
        group.bench_with_input(BenchmarkId::from_parameter(count), &result, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(data), 600.0, 460.0, &theme, &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_layout, bench_layout_cached_measurer, bench_render
);
criterion_main!(benches);
