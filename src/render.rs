#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::config::LayoutConfig;
use crate::layout::{LayoutResult, compute_circles};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Draw the two circles and every placed word as a standalone SVG document.
pub fn render_svg(
    result: &LayoutResult,
    width: f32,
    height: f32,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let mut svg = String::new();
    let width = width.max(1.0);
    let height = height.max(1.0);
    let g = compute_circles(width, height, config);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    ));

    for (cx, fill, stroke) in [
        (g.cx1, &theme.left_fill, &theme.left_stroke),
        (g.cx2, &theme.right_fill, &theme.right_stroke),
    ] {
        svg.push_str(&format!(
            "<circle cx=\"{cx:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            g.cy,
            g.r,
            escape_xml(fill),
            escape_xml(stroke),
            theme.circle_stroke_width
        ));
    }

    let font_family = escape_xml(&theme.font_family);
    for word in &result.placed {
        let rotate = if word.rotation != 0.0 {
            format!(
                " transform=\"rotate({} {:.2} {:.2})\"",
                word.rotation, word.x, word.y
            )
        } else {
            String::new()
        };
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" data-id=\"{}\"{}>{}</text>",
            word.x,
            word.y,
            font_family,
            word.font_size,
            escape_xml(&word.color),
            escape_xml(&word.id),
            rotate,
            escape_xml(&word.text)
        ));
    }

    let label_y = (g.cy + g.r + theme.label_font_size * 1.4).min(height - theme.label_font_size * 0.5);
    for (label, x) in [
        (&theme.left_label, g.cx1 - g.r * 0.5),
        (&theme.right_label, g.cx2 + g.r * 0.5),
    ] {
        if let Some(label) = label {
            svg.push_str(&text_svg(x, label_y, label, theme));
        }
    }

    if let Some(summary) = result.hidden_summary() {
        let y = height - theme.label_font_size * 0.8;
        svg.push_str(&text_svg(width / 2.0, y, &summary, theme));
    }

    svg.push_str("</svg>");
    svg
}

fn text_svg(x: f32, y: f32, text: &str, theme: &Theme) -> String {
    format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" font-style=\"italic\">{}</text>",
        escape_xml(&theme.font_family),
        theme.label_font_size,
        escape_xml(&theme.label_color),
        escape_xml(text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = primary_family(&theme.font_family);
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid canvas size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(feature = "png")]
fn primary_family(font_family: &str) -> String {
    font_family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\''))
        .find(|part| !part.is_empty())
        .unwrap_or("serif")
        .to_string()
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Entry, Section};
    use crate::layout::layout_words;
    use crate::text_metrics::GlyphTableMeasurer;

    #[test]
    fn render_svg_basic() {
        let entries = [
            Entry::new("a", "ballet", Section::Both),
            Entry::new("b", "R&B", Section::Left),
        ];
        let result = layout_words(&entries, 600.0, 460.0, &mut GlyphTableMeasurer);
        let svg = render_svg(&result, 600.0, 460.0, &Theme::default(), &LayoutConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains(">ballet</text>"));
        assert!(svg.contains(">R&amp;B</text>"));
        assert!(!svg.contains("more\u{2026}"));
    }

    #[test]
    fn render_svg_shows_labels_and_overflow() {
        let mut theme = Theme::default();
        theme.left_label = Some("Mike".to_string());
        theme.right_label = Some("Amy".to_string());
        let result = LayoutResult {
            placed: Vec::new(),
            hidden: vec![Entry::new("x", "tea", Section::Left)],
        };
        let svg = render_svg(&result, 600.0, 460.0, &theme, &LayoutConfig::default());
        assert!(svg.contains(">Mike</text>"));
        assert!(svg.contains(">Amy</text>"));
        assert!(svg.contains("and 1 more\u{2026}"));
    }
}
