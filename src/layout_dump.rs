use crate::config::LayoutConfig;
use crate::ir::{Entry, Section};
use crate::layout::{CircleGeometry, LayoutResult, PlacedWord, compute_circles};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Machine-readable record of one layout pass, for viewers and diffing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump<'a> {
    pub width: f32,
    pub height: f32,
    pub circles: CircleGeometry,
    pub placed: &'a [PlacedWord],
    pub hidden: &'a [Entry],
    pub sections: Vec<SectionDump>,
}

#[derive(Debug, Serialize)]
pub struct SectionDump {
    pub section: Section,
    pub placed: usize,
    pub hidden: usize,
}

impl<'a> LayoutDump<'a> {
    pub fn from_result(result: &'a LayoutResult, width: f32, height: f32, config: &LayoutConfig) -> Self {
        let sections = Section::DISPLAY_ORDER
            .iter()
            .map(|&section| SectionDump {
                section,
                placed: result.placed.iter().filter(|w| w.section == section).count(),
                hidden: result.hidden_in(section).count(),
            })
            .collect();
        LayoutDump {
            width,
            height,
            circles: compute_circles(width, height, config),
            placed: &result.placed,
            hidden: &result.hidden,
            sections,
        }
    }
}

pub fn write_layout_dump(
    output: Option<&Path>,
    result: &LayoutResult,
    width: f32,
    height: f32,
    config: &LayoutConfig,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_result(result, width, height, config);
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(std::io::BufWriter::new(file), &dump)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &dump)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_words;
    use crate::text_metrics::GlyphTableMeasurer;

    #[test]
    fn dump_uses_camel_case_fields() {
        let entries = [Entry::new("a", "ballet", Section::Both)];
        let result = layout_words(&entries, 600.0, 460.0, &mut GlyphTableMeasurer);
        let dump = LayoutDump::from_result(&result, 600.0, 460.0, &LayoutConfig::default());
        let value = serde_json::to_value(&dump).unwrap();
        assert_eq!(value["placed"][0]["fontSize"], 14.0);
        assert_eq!(value["placed"][0]["section"], "both");
        assert_eq!(value["sections"][1]["placed"], 1);
        assert!(value["circles"]["r"].as_f64().unwrap() > 0.0);
    }
}
