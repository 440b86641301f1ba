use serde::Deserialize;
use venn_layout::{
    GlyphTableMeasurer, LayoutConfig, LayoutResult, Theme, WordPacker, parse_entries, render_svg,
};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VennLayoutOptions {
    width: Option<f32>,
    height: Option<f32>,
    theme: Option<String>,
    font_family: Option<String>,
    left_label: Option<String>,
    right_label: Option<String>,
    layout: Option<LayoutConfig>,
}

struct Prepared {
    packer: WordPacker<GlyphTableMeasurer>,
    width: f32,
    height: f32,
}

fn prepare(options_json: Option<String>) -> Result<Prepared, String> {
    let options = match options_json {
        Some(raw) => {
            serde_json::from_str::<VennLayoutOptions>(&raw).map_err(|error| error.to_string())?
        }
        None => VennLayoutOptions::default(),
    };

    let mut theme = match options.theme.as_deref() {
        Some(name) => Theme::by_name(name).ok_or_else(|| format!("unknown theme `{name}`"))?,
        None => Theme::default(),
    };
    if let Some(font_family) = options.font_family {
        theme.font_family = font_family;
    }
    theme.left_label = options.left_label;
    theme.right_label = options.right_label;

    let config = options.layout.unwrap_or_default();
    let packer = WordPacker::with_config(theme, config, GlyphTableMeasurer)
        .map_err(|error| error.to_string())?;
    Ok(Prepared {
        packer,
        width: options.width.unwrap_or(600.0),
        height: options.height.unwrap_or(460.0),
    })
}

fn run_layout(entries: &str, options_json: Option<String>) -> Result<(Prepared, LayoutResult), String> {
    let entries = parse_entries(entries).map_err(|error| error.to_string())?;
    let mut prepared = prepare(options_json)?;
    let result = prepared
        .packer
        .layout(&entries, prepared.width, prepared.height);
    Ok((prepared, result))
}

/// Lay out entries and return `{ placed, hidden }` as JSON.
#[wasm_bindgen]
pub fn layout_venn_words(entries: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let (_, result) = run_layout(entries, options_json).map_err(|error| JsValue::from_str(&error))?;
    serde_json::to_string(&result).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn render_venn_svg(entries: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let (prepared, result) =
        run_layout(entries, options_json).map_err(|error| JsValue::from_str(&error))?;
    Ok(render_svg(
        &result,
        prepared.width,
        prepared.height,
        prepared.packer.theme(),
        prepared.packer.config(),
    ))
}

#[cfg(test)]
mod tests {
    use crate::run_layout;

    #[test]
    fn lays_out_line_entries_with_options() {
        let entries = "both: ballet\nleft: yarn\nright: coffee";
        let options = r#"{"width": 600, "height": 460, "leftLabel": "Mike"}"#.to_string();
        let (prepared, result) = run_layout(entries, Some(options)).expect("layout should succeed");

        assert_eq!(result.placed.len(), 3);
        assert!(result.hidden.is_empty());
        assert_eq!(prepared.packer.theme().left_label.as_deref(), Some("Mike"));
    }

    #[test]
    fn reports_invalid_layout_options() {
        let options = r#"{"layout": {"fontStep": 0}}"#.to_string();
        let err = run_layout("both: tea", Some(options)).err().expect("should fail");
        assert!(err.contains("fontStep"));
    }
}
