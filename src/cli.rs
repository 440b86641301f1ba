use crate::config::{Config, load_config};
use crate::layout::WordPacker;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_entries;
use crate::render::{render_svg, write_output_svg};
use crate::text_metrics::{CachedMeasurer, FontMeasurer, GlyphTableMeasurer, TextMeasurer};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vennpack", version, about = "Pack words into a two-circle Venn diagram")]
pub struct Args {
    /// Entry list (JSON or `section: text` lines), or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON5 file (theme, themeVariables, layout tuning)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Measure with the built-in serif width table instead of system fonts
    #[arg(long = "glyph-table")]
    pub glyph_table: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    apply_size_overrides(&mut config, args.width, args.height);

    let input = read_input(args.input.as_deref())?;
    let entries = parse_entries(&input)?;
    if entries.is_empty() {
        return Err(anyhow::anyhow!("No entries found in input"));
    }

    let measurer: Box<dyn TextMeasurer> = if args.glyph_table {
        Box::new(GlyphTableMeasurer)
    } else {
        Box::new(FontMeasurer::new(&config.theme.font_family))
    };
    let mut packer = WordPacker::with_config(
        config.theme.clone(),
        config.layout.clone(),
        CachedMeasurer::new(measurer),
    )?;

    let (width, height) = (config.render.width, config.render.height);
    let result = packer.layout(&entries, width, height);
    info!(
        placed = result.placed.len(),
        hidden = result.hidden.len(),
        width,
        height,
        "layout finished"
    );

    match args.output_format {
        OutputFormat::Json => {
            write_layout_dump(args.output.as_deref(), &result, width, height, &config.layout)?;
        }
        OutputFormat::Svg => {
            let svg = render_svg(&result, width, height, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&result, width, height, &config.theme, &config.layout);
            write_png(&svg, &output, &config)?;
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("venn_layout={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn apply_size_overrides(config: &mut Config, width: Option<f32>, height: Option<f32>) {
    if let Some(width) = width {
        config.render.width = width;
    }
    if let Some(height) = height {
        config.render.height = height;
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "vennpack",
            "-i",
            "entries.json",
            "-e",
            "json",
            "-w",
            "800",
            "--glyph-table",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.width, Some(800.0));
        assert_eq!(args.height, None);
        assert!(args.glyph_table);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn size_overrides_replace_config() {
        let mut config = Config::default();
        apply_size_overrides(&mut config, Some(300.0), None);
        assert_eq!(config.render.width, 300.0);
        assert_eq!(config.render.height, 460.0);
    }

    #[test]
    fn png_needs_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("out.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").unwrap(), path);
    }
}
