#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, ConfigError, LayoutConfig, RenderConfig, load_config, parse_config};
pub use ir::{Entry, EntryError, NewEntry, Section};
pub use layout::{LayoutResult, PlacedWord, WordPacker, layout_words};
pub use parser::{ParseError, parse_entries};
pub use render::render_svg;
pub use text_metrics::{CachedMeasurer, FontMeasurer, GlyphTableMeasurer, TextMeasurer};
pub use theme::Theme;
