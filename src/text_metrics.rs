use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use std::collections::HashMap;
use tracing::debug;
use ttf_parser::Face;

/// Serif stack the word packer measures with unless told otherwise.
pub const DEFAULT_FONT_FAMILY: &str = "Lora, serif";

/// Width of a single line of text in pixels at a given font size.
///
/// The packer only ever needs this one capability. Implementations may cache
/// freely, which is why `measure` takes `&mut self`.
pub trait TextMeasurer {
    fn measure(&mut self, text: &str, font_size: f32) -> f32;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        (**self).measure(text, font_size)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        (**self).measure(text, font_size)
    }
}

/// Precomputed advance widths for a book-weight serif face, as a fraction of
/// the font size. Platform independent and fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphTableMeasurer;

impl GlyphTableMeasurer {
    pub fn char_width(&self, ch: char, font_size: f32) -> f32 {
        char_width_factor(ch) * font_size
    }
}

impl TextMeasurer for GlyphTableMeasurer {
    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() || font_size <= 0.0 {
            return 0.0;
        }
        text.chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| self.char_width(ch, font_size))
            .sum()
    }
}

const AVERAGE_CHAR_FACTOR: f32 = 0.52;

pub(crate) fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.25,
        '\t' => 1.0,
        '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.26,
        '(' | ')' | '[' | ']' | '{' | '}' => 0.33,
        '-' => 0.34,
        '"' => 0.40,
        '?' => 0.44,
        '&' => 0.70,
        '@' => 0.88,
        '0'..='9' => 0.55,
        'a' => 0.52,
        'b' | 'd' | 'p' | 'q' => 0.57,
        'c' => 0.46,
        'e' => 0.50,
        'f' => 0.33,
        'g' => 0.51,
        'h' | 'n' | 'u' => 0.58,
        'i' | 'l' => 0.28,
        'j' => 0.27,
        'k' => 0.53,
        'm' => 0.86,
        'o' => 0.55,
        'r' => 0.40,
        's' => 0.43,
        't' => 0.34,
        'v' | 'x' | 'y' => 0.50,
        'w' => 0.74,
        'z' => 0.45,
        'I' => 0.33,
        'J' => 0.40,
        'M' => 0.86,
        'W' => 0.95,
        'E' | 'F' | 'L' | 'P' | 'S' => 0.58,
        'A'..='Z' => 0.68,
        _ if is_wide(ch) => 1.0,
        _ => AVERAGE_CHAR_FACTOR,
    }
}

fn is_wide(ch: char) -> bool {
    matches!(
        ch,
        '\u{1100}'..='\u{115F}'
            | '\u{2E80}'..='\u{A4CF}'
            | '\u{AC00}'..='\u{D7A3}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FF00}'..='\u{FF60}'
            | '\u{1F300}'..='\u{1FAFF}'
    )
}

/// Measures with a real font face resolved through `fontdb`.
///
/// System fonts are loaded the first time a face is needed. When the family
/// list resolves to nothing, widths come from [`GlyphTableMeasurer`].
pub struct FontMeasurer {
    family: String,
    db: Database,
    loaded_system_fonts: bool,
    face: Option<Option<FontFace>>,
    fallback: GlyphTableMeasurer,
}

impl std::fmt::Debug for FontMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMeasurer")
            .field("family", &self.family)
            .field("resolved", &self.face.as_ref().map(Option::is_some))
            .finish()
    }
}

impl FontMeasurer {
    pub fn new(font_family: &str) -> Self {
        Self {
            family: normalize_family(font_family),
            db: Database::new(),
            loaded_system_fonts: false,
            face: None,
            fallback: GlyphTableMeasurer,
        }
    }

    /// Use a caller-populated database instead of the system fonts.
    pub fn with_database(font_family: &str, db: Database) -> Self {
        Self {
            loaded_system_fonts: true,
            db,
            ..Self::new(font_family)
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Whether the family list resolved to an actual face.
    pub fn has_face(&mut self) -> bool {
        self.resolve().is_some()
    }

    fn resolve(&mut self) -> Option<&mut FontFace> {
        if self.face.is_none() {
            let face = self.load_face();
            match &face {
                Some(_) => debug!(family = %self.family, "resolved font face"),
                None => debug!(family = %self.family, "no font face found, using glyph table"),
            }
            self.face = Some(face);
        }
        self.face.as_mut().and_then(Option::as_mut)
    }

    fn load_face(&mut self) -> Option<FontFace> {
        #[derive(Clone, Copy)]
        enum FamilyToken {
            Generic(Family<'static>),
            Name(usize),
        }

        let mut names: Vec<String> = Vec::new();
        let mut order: Vec<FamilyToken> = Vec::new();
        for part in self.family.split(',') {
            let raw = part.trim().trim_matches('"').trim_matches('\'');
            if raw.is_empty() {
                continue;
            }
            match raw.to_ascii_lowercase().as_str() {
                "serif" => order.push(FamilyToken::Generic(Family::Serif)),
                "sans-serif" | "system-ui" => order.push(FamilyToken::Generic(Family::SansSerif)),
                "monospace" => order.push(FamilyToken::Generic(Family::Monospace)),
                "cursive" => order.push(FamilyToken::Generic(Family::Cursive)),
                "fantasy" => order.push(FamilyToken::Generic(Family::Fantasy)),
                _ => {
                    order.push(FamilyToken::Name(names.len()));
                    names.push(raw.to_string());
                }
            }
        }
        if order.is_empty() {
            order.push(FamilyToken::Generic(Family::Serif));
        }

        let families: Vec<Family<'_>> = order
            .iter()
            .map(|token| match *token {
                FamilyToken::Generic(family) => family,
                FamilyToken::Name(idx) => Family::Name(names[idx].as_str()),
            })
            .collect();

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FontFace::parse(data.to_vec(), index))
            .flatten()
    }
}

impl TextMeasurer for FontMeasurer {
    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() || font_size <= 0.0 {
            return 0.0;
        }
        let mut fallback = self.fallback;
        match self.resolve() {
            Some(face) => face.measure_width(text, font_size, &fallback),
            None => fallback.measure(text, font_size),
        }
    }
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascii_advances: [u16; 128],
    glyph_advances: HashMap<char, Option<u16>>,
}

impl FontFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph_id) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph_id).unwrap_or(0);
            }
        }
        Some(Self {
            data,
            index,
            units_per_em,
            ascii_advances,
            glyph_advances: HashMap::new(),
        })
    }

    fn measure_width(&mut self, text: &str, font_size: f32, fallback: &GlyphTableMeasurer) -> f32 {
        let scale = font_size / self.units_per_em as f32;

        if text.is_ascii() {
            let mut width = 0.0f32;
            for byte in text.bytes() {
                if byte == b'\n' {
                    continue;
                }
                match self.ascii_advances[byte as usize] {
                    0 => width += fallback.char_width(byte as char, font_size),
                    advance => width += advance as f32 * scale,
                }
            }
            return width.max(0.0);
        }

        let Self {
            data,
            index,
            glyph_advances,
            ..
        } = self;
        let mut parsed: Option<Face<'_>> = None;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = match glyph_advances.get(&ch) {
                Some(cached) => *cached,
                None => {
                    if parsed.is_none() {
                        parsed = Face::parse(data, *index).ok();
                    }
                    let advance = parsed.as_ref().and_then(|face| {
                        face.glyph_index(ch)
                            .and_then(|glyph| face.glyph_hor_advance(glyph))
                    });
                    glyph_advances.insert(ch, advance);
                    advance
                }
            };
            match advance {
                Some(advance) if advance > 0 => width += advance as f32 * scale,
                _ => width += fallback.char_width(ch, font_size),
            }
        }
        width.max(0.0)
    }
}

fn normalize_family(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        DEFAULT_FONT_FAMILY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Entries kept by [`CachedMeasurer::new`] before the cache starts over.
pub const DEFAULT_CACHE_LIMIT: usize = 8192;

/// Memoizes widths per `(text, font size)` across layout passes.
///
/// The map holds at most `limit` widths; inserting past that drops every
/// cached width first, so a long-lived packer stays bounded.
#[derive(Debug)]
pub struct CachedMeasurer<M> {
    inner: M,
    limit: usize,
    cache: HashMap<(String, u32), f32>,
}

impl<M: TextMeasurer> CachedMeasurer<M> {
    pub fn new(inner: M) -> Self {
        Self::with_limit(inner, DEFAULT_CACHE_LIMIT)
    }

    pub fn with_limit(inner: M, limit: usize) -> Self {
        Self {
            inner,
            limit: limit.max(1),
            cache: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedMeasurer<M> {
    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        let key = (text.to_string(), font_size.to_bits());
        if let Some(width) = self.cache.get(&key) {
            return *width;
        }
        let width = self.inner.measure(text, font_size);
        if self.cache.len() >= self.limit {
            self.clear();
        }
        self.cache.insert(key, width);
        width
    }
}
