/// `h = h * 31 + unit` over UTF-16 code units with 32-bit wrap-around,
/// returned as an absolute value. Matches the hash browser callers use, so
/// colors agree with existing renderings.
pub fn hash_string(s: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in s.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(unit as i32);
    }
    h.unsigned_abs()
}

/// Palette entry for a word; depends on the text only.
pub fn color_for_word<'a>(text: &str, palette: &'a [String]) -> &'a str {
    if palette.is_empty() {
        return "";
    }
    &palette[hash_string(text) as usize % palette.len()]
}

/// Preferred rotation in degrees for the word at `index` within its sorted section.
pub fn preferred_rotation(text: &str, index: usize, angles: &[f32]) -> f32 {
    if angles.is_empty() {
        return 0.0;
    }
    let key = format!("{text}{index}");
    angles[hash_string(&key) as usize % angles.len()]
}

/// Length used to order words, in UTF-16 code units.
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}
