use crate::ir::{Entry, EntryError, NewEntry};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

static ENTRY_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<section>[A-Za-z]+)\s*[:|]\s*(?P<text>.*?)\s*$").unwrap()
});

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid entry JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: expected `section: text`")]
    Syntax { line: usize },
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: EntryError,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryDocument {
    List(Vec<Entry>),
    Wrapped { entries: Vec<Entry> },
}

/// Decode an entry list.
///
/// JSON input is either an array of entries or an object with an `entries`
/// array. Anything else is read line by line as `section: text` (or
/// `section | text`); blank lines and `#` comments are skipped and ids are
/// assigned as `entry-<n>`.
pub fn parse_entries(input: &str) -> Result<Vec<Entry>, ParseError> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        let doc: EntryDocument = serde_json::from_str(trimmed)?;
        return Ok(match doc {
            EntryDocument::List(entries) => entries,
            EntryDocument::Wrapped { entries } => entries,
        });
    }
    parse_entry_lines(input)
}

fn parse_entry_lines(input: &str) -> Result<Vec<Entry>, ParseError> {
    let mut entries = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let content = raw.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        let caps = ENTRY_LINE_RE
            .captures(content)
            .ok_or(ParseError::Syntax { line })?;
        let new_entry = NewEntry {
            text: caps["text"].to_string(),
            section: caps["section"].to_string(),
        };
        let entry = new_entry
            .into_entry(format!("entry-{}", entries.len() + 1))
            .map_err(|source| ParseError::Line { line, source })?;
        entries.push(entry);
    }
    Ok(entries)
}
