use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest label accepted from user input, in UTF-16 code units.
pub const MAX_ENTRY_CHARS: usize = 60;

/// One of the three disjoint areas of a two-circle Venn diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Left,
    Right,
    Both,
}

impl Section {
    /// Order in which sections are packed during a layout pass.
    pub const PACKING_ORDER: [Section; 3] = [Section::Both, Section::Left, Section::Right];

    /// Order in which sections are listed to a reader (left to right).
    pub const DISPLAY_ORDER: [Section; 3] = [Section::Left, Section::Both, Section::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Left => "left",
            Section::Right => "right",
            Section::Both => "both",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token.to_ascii_lowercase().as_str() {
            "left" => Ok(Section::Left),
            "right" => Ok(Section::Right),
            "both" => Ok(Section::Both),
            _ => Err(EntryError::UnknownSection(token.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("unknown section `{0}` (expected left, right or both)")]
    UnknownSection(String),
    #[error("entry text is empty")]
    EmptyText,
    #[error("entry text is {len} units long, the limit is {MAX_ENTRY_CHARS}")]
    TooLong { len: usize },
}

/// A labeled word assigned to one section. Layout passes never mutate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub text: String,
    pub section: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Entry {
    pub fn new(id: impl Into<String>, text: impl Into<String>, section: Section) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            section,
            created_at: None,
        }
    }
}

/// Unvalidated user input for a new entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub text: String,
    pub section: String,
}

impl NewEntry {
    pub fn into_entry(self, id: impl Into<String>) -> Result<Entry, EntryError> {
        let section: Section = self.section.parse()?;
        let text = self.text.trim();
        if text.is_empty() {
            return Err(EntryError::EmptyText);
        }
        let len = text.encode_utf16().count();
        if len > MAX_ENTRY_CHARS {
            return Err(EntryError::TooLong { len });
        }
        Ok(Entry::new(id, text, section))
    }
}
