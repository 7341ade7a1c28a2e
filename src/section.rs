//! Deck sections

use std::fmt;

/// The two halves of a VtES deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Crypt,
    Library,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Crypt, Section::Library];

    /// Lowercase header keyword that opens this section in a deck list
    pub fn header(self) -> &'static str {
        match self {
            Section::Crypt => "crypt",
            Section::Library => "library",
        }
    }

    /// Section opened by a (trimmed, lowercased) header line, if any
    pub fn from_header(line: &str) -> Option<Section> {
        Section::ALL
            .into_iter()
            .find(|section| line.starts_with(section.header()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}
