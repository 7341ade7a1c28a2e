//! Deck list loader (ARDB-style text export)

use crate::normalize::NameNormalizer;
use crate::section::Section;
use crate::{DeckError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Deck loader for ARDB text exports
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck from a text file
    pub fn load_from_file(path: &Path, normalizer: &NameNormalizer) -> Result<DeckList> {
        if !path.exists() {
            return Err(DeckError::InputNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content, normalizer)
    }

    /// Parse a deck from its text content
    ///
    /// Only lines after a `Crypt` or `Library` header that start with a digit
    /// are read, as `<count>[x] <name...>`.
    pub fn parse(content: &str, normalizer: &NameNormalizer) -> Result<DeckList> {
        let mut deck = DeckList::default();
        let mut current: Option<Section> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim().to_lowercase();

            if line.is_empty() {
                continue;
            }

            if let Some(section) = Section::from_header(&line) {
                if current != Some(section) {
                    debug!(line = line_no, %section, "entering section");
                    current = Some(section);
                    continue;
                }
            }

            let Some(section) = current else {
                trace!(line = line_no, "skipping preamble");
                continue;
            };

            if !line.starts_with(|c: char| c.is_ascii_digit()) {
                trace!(line = line_no, "skipping non-card line");
                continue;
            }

            // Format: "3x Card Name" or "3 Card Name"
            let (count_str, rest) = line
                .split_once(' ')
                .ok_or_else(|| DeckError::MalformedDeckLine {
                    line: line_no,
                    text: raw.to_string(),
                    reason: "expected a space after the card count".to_string(),
                })?;

            let count_str = count_str.strip_suffix('x').unwrap_or(count_str);
            let count = count_str.parse::<usize>().map_err(|e| DeckError::MalformedDeckLine {
                line: line_no,
                text: raw.to_string(),
                reason: format!("invalid card count '{count_str}': {e}"),
            })?;

            let name = normalizer.normalize_tokens(rest.split_whitespace());
            debug!(line = line_no, %section, count, name = %name, "deck entry");
            deck.push(section, name, count);
        }

        if deck.is_empty() {
            warn!("deck list has no crypt or library cards");
        }
        info!(
            crypt = deck.total_crypt(),
            library = deck.total_library(),
            unique = deck.unique_names().len(),
            "parsed deck list"
        );
        Ok(deck)
    }
}

/// Normalized card names of a deck, one entry per copy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckList {
    pub crypt: Vec<String>,
    pub library: Vec<String>,
}

impl DeckList {
    /// Names in a section, in file order
    pub fn names(&self, section: Section) -> &[String] {
        match section {
            Section::Crypt => &self.crypt,
            Section::Library => &self.library,
        }
    }

    /// Append `count` copies of `name` to a section
    pub fn push(&mut self, section: Section, name: String, count: usize) {
        let names = match section {
            Section::Crypt => &mut self.crypt,
            Section::Library => &mut self.library,
        };
        names.extend(std::iter::repeat(name).take(count));
    }

    /// Total cards in crypt
    pub fn total_crypt(&self) -> usize {
        self.crypt.len()
    }

    /// Total cards in library
    pub fn total_library(&self) -> usize {
        self.library.len()
    }

    /// No cards in either section
    pub fn is_empty(&self) -> bool {
        self.crypt.is_empty() && self.library.is_empty()
    }

    /// Distinct names across both sections, in first-seen order
    pub fn unique_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.crypt
            .iter()
            .chain(self.library.iter())
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect()
    }
}
