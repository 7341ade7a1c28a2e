//! Conversion settings
//!
//! Everything the converter would otherwise hard-code lives here so that each
//! component receives it explicitly.

use crate::normalize::{NameNormalizer, DEFAULT_OVERRIDES};
use crate::section::Section;
use crate::{DeckError, Result};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// File name of the VtES module in the TTS workshop folder
pub const DEFAULT_CATALOG_FILE: &str = "1955001917.json";

/// Deck skeleton shipped next to the executable
pub const DEFAULT_TEMPLATE_FILE: &str = "template.json";

pub const DEFAULT_OUTPUT_FILE: &str = "Deck.json";

/// ARDB truncated long names to 18 characters; older exports cut earlier
pub const DEFAULT_ALIAS_LENGTHS: RangeInclusive<usize> = 12..=18;

/// Where to find a section's object group inside `ObjectStates`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSelector {
    /// Group `Nickname` to look for (case-insensitive)
    pub nickname: String,
    /// Position used when no group carries the nickname
    pub index: usize,
}

impl GroupSelector {
    pub fn new(nickname: impl Into<String>, index: usize) -> Self {
        GroupSelector {
            nickname: nickname.into(),
            index,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub catalog_file_name: String,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    /// Truncation lengths for prefix aliases
    pub alias_lengths: Vec<usize>,
    /// Shortest key that gets prefix aliases
    pub alias_min_key_len: usize,
    pub crypt_group: GroupSelector,
    pub library_group: GroupSelector,
    /// Name override table, `(produced key, canonical key)`
    pub renames: Vec<(String, String)>,
}

impl ConvertConfig {
    /// `template.json` beside the running executable
    pub fn default_template_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_TEMPLATE_FILE)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_FILE))
    }

    pub fn group(&self, section: Section) -> &GroupSelector {
        match section {
            Section::Crypt => &self.crypt_group,
            Section::Library => &self.library_group,
        }
    }

    /// Add an override from an `OLD=NEW` argument
    ///
    /// Both sides are folded to key form, so either raw card names or
    /// already-normalized keys work. Chained renames resolve to the final
    /// target; a rename that leads back to its own key is rejected.
    pub fn add_rename(&mut self, arg: &str) -> Result<()> {
        let (from, to) = arg
            .split_once('=')
            .ok_or_else(|| DeckError::InvalidRename(arg.to_string()))?;

        let plain = NameNormalizer::without_overrides();
        let from = plain.normalize_name(from);
        let to = plain.normalize_name(to);
        if from.is_empty() || to.is_empty() {
            return Err(DeckError::InvalidRename(arg.to_string()));
        }

        let current = self.normalizer();
        if current.override_for(&to).unwrap_or(to.as_str()) == from {
            return Err(DeckError::InvalidRename(arg.to_string()));
        }

        self.renames.push((from, to));
        Ok(())
    }

    /// Normalizer carrying this configuration's override table
    pub fn normalizer(&self) -> NameNormalizer {
        NameNormalizer::new(self.renames.iter().cloned())
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            catalog_file_name: DEFAULT_CATALOG_FILE.to_string(),
            template_path: Self::default_template_path(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            alias_lengths: DEFAULT_ALIAS_LENGTHS.collect(),
            alias_min_key_len: 13,
            crypt_group: GroupSelector::new("Crypt", 0),
            library_group: GroupSelector::new("Library", 1),
            renames: DEFAULT_OVERRIDES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}
