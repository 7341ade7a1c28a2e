//! Build the TTS deck document
//!
//! The template is a TTS save holding an empty crypt deck and an empty
//! library deck. Each deck's first contained object only supplies the
//! `Transform` that every generated card is placed with.

use crate::config::ConvertConfig;
use crate::loader::tts::{self, CardFields, CONTAINED_OBJECTS, CUSTOM_DECK, DECK_IDS, TRANSFORM};
use crate::loader::{Catalog, DeckList};
use crate::section::Section;
use crate::{DeckError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Joins a deck list against the catalog
pub struct DeckAssembler<'a> {
    catalog: &'a Catalog,
    config: &'a ConvertConfig,
}

/// Cards placed into one section of the output
#[derive(Debug, Default)]
struct SectionCards {
    objects: Vec<Value>,
    deck_ids: Vec<Value>,
    custom_deck: Map<String, Value>,
}

impl<'a> DeckAssembler<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a ConvertConfig) -> Self {
        DeckAssembler { catalog, config }
    }

    /// Read the deck template
    pub fn load_template(path: &Path) -> Result<Value> {
        if !path.exists() {
            return Err(DeckError::InputNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Fill a copy of the template with the deck's cards
    ///
    /// Every name must resolve; the first one that does not aborts the
    /// whole deck.
    pub fn assemble(&self, deck: &DeckList, template: &Value) -> Result<Value> {
        let (states, groups) =
            tts::locate_groups(template, self.config).map_err(DeckError::MalformedTemplate)?;

        let mut filled = Vec::with_capacity(groups.len());
        for (section, idx) in groups {
            let transform = states[idx]
                .get(CONTAINED_OBJECTS)
                .and_then(|objects| objects.get(0))
                .and_then(|first| first.get(TRANSFORM))
                .ok_or_else(|| {
                    DeckError::MalformedTemplate(format!(
                        "{section} deck needs a first '{CONTAINED_OBJECTS}' entry \
                         with a '{TRANSFORM}'"
                    ))
                })?;

            let cards = self.place_cards(section, deck.names(section), transform)?;
            info!(%section, cards = cards.objects.len(), "placed cards");
            filled.push((idx, cards));
        }

        let mut document = template.clone();
        let states = document
            .get_mut(tts::OBJECT_STATES)
            .and_then(Value::as_array_mut)
            .ok_or_else(|| {
                DeckError::MalformedTemplate(format!("missing '{}' array", tts::OBJECT_STATES))
            })?;

        for (idx, cards) in filled {
            let group = states[idx].as_object_mut().ok_or_else(|| {
                let what = format!("{}[{idx}] is not an object", tts::OBJECT_STATES);
                DeckError::MalformedTemplate(what)
            })?;
            group.insert(CONTAINED_OBJECTS.to_string(), Value::Array(cards.objects));
            group.insert(DECK_IDS.to_string(), Value::Array(cards.deck_ids));
            group.insert(CUSTOM_DECK.to_string(), Value::Object(cards.custom_deck));
        }

        Ok(document)
    }

    fn place_cards(
        &self,
        section: Section,
        names: &[String],
        transform: &Value,
    ) -> Result<SectionCards> {
        let mut cards = SectionCards::default();

        for name in names {
            let record = self.catalog.get(name).ok_or_else(|| DeckError::UnresolvedName {
                section: section.to_string(),
                name: name.clone(),
            })?;

            let fields = CardFields::from_object(record)
                .map_err(|e| DeckError::MalformedCatalog(format!("card '{name}': {e}")))?;

            let mut card = record.clone();
            if let Some(object) = card.as_object_mut() {
                object.insert(TRANSFORM.to_string(), transform.clone());
            }

            cards.deck_ids.push(Value::from(fields.card_id));
            cards.custom_deck.extend(fields.custom_deck);
            cards.objects.push(card);
        }

        debug!(%section, custom_decks = cards.custom_deck.len(), "merged custom decks");
        Ok(cards)
    }
}

/// Write the deck document, replacing any existing file
///
/// The JSON goes to a sibling temporary file first and is renamed into
/// place, so a failed write never leaves a truncated deck behind.
pub fn write_deck(document: &Value, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    info!(path = %path.display(), "wrote deck");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
