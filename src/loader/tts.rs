//! Shared helpers for TTS save documents
//!
//! Both the module file and the deck template are TTS saves: a top-level
//! `ObjectStates` array whose entries are decks holding `ContainedObjects`.

use crate::config::{ConvertConfig, GroupSelector};
use crate::section::Section;
use serde::Deserialize;
use serde_json::{Map, Value};

pub const OBJECT_STATES: &str = "ObjectStates";
pub const CONTAINED_OBJECTS: &str = "ContainedObjects";
pub const NICKNAME: &str = "Nickname";
pub const TRANSFORM: &str = "Transform";
pub const CUSTOM_DECK: &str = "CustomDeck";
pub const DECK_IDS: &str = "DeckIDs";

/// The parts of a module card object that go into a deck's own fields
///
/// Everything else on the card is copied through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct CardFields {
    #[serde(rename = "CardID")]
    pub card_id: u64,
    #[serde(rename = "CustomDeck")]
    pub custom_deck: Map<String, Value>,
}

impl CardFields {
    pub fn from_object(object: &Value) -> serde_json::Result<Self> {
        Self::deserialize(object)
    }
}

/// Position of a section's group in `ObjectStates`
///
/// A group whose `Nickname` matches the selector wins; otherwise the
/// selector's fixed index is used if it exists.
pub fn group_index(states: &[Value], selector: &GroupSelector) -> Option<usize> {
    let by_name = states.iter().position(|state| {
        state
            .get(NICKNAME)
            .and_then(Value::as_str)
            .is_some_and(|nick| nick.trim().eq_ignore_ascii_case(&selector.nickname))
    });

    by_name.or_else(|| (selector.index < states.len()).then_some(selector.index))
}

/// Locate the `ObjectStates` of a document and the group of every section
///
/// The error is a description of what is missing; callers wrap it in the
/// error variant for the document they were reading.
pub fn locate_groups<'a>(
    doc: &'a Value,
    config: &ConvertConfig,
) -> std::result::Result<(&'a [Value], [(Section, usize); 2]), String> {
    let states = doc
        .get(OBJECT_STATES)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("missing '{OBJECT_STATES}' array"))?;

    let mut groups = [(Section::Crypt, 0); 2];
    for (slot, section) in groups.iter_mut().zip(Section::ALL) {
        let selector = config.group(section);
        let idx = group_index(states, selector).ok_or_else(|| {
            format!(
                "no {section} group (looked for nickname '{}' or {OBJECT_STATES}[{}])",
                selector.nickname, selector.index
            )
        })?;
        *slot = (section, idx);
    }

    if groups[0].1 == groups[1].1 {
        return Err(format!(
            "crypt and library both resolve to {OBJECT_STATES}[{}]",
            groups[0].1
        ));
    }

    Ok((states.as_slice(), groups))
}
