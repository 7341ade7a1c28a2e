//! Card catalog built from the VtES TTS module
//!
//! Every card object of the module's crypt and library decks is indexed by
//! its normalized `Nickname`. Deck lists exported by older tools truncate
//! long names, so after loading every long key also gets prefix aliases.

use crate::config::ConvertConfig;
use crate::loader::tts::{self, CONTAINED_OBJECTS, NICKNAME};
use crate::normalize::NameNormalizer;
use crate::{DeckError, Result};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHasher};
use serde_json::Value;
use std::fs;
use std::hash::BuildHasherDefault;
use std::path::Path;
use tracing::{debug, info};

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Card objects by normalized name, in module order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: FxIndexMap<String, Value>,
    aliases: usize,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the module file and expand prefix aliases
    pub fn load_from_file(
        path: &Path,
        config: &ConvertConfig,
        normalizer: &NameNormalizer,
    ) -> Result<Self> {
        if !path.exists() {
            return Err(DeckError::InputNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let doc: Value = serde_json::from_str(&content)?;
        Self::from_document(&doc, config, normalizer)
    }

    /// Build from a parsed module document
    pub fn from_document(
        doc: &Value,
        config: &ConvertConfig,
        normalizer: &NameNormalizer,
    ) -> Result<Self> {
        let (states, groups) =
            tts::locate_groups(doc, config).map_err(DeckError::MalformedCatalog)?;
        let mut catalog = Catalog::new();

        for (section, idx) in groups {
            let cards = states[idx]
                .get(CONTAINED_OBJECTS)
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    DeckError::MalformedCatalog(format!(
                        "{section} group has no '{CONTAINED_OBJECTS}' array"
                    ))
                })?;

            for (pos, card) in cards.iter().enumerate() {
                let nickname = card.get(NICKNAME).and_then(Value::as_str).ok_or_else(|| {
                    DeckError::MalformedCatalog(format!(
                        "{section} card #{pos} has no '{NICKNAME}'"
                    ))
                })?;
                catalog.insert(normalizer.normalize_name(nickname), card.clone());
            }
            debug!(%section, cards = cards.len(), "indexed module group");
        }

        let base = catalog.len();
        catalog.expand_prefix_aliases(&config.alias_lengths, config.alias_min_key_len);
        info!(cards = base, aliases = catalog.alias_count(), "loaded TTS module");

        Ok(catalog)
    }

    /// Insert a card, replacing any card with the same key
    pub fn insert(&mut self, key: impl Into<String>, card: Value) {
        self.cards.insert(key.into(), card);
    }

    /// Add truncated-name aliases for every key at least `min_key_len` long
    ///
    /// Aliases only fill gaps: an existing key is never replaced. When two
    /// names share a prefix the one that appears first in the module keeps
    /// it. Returns the number of aliases added.
    pub fn expand_prefix_aliases(&mut self, lengths: &[usize], min_key_len: usize) -> usize {
        let keys: Vec<String> = self
            .cards
            .keys()
            .filter(|key| key.len() >= min_key_len)
            .cloned()
            .collect();

        let mut origin: FxHashMap<String, usize> = FxHashMap::default();
        let mut added = 0;

        for (key_pos, key) in keys.iter().enumerate() {
            for &len in lengths {
                let Some(prefix) = key.get(..len) else {
                    continue;
                };

                if self.cards.contains_key(prefix) {
                    if let Some(&first) = origin.get(prefix) {
                        if first != key_pos {
                            debug!(
                                alias = prefix,
                                kept = %keys[first],
                                dropped = %key,
                                "ambiguous prefix alias"
                            );
                        }
                    }
                    continue;
                }

                let card = self.cards[key.as_str()].clone();
                self.cards.insert(prefix.to_string(), card);
                origin.insert(prefix.to_string(), key_pos);
                added += 1;
            }
        }

        self.aliases += added;
        added
    }

    /// Look up a card by normalized name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.cards.get(name)
    }

    /// Check if a normalized name resolves
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    /// Number of keys, aliases included
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of keys that are prefix aliases
    pub fn alias_count(&self) -> usize {
        self.aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(nickname: &str, id: u32) -> Value {
        json!({
            "Name": "Card",
            "Nickname": nickname,
            "CardID": id,
            "CustomDeck": { (id / 100).to_string(): { "FaceURL": format!("face{}", id / 100) } },
            "Transform": { "posX": 1.0 },
        })
    }

    fn module(crypt: Vec<Value>, library: Vec<Value>) -> Value {
        json!({
            "ObjectStates": [
                { "Name": "DeckCustom", "ContainedObjects": crypt },
                { "Name": "DeckCustom", "ContainedObjects": library },
            ]
        })
    }

    fn load(doc: &Value) -> Result<Catalog> {
        Catalog::from_document(doc, &ConvertConfig::default(), &NameNormalizer::default())
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert_eq!(catalog.len(), 0);
        assert!(catalog.is_empty());
        assert!(catalog.get("anson").is_none());
    }

    #[test]
    fn test_loads_both_groups() {
        let doc = module(
            vec![card("Anson", 100), card("Étienne Fauberge", 101)],
            vec![card("The Hunger", 200)],
        );
        let catalog = load(&doc).unwrap();

        assert!(catalog.contains("anson"));
        assert!(catalog.contains("etiennefauberge"));
        assert!(catalog.contains("hungerthe"));
        assert_eq!(catalog.get("anson").unwrap()["CardID"], 100);
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let doc = module(vec![card("Blood Doll", 100)], vec![card("Blood Doll", 200)]);
        let catalog = load(&doc).unwrap();
        assert_eq!(catalog.get("blooddoll").unwrap()["CardID"], 200);
    }

    #[test]
    fn test_prefix_aliases() {
        let mut catalog = Catalog::new();
        catalog.insert("abcdefghijklmnopqrstuvwxyz", json!({ "CardID": 1 }));
        catalog.insert("short", json!({ "CardID": 2 }));

        let added = catalog.expand_prefix_aliases(&[12, 13, 14, 15, 16, 17, 18], 13);
        assert_eq!(added, 7);
        assert_eq!(catalog.alias_count(), 7);
        assert_eq!(catalog.get("abcdefghijkl").unwrap()["CardID"], 1);
        assert_eq!(catalog.get("abcdefghijklmnopqr").unwrap()["CardID"], 1);
        assert!(catalog.get("abcdefghijk").is_none());
        assert!(catalog.get("abcdefghijklmnopqrs").is_none());
    }

    #[test]
    fn test_thirteen_char_key_only_gets_twelve_char_alias() {
        let mut catalog = Catalog::new();
        catalog.insert("abcdefghijklm", json!({ "CardID": 1 }));
        assert_eq!(catalog.expand_prefix_aliases(&[12, 13, 14, 15, 16, 17, 18], 13), 1);
        assert!(catalog.contains("abcdefghijkl"));
    }

    #[test]
    fn test_aliases_never_replace_existing_keys() {
        let mut catalog = Catalog::new();
        catalog.insert("abcdefghijklmnop", json!({ "CardID": 1 }));
        catalog.insert("abcdefghijklmn", json!({ "CardID": 2 }));

        catalog.expand_prefix_aliases(&[12, 13, 14, 15, 16, 17, 18], 13);

        assert_eq!(catalog.get("abcdefghijklmn").unwrap()["CardID"], 2);
        assert_eq!(catalog.get("abcdefghijklmno").unwrap()["CardID"], 1);
        // Shared prefixes stay with the name inserted first
        assert_eq!(catalog.get("abcdefghijkl").unwrap()["CardID"], 1);
        assert_eq!(catalog.get("abcdefghijklm").unwrap()["CardID"], 1);
    }

    #[test]
    fn test_named_groups_win_over_positions() {
        let doc = json!({
            "ObjectStates": [
                { "Nickname": "Library", "ContainedObjects": [card("Blood Doll", 200)] },
                { "Nickname": "Crypt", "ContainedObjects": [card("Anson", 100)] },
            ]
        });
        let catalog = load(&doc).unwrap();
        assert!(catalog.contains("anson"));
        assert!(catalog.contains("blooddoll"));
    }

    #[test]
    fn test_missing_library_group_is_fatal() {
        let doc = json!({ "ObjectStates": [{ "ContainedObjects": [] }] });
        let err = load(&doc).unwrap_err();
        assert!(matches!(err, DeckError::MalformedCatalog(ref msg) if msg.contains("library")));
    }

    #[test]
    fn test_group_without_cards_is_fatal() {
        let doc = json!({ "ObjectStates": [{ "ContainedObjects": [] }, { "Name": "Bag" }] });
        let err = load(&doc).unwrap_err();
        assert!(matches!(err, DeckError::MalformedCatalog(_)));
    }

    #[test]
    fn test_card_without_nickname_is_fatal() {
        let doc = module(vec![json!({ "CardID": 1 })], vec![]);
        let err = load(&doc).unwrap_err();
        assert!(matches!(err, DeckError::MalformedCatalog(ref msg) if msg.contains("Nickname")));
    }
}
