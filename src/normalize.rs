//! Card name normalization
//!
//! Deck lists and the TTS module spell card names differently: accents, commas,
//! leading articles and the capacity column that ARDB prints after crypt card
//! names. Both sides are reduced to the same lowercase ASCII key so they can be
//! compared with plain string equality.
//!
//! "Hunger, The" -> "hungerthe"
//! "The Hunger" -> "hungerthe"
//! "Anson 8 AUS DOM" -> "anson"
//! "419 Operation" -> "419operation"

use rustc_hash::FxHashMap;
use unicode_normalization::UnicodeNormalization;

/// Built-in name overrides, as `(produced key, canonical key)` pairs
///
/// NFKD does not decompose ligatures such as "œ", so the module's accented
/// spelling loses those letters while the ASCII spelling keeps them.
pub const DEFAULT_OVERRIDES: &[(&str, &str)] = &[
    ("sacrecoeurcathedralfrance", "sacrecurcathedralfrance"),
    ("pentextmsubversion", "pentexsubversion"),
];

/// Tokens shorter than this that are all digits end a name
const SUFFIX_TOKEN_MAX: usize = 3;

const LEADING_ARTICLE: &str = "the";

/// Reduce a single token to lowercase ASCII word characters
///
/// Accented letters lose their accent (NFKD, then anything outside ASCII is
/// dropped); punctuation disappears.
pub fn fold_token(token: &str) -> String {
    token
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_rating_suffix(token: &str) -> bool {
    !token.is_empty()
        && token.len() < SUFFIX_TOKEN_MAX
        && token.bytes().all(|b| b.is_ascii_digit())
}

/// Maps free-form card name text to catalog lookup keys
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    overrides: FxHashMap<String, String>,
}

impl NameNormalizer {
    /// Create a normalizer with the given override table
    pub fn new<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut normalizer = Self::without_overrides();
        for (from, to) in overrides {
            normalizer.add_override(from, to);
        }
        normalizer
    }

    /// Create a normalizer without any overrides
    pub fn without_overrides() -> Self {
        NameNormalizer {
            overrides: FxHashMap::default(),
        }
    }

    /// Add or replace an override
    ///
    /// Chains are collapsed as they are added so that no target is ever a
    /// key: `a -> b` then `b -> c` leaves `a -> c, b -> c`. An override whose
    /// target already leads back to its key would close a cycle; it clears
    /// that key's entry instead.
    pub fn add_override(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        let mut to = to.into();
        if let Some(next) = self.overrides.get(&to) {
            to = next.clone();
        }

        if to == from {
            self.overrides.remove(&from);
            return;
        }

        for target in self.overrides.values_mut() {
            if *target == from {
                *target = to.clone();
            }
        }
        self.overrides.insert(from, to);
    }

    /// Canonical key an override maps `name` to, if any
    pub fn override_for(&self, name: &str) -> Option<&str> {
        self.overrides.get(name).map(String::as_str)
    }

    /// Number of override entries
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Normalize the whitespace-separated tokens of a card name
    pub fn normalize_tokens<'a, I>(&self, tokens: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut parts: Vec<String> = Vec::new();

        for (idx, token) in tokens.into_iter().enumerate() {
            let folded = fold_token(token);
            // The first token is always part of the name ("419 Operation"),
            // even when nothing of it survives folding
            if idx > 0 && is_rating_suffix(&folded) {
                break;
            }
            parts.push(folded);
        }

        if parts.first().map(String::as_str) == Some(LEADING_ARTICLE) {
            parts.rotate_left(1);
        }

        let name = parts.concat();
        match self.overrides.get(&name) {
            Some(canonical) => canonical.clone(),
            None => name,
        }
    }

    /// Normalize a complete card name string
    pub fn normalize_name(&self, name: &str) -> String {
        self.normalize_tokens(name.split_whitespace())
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_OVERRIDES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_article_moves_to_end() {
        let n = NameNormalizer::without_overrides();
        assert_eq!(n.normalize_tokens(["the", "hunger"]), "hungerthe");
        assert_eq!(n.normalize_name("The Hunger"), "hungerthe");
        assert_eq!(n.normalize_name("Hunger, The"), "hungerthe");
    }

    #[test]
    fn test_article_only_rotates_at_start() {
        let n = NameNormalizer::without_overrides();
        assert_eq!(n.normalize_name("Hide the Heart"), "hidetheheart");
        assert_eq!(n.normalize_name("The"), "the");
    }

    #[test]
    fn test_rating_suffix_is_dropped() {
        let n = NameNormalizer::without_overrides();
        assert_eq!(n.normalize_tokens(["name", "4"]), "name");
        assert_eq!(n.normalize_name("Anson 8 AUS DOM PRE :ABCD Tremere:2"), "anson");
        assert_eq!(n.normalize_name("Theo Bell (ADV) 10 CEL POT"), "theobelladv");
    }

    #[test]
    fn test_long_numbers_stay_in_name() {
        let n = NameNormalizer::without_overrides();
        assert_eq!(n.normalize_name("Flak 888"), "flak888");
    }

    #[test]
    fn test_digit_led_names_keep_first_token() {
        let n = NameNormalizer::without_overrides();
        assert_eq!(n.normalize_name("419 Operation"), "419operation");
        assert_eq!(n.normalize_name(".44 Magnum"), "44magnum");
        assert_eq!(n.normalize_name("12 3"), "12");
    }

    #[test]
    fn test_accents_and_punctuation_are_stripped() {
        let n = NameNormalizer::without_overrides();
        assert_eq!(n.normalize_name("Étienne Fauberge"), "etiennefauberge");
        assert_eq!(n.normalize_name("Al-Muntathir, God's Witness"), "almuntathirgodswitness");
        assert_eq!(n.normalize_name("Sacré-Cœur Cathedral, France"), "sacrecurcathedralfrance");
    }

    #[test]
    fn test_punctuation_only_tokens_do_not_end_name() {
        let n = NameNormalizer::without_overrides();
        assert_eq!(n.normalize_name("Ravnos Cache - Lost"), "ravnoscachelost");
    }

    #[test]
    fn test_empty_first_token_blocks_article_rotation() {
        let n = NameNormalizer::without_overrides();
        assert_eq!(n.normalize_name("- The Hunger"), "thehunger");
        assert_eq!(n.normalize_name("thehunger"), "thehunger");
    }

    #[test]
    fn test_override_chains_collapse() {
        let mut n = NameNormalizer::without_overrides();
        n.add_override("aaa", "bbb");
        n.add_override("bbb", "ccc");
        assert_eq!(n.override_for("aaa"), Some("ccc"));
        assert_eq!(n.override_for("bbb"), Some("ccc"));

        let once = n.normalize_name("aaa");
        assert_eq!(once, "ccc");
        assert_eq!(n.normalize_name(&once), once);

        // Target first, then a rename onto the old key
        let mut n = NameNormalizer::new([("bbb", "ccc"), ("aaa", "bbb")]);
        assert_eq!(n.normalize_name("aaa"), "ccc");

        // An override that would close a cycle is dropped
        n.add_override("ccc", "aaa");
        assert_eq!(n.override_for("ccc"), None);
        for raw in ["aaa", "bbb", "ccc"] {
            assert_eq!(n.normalize_name(raw), "ccc");
        }
    }

    #[test]
    fn test_overrides_apply_after_normalization() {
        let n = NameNormalizer::default();
        assert_eq!(
            n.normalize_name("Sacre-Coeur Cathedral, France"),
            n.normalize_name("Sacré-Cœur Cathedral, France")
        );

        let mut n = NameNormalizer::without_overrides();
        n.add_override("oldname", "newname");
        assert_eq!(n.override_count(), 1);
        assert_eq!(n.normalize_name("Old Name"), "newname");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let n = NameNormalizer::default();
        for raw in [
            "The Hunger",
            "Name 4",
            "419 Operation",
            "Sacré-Cœur Cathedral, France",
            "Sacre-Coeur Cathedral, France",
            "Ravnos Cache - Lost",
            "Pentex(TM) Subversion",
        ] {
            let once = n.normalize_name(raw);
            assert_eq!(n.normalize_name(&once), once, "not idempotent for {raw:?}");
        }
    }
}
