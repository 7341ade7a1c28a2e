//! Deck list and TTS module loaders
//!
//! Parsers for ARDB text exports and the VtES TTS module (.json)

pub mod catalog;
pub mod deck;
pub mod discovery;
pub mod tts;

pub use catalog::Catalog;
pub use deck::{DeckList, DeckLoader};
pub use discovery::find_catalog;
