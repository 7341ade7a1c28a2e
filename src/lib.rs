//! TTS deck builder
//!
//! Converts ARDB-style VtES deck lists into Tabletop Simulator deck objects,
//! using the card objects of the VtES TTS module as the source of truth.

pub mod assemble;
pub mod config;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod section;

pub use assemble::{write_deck, DeckAssembler};
pub use config::ConvertConfig;
pub use error::{DeckError, Result};
pub use loader::{Catalog, DeckList, DeckLoader};
pub use normalize::NameNormalizer;
pub use section::Section;
