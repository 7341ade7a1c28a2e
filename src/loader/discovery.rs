//! Locate the VtES module in the local Tabletop Simulator install

use crate::{DeckError, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

const WORKSHOP_DIR: [&str; 3] = ["Tabletop Simulator", "Mods", "Workshop"];

/// Where TTS keeps workshop mods on this platform
///
/// Windows installs live under `%APPDATA%`; everything else uses
/// `~/.local/share`.
pub fn candidate_path(
    windows: bool,
    appdata: Option<OsString>,
    home: Option<PathBuf>,
    file_name: &str,
) -> Option<PathBuf> {
    let base = match appdata {
        Some(appdata) if windows => PathBuf::from(appdata),
        _ => home?.join(".local").join("share"),
    };

    Some(WORKSHOP_DIR.iter().fold(base, |dir, part| dir.join(part)).join(file_name))
}

/// Find the module file, or explain where it was expected
pub fn find_catalog(file_name: &str) -> Result<PathBuf> {
    let candidate = candidate_path(
        cfg!(windows),
        std::env::var_os("APPDATA"),
        dirs::home_dir(),
        file_name,
    );

    match candidate {
        Some(path) if path.exists() => Ok(path),
        Some(path) => {
            debug!(path = %path.display(), "no TTS module at default location");
            Err(DeckError::CatalogNotFound { expected: path })
        }
        None => Err(DeckError::CatalogNotFound {
            expected: PathBuf::from(file_name),
        }),
    }
}
