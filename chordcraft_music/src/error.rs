// Errors at the engine's boundaries.
//
// The derivation and generation core never fails: unknown names produce empty
// results and sampling gaps fall back to defined defaults. Only the outer
// layers (JSON config and catalog loading, CLI name parsing) report errors,
// and they do it through `MusicError`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MusicError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown root note '{0}' (expected one of C, C#, D, ... B)")]
    UnknownRoot(String),

    #[error("unknown scale '{0}'")]
    UnknownScale(String),

    #[error("unknown style '{0}'")]
    UnknownStyle(String),

    #[error("unknown example progression '{0}'")]
    UnknownProgression(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("no seed given and OS entropy unavailable: {0}")]
    Entropy(#[from] chordcraft_prng::EntropyError),
}

pub type Result<T> = std::result::Result<T, MusicError>;

/// Read a whole file, attaching the path to any IO error.
pub(crate) fn read_to_string(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| MusicError::Io {
        path: path.to_path_buf(),
        source,
    })
}
