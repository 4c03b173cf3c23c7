// crates/placedb-core/src/error.rs

use thiserror::Error;

/// Errors surfaced by the loader and snapshot layers.
///
/// Query operations never produce these: "not found" is a normal result
/// (`None` / empty / the documented `-1.0` distance sentinel), not an error.
#[derive(Debug, Error)]
pub enum PlaceDbError {
    /// A source or snapshot file could not be opened.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, PlaceDbError>;
