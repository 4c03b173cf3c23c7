// crates/placedb-core/src/loader/mod.rs

//! # Data loader
//!
//! Handles the physical layer (file I/O, optional decompression) and
//! delegates to the snapshot codec and the CSV source join.

use crate::error::{PlaceDbError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

mod snapshot;
mod sources;

/// Default primary source: `zipcode,town,state[,population]`.
pub const DEFAULT_PRIMARY_SOURCE: &str = "uszipcodes.csv";
/// Default secondary source carrying coordinates per zipcode.
pub const DEFAULT_SECONDARY_SOURCE: &str = "ziplocs.csv";
/// Default snapshot filename read at startup and written on exit.
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "database.bin";

/// Opens a snapshot file, buffers it, and optionally wraps it in a gzip
/// decoder. Returns a generic reader so the caller doesn't care about the
/// compression.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        PlaceDbError::NotFound(format!("snapshot not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    {
        use flate2::read::GzDecoder;
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Ok(Box::new(reader))
    }
}
