// crates/placedb-core/src/loader/snapshot.rs

//! Binary snapshot persistence.
//!
//! The whole record sequence is serialized as one bincode blob
//! (gzip-wrapped under the `compact` feature). There is no version field;
//! the contract is an exact field-for-field round-trip, including which
//! optional groups are present on each record.

use super::open_stream;
use crate::db::PlaceDb;
use crate::error::Result;
use crate::model::{DefaultBackend, Place};
use bincode::Options;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Upper bound on a decoded snapshot, so a corrupt length prefix cannot
/// balloon memory.
const SNAPSHOT_LIMIT: u64 = 256 * 1024 * 1024;

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(SNAPSHOT_LIMIT)
        .allow_trailing_bytes()
}

impl PlaceDb<DefaultBackend> {
    /// Writes the entire collection to `path` as a single binary blob.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);

        #[cfg(feature = "compact")]
        {
            use flate2::{write::GzEncoder, Compression};
            let mut encoder = GzEncoder::new(writer, Compression::default());
            codec().serialize_into(&mut encoder, &self.places)?;
            encoder.finish()?;
        }

        #[cfg(not(feature = "compact"))]
        {
            let mut writer = writer;
            codec().serialize_into(&mut writer, &self.places)?;
        }

        Ok(())
    }

    /// Reconstructs a directory from a snapshot written by
    /// [`save_to_file`](Self::save_to_file).
    ///
    /// The `sorted` flag is never persisted; a loaded collection starts
    /// unsorted.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = open_stream(path.as_ref())?;
        let places: Vec<Place<DefaultBackend>> = codec().deserialize_from(reader)?;
        Ok(PlaceDb {
            places,
            sorted: false,
        })
    }
}
