// crates/placedb-core/src/loader/sources.rs

//! Bulk CSV loading.
//!
//! Two comma-delimited sources, each with a header line, are joined on
//! zipcode: the primary listing contributes one record per line and the
//! secondary location table attaches coordinates to existing records.

use crate::db::PlaceDb;
use crate::error::{PlaceDbError, Result};
use crate::model::{Census, Place};
use crate::traits::PlaceBackend;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

// Column layout of the location table; every other column is ignored.
const LOC_ZIPCODE: usize = 0;
const LOC_LATITUDE: usize = 5;
const LOC_LONGITUDE: usize = 6;
const LOC_MIN_COLUMNS: usize = 8;

impl<B: PlaceBackend> PlaceDb<B> {
    /// Builds a directory from the two delimited sources.
    ///
    /// The primary file (`zipcode,town,state[,population]`) yields a base
    /// record per line, with a census block when the population column is
    /// present and non-empty. The secondary file (zipcode at column 0,
    /// latitude at 5, longitude at 6, at least 8 columns) upgrades matching
    /// records with a location. Malformed lines are skipped with a
    /// diagnostic; a source that cannot be opened is an error.
    pub fn read_zip_codes(
        primary: impl AsRef<Path>,
        secondary: impl AsRef<Path>,
    ) -> Result<Self> {
        let mut db = PlaceDb::new();
        let mut by_zipcode: HashMap<String, usize> = HashMap::new();

        let primary = primary.as_ref();
        for (lineno, line) in open_source(primary)?.lines().enumerate() {
            let line = line?;
            if lineno == 0 {
                continue; // header
            }
            let parts: Vec<&str> = line.split(',').collect();
            if parts.len() < 3 {
                warn!(file = %primary.display(), line = lineno + 1, "skipping short line");
                continue;
            }

            let zipcode = parts[0].trim();
            if by_zipcode.contains_key(zipcode) {
                warn!(file = %primary.display(), line = lineno + 1, zipcode, "skipping duplicate zipcode");
                continue;
            }

            let mut place = Place::new(zipcode, parts[1].trim(), Some(parts[2].trim()));
            if let Some(raw) = parts.get(3).map(|s| s.trim()).filter(|s| !s.is_empty()) {
                match raw.parse::<u32>() {
                    Ok(population) => place.set_census(Census::new(population)),
                    Err(_) => {
                        warn!(file = %primary.display(), line = lineno + 1, "skipping line with unparseable population");
                        continue;
                    }
                }
            }

            by_zipcode.insert(zipcode.to_string(), db.places.len());
            db.places.push(place);
        }

        let secondary = secondary.as_ref();
        for (lineno, line) in open_source(secondary)?.lines().enumerate() {
            let line = line?;
            if lineno == 0 {
                continue; // header
            }
            let parts: Vec<&str> = line.split(',').collect();
            if parts.len() < LOC_MIN_COLUMNS {
                warn!(file = %secondary.display(), line = lineno + 1, "skipping short line");
                continue;
            }

            let lat = parts[LOC_LATITUDE].trim();
            let lon = parts[LOC_LONGITUDE].trim();
            if lat.is_empty() || lon.is_empty() {
                // No coordinates for this zipcode; not malformed.
                continue;
            }
            let (Ok(latitude), Ok(longitude)) = (lat.parse::<f64>(), lon.parse::<f64>())
            else {
                warn!(file = %secondary.display(), line = lineno + 1, "skipping line with unparseable coordinates");
                continue;
            };

            if let Some(&index) = by_zipcode.get(parts[LOC_ZIPCODE].trim()) {
                db.places[index].set_location(latitude, longitude);
            }
        }

        Ok(db)
    }
}

fn open_source(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        PlaceDbError::NotFound(format!("source not found at {}: {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}
