// crates/placedb-core/src/lib.rs

//! # placedb-core
//!
//! An in-memory directory of U.S. places keyed by zipcode.
//!
//! The crate has three layers:
//!
//! - [`model`] — the [`Place`] record: zipcode/town/state plus optional
//!   location and census groups.
//! - [`db`] — the [`PlaceDb`] engine: add, lookup, prefix listing, distance,
//!   sorting, binary/sequential town search, and population ranking over the
//!   owned record sequence.
//! - [`loader`] — bulk CSV loading (two sources joined on zipcode) and the
//!   binary snapshot used to persist the collection between runs.
//!
//! The engine is sized for a few tens of thousands of static records:
//! queries are linear scans and the sort is a simple quadratic pass, by
//! design.
//!
//! ```
//! use placedb_core::{DefaultPlaceDb, Place};
//!
//! let mut db = DefaultPlaceDb::new();
//! db.add_place(Place::new("02134", "Allston", Some("MA")).with_location(42.35, -71.13));
//!
//! let hit = db.lookup_by_zipcode("02134").unwrap();
//! assert_eq!(hit.to_string(), "02134: Allston, MA, 42.35, -71.13");
//! ```

pub mod db;
pub mod error;
pub mod loader;
pub mod model;
pub mod traits;

// Re-exports
pub use crate::db::{DefaultPlaceDb, PlaceDb, NO_DISTANCE};
pub use crate::error::{PlaceDbError, Result};
pub use crate::model::{compare_by_population, Census, DefaultBackend, Location, Place};
pub use crate::traits::PlaceBackend;
