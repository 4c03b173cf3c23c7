// crates/placedb-core/src/model.rs

//! Place records.
//!
//! The directory stores a single record type, [`Place`], with two optional
//! groups: a geographic [`Location`] and a [`Census`] block. A record with
//! neither group is a bare zipcode/town/state entry; one with a location can
//! take part in distance queries; one with census data can be ranked by
//! population. Presence checks on the groups replace any notion of record
//! subtypes.

use crate::traits::PlaceBackend;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Default backend: plain `String` + `f64`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultBackend;

impl PlaceBackend for DefaultBackend {
    type Str = String;
    type Float = f64;

    #[inline]
    fn str_from(s: &str) -> Self::Str {
        s.to_owned()
    }

    #[inline]
    fn float_from(f: f64) -> Self::Float {
        f
    }

    #[inline]
    fn float_to_f64(v: Self::Float) -> f64 {
        v
    }

    #[inline]
    fn str_to_string(v: &Self::Str) -> String {
        v.clone()
    }
}

/// A geographic position in degrees.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location<B: PlaceBackend> {
    pub latitude: B::Float,
    pub longitude: B::Float,
}

impl<B: PlaceBackend> Location<B> {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude: B::float_from(latitude),
            longitude: B::float_from(longitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        B::float_to_f64(self.latitude)
    }

    pub fn longitude(&self) -> f64 {
        B::float_to_f64(self.longitude)
    }
}

impl<B: PlaceBackend> PartialEq for Location<B> {
    fn eq(&self, other: &Self) -> bool {
        self.latitude() == other.latitude() && self.longitude() == other.longitude()
    }
}

/// Census data for a place. Absence of the whole block is the
/// "population unknown" case; `males`/`females` default to 0 when the
/// source does not supply them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub population: u32,
    pub males: u32,
    pub females: u32,
}

impl Census {
    pub fn new(population: u32) -> Self {
        Census {
            population,
            males: 0,
            females: 0,
        }
    }

    pub fn with_counts(population: u32, males: u32, females: u32) -> Self {
        Census {
            population,
            males,
            females,
        }
    }
}

/// One entry in the places directory.
///
/// The `zipcode` is the record's identity and is fixed at construction;
/// every descriptive field is mutable through its setter. `Clone` produces a
/// value-identical duplicate with no shared backing state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place<B: PlaceBackend> {
    zipcode: B::Str,
    town: B::Str,
    state: Option<B::Str>,
    location: Option<Location<B>>,
    census: Option<Census>,
}

impl<B: PlaceBackend> Place<B> {
    pub fn new(zipcode: &str, town: &str, state: Option<&str>) -> Self {
        Place {
            zipcode: B::str_from(zipcode),
            town: B::str_from(town),
            state: state.map(B::str_from),
            location: None,
            census: None,
        }
    }

    pub fn zipcode(&self) -> &str {
        self.zipcode.as_ref()
    }

    pub fn town(&self) -> &str {
        self.town.as_ref()
    }

    pub fn set_town(&mut self, town: &str) {
        self.town = B::str_from(town);
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.as_ref())
    }

    pub fn set_state(&mut self, state: &str) {
        self.state = Some(B::str_from(state));
    }

    pub fn location(&self) -> Option<&Location<B>> {
        self.location.as_ref()
    }

    pub fn set_location(&mut self, latitude: f64, longitude: f64) {
        self.location = Some(Location::new(latitude, longitude));
    }

    pub fn census(&self) -> Option<&Census> {
        self.census.as_ref()
    }

    pub fn set_census(&mut self, census: Census) {
        self.census = Some(census);
    }

    /// Population, when census data is present.
    pub fn population(&self) -> Option<u32> {
        self.census.as_ref().map(|c| c.population)
    }

    /// Builder-style variant of [`set_location`](Self::set_location).
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.set_location(latitude, longitude);
        self
    }

    /// Builder-style variant of [`set_census`](Self::set_census).
    pub fn with_census(mut self, census: Census) -> Self {
        self.set_census(census);
        self
    }
}

impl<B: PlaceBackend> PartialEq for Place<B> {
    fn eq(&self, other: &Self) -> bool {
        self.zipcode() == other.zipcode()
            && self.town() == other.town()
            && self.state() == other.state()
            && self.location == other.location
            && self.census == other.census
    }
}

impl<B: PlaceBackend> fmt::Display for Place<B> {
    /// Renders `"<zipcode>: <town>, <state>"`, appending
    /// `", <lat>, <lon>"` (2 decimal places) when a location is present and
    /// `", <population>"` when census data is present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.zipcode(), self.town())?;
        if let Some(state) = self.state() {
            write!(f, ", {state}")?;
        }
        if let Some(loc) = &self.location {
            write!(f, ", {:.2}, {:.2}", loc.latitude(), loc.longitude())?;
        }
        if let Some(census) = &self.census {
            write!(f, ", {}", census.population)?;
        }
        Ok(())
    }
}

/// Total order by population, ascending; records without census data sort
/// first. Ranking wants descending rank, so callers flip the direction
/// explicitly rather than relying on this function.
pub fn compare_by_population<B: PlaceBackend>(a: &Place<B>, b: &Place<B>) -> Ordering {
    a.population().cmp(&b.population())
}
