// crates/placedb-core/src/db.rs

//! The `PlaceDb` engine: an ordered, zipcode-keyed collection of places
//! with lookup, prefix listing, distance, sorting, searching and ranking.
//!
//! The engine is single-threaded owned data; callers mutate through `&mut`
//! and no locking discipline exists. Concurrent use would race on the
//! `sorted` flag and the record sequence, so a wrapper taking that on must
//! serialize mutations (insert, sort, load) against reads.

use crate::model::{compare_by_population, DefaultBackend, Place};
use crate::traits::PlaceBackend;
use std::cmp::Ordering;
use tracing::warn;

/// Sentinel returned by [`PlaceDb::distance`] when either endpoint is
/// unknown or has no location. A valid "no answer", not an error.
pub const NO_DISTANCE: f64 = -1.0;

/// The places directory.
///
/// Records are kept in insertion order until [`PlaceDb::sort_by_town_name`]
/// reorders them. The `sorted` flag is authoritative: binary search is only
/// meaningful while it is set, and any insertion clears it.
#[derive(Clone, Debug)]
pub struct PlaceDb<B: PlaceBackend> {
    pub(crate) places: Vec<Place<B>>,
    pub(crate) sorted: bool,
}

impl<B: PlaceBackend> Default for PlaceDb<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient alias for the default backend.
pub type DefaultPlaceDb = PlaceDb<DefaultBackend>;

impl<B: PlaceBackend> PlaceDb<B> {
    pub fn new() -> Self {
        PlaceDb {
            places: Vec::new(),
            sorted: false,
        }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// True only immediately after [`sort_by_town_name`](Self::sort_by_town_name);
    /// cleared by every insertion and by loading a snapshot.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Record at `index`. Out-of-bounds access is a caller contract
    /// violation and panics.
    pub fn get(&self, index: usize) -> &Place<B> {
        &self.places[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place<B>> {
        self.places.iter()
    }

    /// Appends a record, enforcing zipcode uniqueness.
    ///
    /// Returns `false` (after a warn, with no mutation) when the zipcode is
    /// empty or already present; returns `true` once the record is stored,
    /// which also clears the `sorted` flag.
    pub fn add_place(&mut self, place: Place<B>) -> bool {
        if place.zipcode().is_empty() {
            warn!("rejected insert: empty zipcode");
            return false;
        }
        if self.places.iter().any(|p| p.zipcode() == place.zipcode()) {
            warn!(zipcode = place.zipcode(), "rejected insert: zipcode already exists");
            return false;
        }
        self.places.push(place);
        self.sorted = false;
        true
    }

    /// Case-insensitive exact lookup by zipcode; first match wins.
    pub fn lookup_by_zipcode(&self, zipcode: &str) -> Option<&Place<B>> {
        if zipcode.is_empty() {
            warn!("rejected lookup: empty zipcode");
            return None;
        }
        self.places
            .iter()
            .find(|p| p.zipcode().eq_ignore_ascii_case(zipcode))
    }

    /// Every record whose zipcode starts with `prefix` (case-sensitive,
    /// literal). A linear scan, independent of sort order.
    pub fn list_all_places(&self, prefix: &str) -> Vec<&Place<B>> {
        if prefix.is_empty() {
            warn!("rejected listing: empty prefix");
            return Vec::new();
        }
        self.places
            .iter()
            .filter(|p| p.zipcode().starts_with(prefix))
            .collect()
    }

    /// Straight-line distance between two zipcodes.
    ///
    /// Resolves both endpoints via [`lookup_by_zipcode`](Self::lookup_by_zipcode)
    /// and returns [`NO_DISTANCE`] when either is missing or has no location.
    /// The metric is plane Euclidean over raw latitude/longitude degrees,
    /// `sqrt((lat2-lat1)^2 + (lon2-lon1)^2)` — deliberately not a
    /// great-circle distance; at directory scale the approximation is the
    /// documented contract.
    pub fn distance(&self, zip1: &str, zip2: &str) -> f64 {
        let (Some(a), Some(b)) = (self.lookup_by_zipcode(zip1), self.lookup_by_zipcode(zip2))
        else {
            return NO_DISTANCE;
        };
        let (Some(loc1), Some(loc2)) = (a.location(), b.location()) else {
            return NO_DISTANCE;
        };
        let dlat = loc2.latitude() - loc1.latitude();
        let dlon = loc2.longitude() - loc1.longitude();
        (dlat * dlat + dlon * dlon).sqrt()
    }

    /// Reorders the collection ascending by town name and sets the
    /// `sorted` flag.
    ///
    /// A stable bubble sort: equal-town records keep their relative order.
    /// O(n²) is intentional at the target scale of a few tens of thousands
    /// of static records.
    pub fn sort_by_town_name(&mut self) {
        let n = self.places.len();
        for i in 0..n.saturating_sub(1) {
            for j in 0..n - i - 1 {
                if self.places[j].town() > self.places[j + 1].town() {
                    self.places.swap(j, j + 1);
                }
            }
        }
        self.sorted = true;
    }

    /// Binary search over `[low, high]` of the currently stored order,
    /// matching the town case-insensitively.
    ///
    /// Precondition: the caller has sorted the collection by town name.
    /// The engine does not consult the `sorted` flag here; drivers fall
    /// back to [`sequential_search_by_town_name`](Self::sequential_search_by_town_name)
    /// on a miss. Bounds are `isize` so `(0, len - 1)` is well-formed on an
    /// empty collection.
    pub fn binary_search_by_town_name(
        &self,
        town: &str,
        mut low: isize,
        mut high: isize,
    ) -> Option<usize> {
        let needle = town.to_ascii_lowercase();
        while low <= high {
            let mid = (low + high) / 2;
            let mid_town = self.places[mid as usize].town().to_ascii_lowercase();
            match mid_town.cmp(&needle) {
                Ordering::Equal => return Some(mid as usize),
                Ordering::Greater => high = mid - 1,
                Ordering::Less => low = mid + 1,
            }
        }
        None
    }

    /// Linear scan for a town, case-insensitive exact match.
    pub fn sequential_search_by_town_name(&self, town: &str) -> Option<usize> {
        self.places
            .iter()
            .position(|p| p.town().eq_ignore_ascii_case(town))
    }

    /// 1-based population rank of `town` among census-bearing records
    /// (rank 1 = highest population), or `None` when no populated record
    /// matches.
    ///
    /// Operates on a temporary filtered view; neither the main order nor
    /// the `sorted` flag is touched.
    pub fn rank_by_population(&self, town: &str) -> Option<usize> {
        let mut ranked: Vec<&Place<B>> = self
            .places
            .iter()
            .filter(|p| p.census().is_some())
            .collect();
        // compare_by_population orders ascending; flip for rank 1 = largest.
        ranked.sort_by(|a, b| compare_by_population(b, a));
        ranked
            .iter()
            .position(|p| p.town().eq_ignore_ascii_case(town))
            .map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Census;

    type P = Place<DefaultBackend>;

    fn place(zipcode: &str, town: &str) -> P {
        P::new(zipcode, town, Some("MA"))
    }

    fn located(zipcode: &str, town: &str, lat: f64, lon: f64) -> P {
        place(zipcode, town).with_location(lat, lon)
    }

    fn populated(zipcode: &str, town: &str, population: u32) -> P {
        located(zipcode, town, 42.0, -71.0).with_census(Census::new(population))
    }

    #[test]
    fn insert_then_lookup_any_case() {
        let mut db = DefaultPlaceDb::new();
        assert!(db.add_place(place("0213a", "Allston")));

        let hit = db.lookup_by_zipcode("0213A").expect("should find record");
        assert_eq!(hit.zipcode(), "0213a");
        assert_eq!(hit.town(), "Allston");
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut db = DefaultPlaceDb::new();
        assert!(db.add_place(place("02134", "Allston")));
        assert!(!db.add_place(place("02134", "Somewhere Else")));
        assert_eq!(db.len(), 1);
        assert_eq!(db.get(0).town(), "Allston");
    }

    #[test]
    fn empty_zipcode_is_rejected() {
        let mut db = DefaultPlaceDb::new();
        assert!(!db.add_place(place("", "Nowhere")));
        assert!(db.is_empty());
        assert!(db.lookup_by_zipcode("").is_none());
    }

    #[test]
    fn insert_clears_sorted_flag() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(place("02134", "Allston"));
        db.sort_by_town_name();
        assert!(db.is_sorted());

        db.add_place(place("02135", "Brighton"));
        assert!(!db.is_sorted());
    }

    #[test]
    fn prefix_listing_is_exact() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(place("02134", "Allston"));
        db.add_place(place("02135", "Brighton"));
        db.add_place(place("10001", "New York"));

        let hits = db.list_all_places("021");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|p| p.zipcode().starts_with("021")));

        assert!(db.list_all_places("99").is_empty());
        assert!(db.list_all_places("").is_empty());
    }

    #[test]
    fn distance_is_symmetric_and_zero_for_same_point() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(located("02134", "Allston", 42.35, -71.13));
        db.add_place(located("10001", "New York", 40.75, -73.99));
        db.add_place(located("02134x", "Twin", 42.35, -71.13));

        let d1 = db.distance("02134", "10001");
        let d2 = db.distance("10001", "02134");
        assert!(d1 > 0.0);
        assert_eq!(d1, d2);

        assert_eq!(db.distance("02134", "02134x"), 0.0);
    }

    #[test]
    fn distance_sentinel_for_missing_or_unlocated() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(located("02134", "Allston", 42.35, -71.13));
        db.add_place(place("02135", "Brighton")); // no location

        assert_eq!(db.distance("02134", "00000"), NO_DISTANCE);
        assert_eq!(db.distance("00000", "02134"), NO_DISTANCE);
        assert_eq!(db.distance("02134", "02135"), NO_DISTANCE);
    }

    #[test]
    fn sort_orders_by_town_and_is_stable() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(place("3", "Chelsea"));
        db.add_place(place("1", "Allston"));
        db.add_place(place("2", "Chelsea"));
        db.add_place(place("4", "Brighton"));

        db.sort_by_town_name();
        assert!(db.is_sorted());

        let towns: Vec<&str> = db.iter().map(|p| p.town()).collect();
        assert_eq!(towns, ["Allston", "Brighton", "Chelsea", "Chelsea"]);
        // Equal towns keep insertion order.
        assert_eq!(db.get(2).zipcode(), "3");
        assert_eq!(db.get(3).zipcode(), "2");
    }

    #[test]
    fn binary_search_finds_every_town_after_sort() {
        let mut db = DefaultPlaceDb::new();
        for (zip, town) in [
            ("5", "Quincy"),
            ("1", "Allston"),
            ("3", "Chelsea"),
            ("2", "Brighton"),
            ("4", "Medford"),
        ] {
            db.add_place(place(zip, town));
        }
        db.sort_by_town_name();

        let high = db.len() as isize - 1;
        for town in ["Allston", "Brighton", "Chelsea", "Medford", "Quincy"] {
            let idx = db
                .binary_search_by_town_name(town, 0, high)
                .unwrap_or_else(|| panic!("{town} not found"));
            assert!(db.get(idx).town().eq_ignore_ascii_case(town));
        }

        // Case-insensitive match, and a clean miss.
        assert!(db.binary_search_by_town_name("quincy", 0, high).is_some());
        assert!(db.binary_search_by_town_name("Springfield", 0, high).is_none());
    }

    #[test]
    fn binary_search_on_empty_collection() {
        let db = DefaultPlaceDb::new();
        assert!(db.binary_search_by_town_name("Allston", 0, -1).is_none());
    }

    #[test]
    fn sequential_search_ignores_case_and_order() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(place("2", "Brighton"));
        db.add_place(place("1", "Allston"));

        assert_eq!(db.sequential_search_by_town_name("ALLSTON"), Some(1));
        assert_eq!(db.sequential_search_by_town_name("Springfield"), None);
    }

    #[test]
    fn rank_by_population_is_descending_and_one_based() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(populated("1", "Aville", 100));
        db.add_place(populated("2", "Bville", 300));
        db.add_place(populated("3", "Cville", 200));
        db.add_place(place("4", "Dville")); // no census, excluded

        assert_eq!(db.rank_by_population("Bville"), Some(1));
        assert_eq!(db.rank_by_population("cville"), Some(2));
        assert_eq!(db.rank_by_population("Aville"), Some(3));
        assert_eq!(db.rank_by_population("Dville"), None);
        assert_eq!(db.rank_by_population("Nowhere"), None);
    }

    #[test]
    fn rank_does_not_disturb_order_or_flag() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(populated("2", "Bville", 300));
        db.add_place(populated("1", "Aville", 100));

        let before: Vec<String> = db.iter().map(|p| p.zipcode().to_string()).collect();
        db.rank_by_population("Aville");
        let after: Vec<String> = db.iter().map(|p| p.zipcode().to_string()).collect();
        assert_eq!(before, after);
        assert!(!db.is_sorted());
    }
}
