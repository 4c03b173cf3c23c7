//! The interactive command loop.
//!
//! Presents the seven-command menu, collects field values, calls into the
//! engine, and prints results. The loop reads from a generic `BufRead` and
//! writes to a generic `Write` so it can be driven from tests.

use placedb_core::{Census, DefaultPlaceDb, Place, NO_DISTANCE};
use std::io::{BufRead, Write};

const COMMANDS: [&str; 7] = [
    "Add Place",
    "Look Up by Zipcode",
    "List All Places by Zipcode Prefix",
    "Distance Between Zipcodes",
    "Sort by Town Name",
    "Lookup by Town Name",
    "Save and Exit",
];

/// Runs the menu until Save and Exit (or end of input, which also saves).
/// A persistence failure on the way out is reported but never blocks exit.
pub fn run(
    db: &mut DefaultPlaceDb,
    snapshot: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    loop {
        for (i, command) in COMMANDS.iter().enumerate() {
            writeln!(out, "Select {i}: {command}")?;
        }

        let Some(choice) = read_line(input, out, "")? else {
            break;
        };
        match choice.parse::<usize>() {
            Ok(0) => do_add_place(db, input, out)?,
            Ok(1) => do_lookup_by_zipcode(db, input, out)?,
            Ok(2) => do_list_all_places(db, input, out)?,
            Ok(3) => do_distance(db, input, out)?,
            Ok(4) => {
                db.sort_by_town_name();
                writeln!(out, "Directory sorted by town name.")?;
            }
            Ok(5) => do_lookup_by_town_name(db, input, out)?,
            Ok(6) => break,
            _ => writeln!(out, "*** Invalid choice {choice} - try again!")?,
        }
    }

    do_save_and_exit(db, snapshot, out)
}

fn do_add_place(
    db: &mut DefaultPlaceDb,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(zipcode) = read_line(input, out, "Enter zipcode:")? else {
        return Ok(());
    };
    let Some(town) = read_line(input, out, "Enter town name:")? else {
        return Ok(());
    };
    let Some(state) = read_line(input, out, "Enter state:")? else {
        return Ok(());
    };
    let Some(latitude) = read_optional_f64(input, out, "Enter latitude (or none):")? else {
        return Ok(());
    };
    let Some(longitude) = read_optional_f64(input, out, "Enter longitude (or none):")? else {
        return Ok(());
    };
    let Some(population) = read_optional_u32(input, out, "Enter population (or none):")? else {
        return Ok(());
    };

    let state = if state.is_empty() {
        None
    } else {
        Some(state.as_str())
    };
    let mut place = Place::new(&zipcode, &town, state);
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => place.set_location(lat, lon),
        (None, None) => {}
        _ => writeln!(
            out,
            "Latitude and longitude must both be given; location not set."
        )?,
    }
    if let Some(population) = population {
        place.set_census(Census::new(population));
    }

    if db.add_place(place) {
        writeln!(out, "Added {zipcode}.")?;
    } else {
        writeln!(out, "Place not added: empty or duplicate zipcode {zipcode}.")?;
    }
    Ok(())
}

fn do_lookup_by_zipcode(
    db: &DefaultPlaceDb,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(zipcode) = read_line(input, out, "Enter zipcode:")? else {
        return Ok(());
    };
    if zipcode.is_empty() {
        return Ok(()); // cancelled
    }
    match db.lookup_by_zipcode(&zipcode) {
        Some(place) => writeln!(out, "{place}")?,
        None => writeln!(out, "No such zipcode")?,
    }
    Ok(())
}

fn do_list_all_places(
    db: &DefaultPlaceDb,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(prefix) = read_line(input, out, "Enter zipcode prefix:")? else {
        return Ok(());
    };
    if prefix.is_empty() {
        return Ok(()); // cancelled
    }
    let matches = db.list_all_places(&prefix);
    if matches.is_empty() {
        writeln!(out, "No places found with prefix {prefix}")?;
    } else {
        writeln!(out, "Places with zipcode prefix {prefix}:")?;
        for place in matches {
            writeln!(out, "{place}")?;
        }
    }
    Ok(())
}

fn do_distance(
    db: &DefaultPlaceDb,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(zip1) = read_line(input, out, "Enter the first zipcode:")? else {
        return Ok(());
    };
    if zip1.is_empty() {
        return Ok(());
    }
    let Some(zip2) = read_line(input, out, "Enter the second zipcode:")? else {
        return Ok(());
    };
    if zip2.is_empty() {
        return Ok(());
    }

    let distance = db.distance(&zip1, &zip2);
    if distance == NO_DISTANCE {
        writeln!(
            out,
            "Location information is unavailable for one or both of the zipcodes."
        )?;
    } else {
        writeln!(out, "The distance between {zip1} and {zip2} is: {distance}")?;
    }
    Ok(())
}

fn do_lookup_by_town_name(
    db: &DefaultPlaceDb,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(town) = read_line(input, out, "Enter town name:")? else {
        return Ok(());
    };
    if town.is_empty() {
        return Ok(());
    }

    // Binary search assumes a prior sort; fall back to the linear scan when
    // it misses.
    let high = db.len() as isize - 1;
    let index = db
        .binary_search_by_town_name(&town, 0, high)
        .or_else(|| db.sequential_search_by_town_name(&town));
    let Some(index) = index else {
        writeln!(out, "Town not found.")?;
        return Ok(());
    };

    writeln!(out, "Found: {}", db.get(index))?;
    writeln!(out, "Index in list: {index}")?;
    match db.rank_by_population(&town) {
        Some(rank) => writeln!(out, "Rank by population: {rank}")?,
        None => writeln!(out, "Population data not available for this town.")?,
    }
    Ok(())
}

fn do_save_and_exit(
    db: &DefaultPlaceDb,
    snapshot: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match db.save_to_file(snapshot) {
        Ok(()) => writeln!(out, "Directory saved to {snapshot}")?,
        Err(e) => writeln!(out, "Error saving directory: {e}")?,
    }
    writeln!(out, "Exiting...")?;
    Ok(())
}

/// Prompts (when `prompt` is non-empty) and reads one trimmed line.
/// `None` means end of input.
fn read_line(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> anyhow::Result<Option<String>> {
    if !prompt.is_empty() {
        writeln!(out, "{prompt}")?;
    }
    out.flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

/// Reads an optional number: blank or "none" means absent. Outer `None`
/// means the command was aborted (end of input or an unparseable value,
/// which is reported).
fn read_optional_f64(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> anyhow::Result<Option<Option<f64>>> {
    let Some(raw) = read_line(input, out, prompt)? else {
        return Ok(None);
    };
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Ok(Some(None));
    }
    match raw.parse::<f64>() {
        Ok(value) => Ok(Some(Some(value))),
        Err(_) => {
            writeln!(out, "*** Not a number: {raw}")?;
            Ok(None)
        }
    }
}

fn read_optional_u32(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> anyhow::Result<Option<Option<u32>>> {
    let Some(raw) = read_line(input, out, prompt)? else {
        return Ok(None);
    };
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Ok(Some(None));
    }
    match raw.parse::<u32>() {
        Ok(value) => Ok(Some(Some(value))),
        Err(_) => {
            writeln!(out, "*** Not a number: {raw}")?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(db: &mut DefaultPlaceDb, script: &str) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("session.bin");
        let mut input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        run(db, snapshot.to_str().unwrap(), &mut input, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), dir)
    }

    #[test]
    fn add_then_lookup_then_exit() {
        let mut db = DefaultPlaceDb::new();
        let script = "0\n02134\nAllston\nMA\n42.35\n-71.13\nnone\n1\n02134\n6\n";
        let (output, dir) = run_session(&mut db, script);

        assert!(output.contains("Added 02134."));
        assert!(output.contains("02134: Allston, MA, 42.35, -71.13"));
        assert!(output.contains("Exiting..."));
        assert_eq!(db.len(), 1);

        // Save and Exit wrote the snapshot.
        let reloaded = DefaultPlaceDb::load_from_file(dir.path().join("session.bin")).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn town_lookup_reports_index_and_rank() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(
            Place::new("2", "Bville", Some("MA"))
                .with_location(1.0, 1.0)
                .with_census(Census::new(300)),
        );
        db.add_place(
            Place::new("1", "Aville", Some("MA"))
                .with_location(2.0, 2.0)
                .with_census(Census::new(100)),
        );

        // Sort first, then look up; binary search should hit.
        let script = "4\n5\nAville\n6\n";
        let (output, _dir) = run_session(&mut db, script);

        assert!(output.contains("Directory sorted by town name."));
        assert!(output.contains("Found: 1: Aville, MA"));
        assert!(output.contains("Index in list: 0"));
        assert!(output.contains("Rank by population: 2"));
    }

    #[test]
    fn unknown_town_falls_back_and_reports_not_found() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(Place::new("1", "Aville", Some("MA")));

        let script = "5\nNowhere\n6\n";
        let (output, _dir) = run_session(&mut db, script);
        assert!(output.contains("Town not found."));
    }

    #[test]
    fn invalid_choice_reprompts() {
        let mut db = DefaultPlaceDb::new();
        let (output, _dir) = run_session(&mut db, "9\n6\n");
        assert!(output.contains("*** Invalid choice 9 - try again!"));
    }

    #[test]
    fn distance_sentinel_prints_unavailable_message() {
        let mut db = DefaultPlaceDb::new();
        db.add_place(Place::new("1", "Aville", Some("MA")));
        db.add_place(Place::new("2", "Bville", Some("MA")));

        let script = "3\n1\n2\n6\n";
        let (output, _dir) = run_session(&mut db, script);
        assert!(output
            .contains("Location information is unavailable for one or both of the zipcodes."));
    }
}
