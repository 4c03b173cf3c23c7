//! placedb — console front end for the placedb-core places directory.
//!
//! On startup the directory is populated once: from the binary snapshot if
//! one exists, otherwise by bulk-loading the two CSV sources. A load
//! failure is reported and the session continues with an empty directory.
//! The interactive menu then issues single operations against the engine;
//! Save and Exit persists the collection back to the snapshot path and the
//! process terminates with success status.
//!
//! Usage examples
//! --------------
//!
//! - Run against the default files in the working directory
//!   $ placedb
//!
//! - Point at custom sources and a custom snapshot
//!   $ placedb --primary zips.csv --locations locs.csv --snapshot places.bin
//!
//! Set `RUST_LOG=debug` to see per-line loader diagnostics.
mod args;
mod menu;

use crate::args::CliArgs;
use clap::Parser;
use placedb_core::DefaultPlaceDb;
use std::io;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = CliArgs::parse();

    let mut db = if Path::new(&args.snapshot).exists() {
        match DefaultPlaceDb::load_from_file(&args.snapshot) {
            Ok(db) => db,
            Err(e) => {
                eprintln!("Error loading snapshot {}: {e}", args.snapshot);
                DefaultPlaceDb::new()
            }
        }
    } else {
        match DefaultPlaceDb::read_zip_codes(&args.primary, &args.secondary) {
            Ok(db) => db,
            Err(e) => {
                eprintln!("Error loading sources: {e}");
                DefaultPlaceDb::new()
            }
        }
    };

    tracing::info!(places = db.len(), "directory initialized");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    menu::run(&mut db, &args.snapshot, &mut input, &mut out)
}
