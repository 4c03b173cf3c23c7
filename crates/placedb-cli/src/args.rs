use clap::Parser;
use placedb_core::loader::{
    DEFAULT_PRIMARY_SOURCE, DEFAULT_SECONDARY_SOURCE, DEFAULT_SNAPSHOT_FILENAME,
};

/// CLI arguments for placedb
#[derive(Debug, Parser)]
#[command(
    name = "placedb",
    version,
    about = "Interactive console for the placedb places directory"
)]
pub struct CliArgs {
    /// Path to the primary source CSV (zipcode,town,state[,population])
    #[arg(short = 'p', long = "primary", default_value = DEFAULT_PRIMARY_SOURCE)]
    pub primary: String,

    /// Path to the secondary source CSV carrying coordinates per zipcode
    #[arg(short = 'l', long = "locations", default_value = DEFAULT_SECONDARY_SOURCE)]
    pub secondary: String,

    /// Path of the binary snapshot read at startup and written on exit
    #[arg(short = 's', long = "snapshot", default_value = DEFAULT_SNAPSHOT_FILENAME)]
    pub snapshot: String,
}
