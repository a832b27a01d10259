//! # lri-screen
//!
//! Command-line front end for retention-time screening against a GC-MS
//! reference library.
//!
//! ## Usage
//!
//! ```bash
//! # Candidates within 4 % of 10.52 min on DB-1ms, confirmed by two fragments
//! lri-screen screen --rt 10.52 --method db1ms --tolerance 4 --fragments "82,182"
//!
//! # LRI of an observed peak
//! lri-screen lri --rt 10.52 --method hp5ms
//!
//! # Substance name search
//! lri-screen search cocaína
//!
//! # Check the reference tables
//! lri-screen check --substances substancias.csv --alkanes alcanos.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
