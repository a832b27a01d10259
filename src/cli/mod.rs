use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;

use lri_screen::audit::{CsvAuditLog, NullRecorder, QueryRecorder};
use lri_screen::method::Method;
use lri_screen::reference::{LoadOptions, ReferenceData};

mod check;
mod config;
mod lri;
mod methods;
mod render;
mod screen;
mod search;

pub use config::{Config, Settings};

/// lri-screen - GC-MS retention time screening and LRI calculation
#[derive(Parser)]
#[command(name = "lri-screen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file (default: ./lri-screen.toml if present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    data: DataArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Reference data and query log locations
#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// Substance table export (CSV)
    #[arg(long, value_name = "FILE", global = true)]
    pub substances: Option<PathBuf>,

    /// n-alkane table export (CSV)
    #[arg(long, value_name = "FILE", global = true)]
    pub alkanes: Option<PathBuf>,

    /// Field delimiter of the table exports
    #[arg(long, value_name = "CHAR", global = true)]
    pub delimiter: Option<char>,

    /// Query log file
    #[arg(long, value_name = "FILE", global = true)]
    pub log: Option<PathBuf>,

    /// Do not append to the query log
    #[arg(long, global = true)]
    pub no_log: bool,
}

/// GC method selector.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MethodArg {
    /// DB-1ms
    #[value(name = "db1ms", alias = "DB-1ms")]
    Db1ms,
    /// HP-5ms
    #[value(name = "hp5ms", alias = "HP-5ms")]
    Hp5ms,
    /// DB-5ms (SID)
    #[value(name = "db5ms-sid", alias = "DB-5ms(SID)")]
    Db5msSid,
    /// DB-5ms (MARGGIE)
    #[value(name = "db5ms-marggie", alias = "DB-5ms(MARGGIE)")]
    Db5msMarggie,
    /// DB1-ms, 4 m column
    #[value(name = "db1ms-4m", alias = "DB1-ms-4m")]
    Db1ms4m,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Db1ms => Method::Db1ms,
            MethodArg::Hp5ms => Method::Hp5ms,
            MethodArg::Db5msSid => Method::Db5msSid,
            MethodArg::Db5msMarggie => Method::Db5msMarggie,
            MethodArg::Db1ms4m => Method::Db1ms4m,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search substances by (part of) their name
    Search {
        /// Text to look for, case-insensitive
        #[arg(value_name = "TEXT")]
        text: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Screen substances by retention time and fragments, and compute the LRI
    Screen {
        /// Observed retention time (minutes)
        #[arg(long, value_name = "MIN")]
        rt: f64,

        /// GC method (default from config, else db1ms)
        #[arg(short, long, value_enum)]
        method: Option<MethodArg>,

        /// RT tolerance in percent, 1-10 (default from config, else 1)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        tolerance: Option<u8>,

        /// Observed fragments, comma-separated (e.g. "91,105"); non-numeric entries are ignored
        #[arg(short, long, value_name = "M/Z LIST")]
        fragments: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the linear retention index of an observed retention time
    Lri {
        /// Observed retention time (minutes)
        #[arg(long, value_name = "MIN")]
        rt: f64,

        /// GC method (default from config, else db1ms)
        #[arg(short, long, value_enum)]
        method: Option<MethodArg>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the reference tables for gaps and inconsistencies
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the supported GC methods
    Methods,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    if let Commands::Methods = cli.command {
        return methods::run();
    }

    let config = Config::discover(cli.config.as_deref())?;
    let settings = Settings::resolve(config, &cli.data)?;

    match cli.command {
        Commands::Search { text, json } => search::run(&settings, &text, json),
        Commands::Screen {
            rt,
            method,
            tolerance,
            fragments,
            json,
        } => screen::run(
            &settings,
            rt,
            method.map(Method::from),
            tolerance,
            fragments.as_deref(),
            json,
        ),
        Commands::Lri { rt, method, json } => {
            lri::run(&settings, rt, method.map(Method::from), json)
        }
        Commands::Check { json } => check::run(&settings, json),
        Commands::Methods => methods::run(),
    }
}

/// Load the reference tables named by the settings
pub(crate) fn load_reference(settings: &Settings) -> Result<ReferenceData> {
    info!(
        "Loading reference data: {} + {}",
        settings.substances.display(),
        settings.alkanes.display()
    );
    let options = LoadOptions {
        delimiter: settings.delimiter,
    };
    ReferenceData::from_csv_files(&settings.substances, &settings.alkanes, &options)
        .with_context(|| {
            format!(
                "Failed to load reference data from {} and {}",
                settings.substances.display(),
                settings.alkanes.display()
            )
        })
}

/// Query recorder named by the settings
pub(crate) fn recorder(settings: &Settings) -> Box<dyn QueryRecorder> {
    match &settings.log_path {
        Some(path) => Box::new(CsvAuditLog::new(path)),
        None => Box::new(NullRecorder),
    }
}
