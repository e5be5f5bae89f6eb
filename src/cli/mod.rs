//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use crate::{
    cdo::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
    config::Config,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CDO web services access token
    #[arg(long, env = "CDO_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Base URL of the CDO web services
    #[arg(long, env = "CDO_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "CDO_TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs(), global = true)]
    pub timeout: u64,

    /// State/county reference dataset to use instead of the bundled one
    #[arg(long, env = "CDO_COUNTIES", global = true)]
    pub counties: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List states
    States {},
    /// List the counties of a state
    Counties {
        /// State name, as listed by `states`
        state: String,

        /// Show each county's FIPS code
        #[arg(long)]
        codes: bool,
    },
    /// Get a month of daily maximum temperatures for a county
    Fetch(FetchArgs),
}

#[derive(Args)]
pub struct FetchArgs {
    /// State name
    #[arg(long)]
    pub state: String,

    /// County name
    #[arg(long)]
    pub county: String,

    /// Month to fetch, as YYYY-MM (defaults to the current month)
    #[arg(long, value_parser = parse_month, conflicts_with = "date")]
    pub month: Option<NaiveDate>,

    /// Any date within the month to fetch, as YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Print the series as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            token: self.token.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            counties: self.counties.clone(),
        }
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the verbosity flag.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

fn parse_month(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| format!("`{}` is not a month in YYYY-MM form", s))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("`{}` is not a date in YYYY-MM-DD form", s))
}

// -- Tests -------------------------------------------------------------------
