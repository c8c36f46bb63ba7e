//! Settings for a session, resolved from flags, the environment and `.env`.
//!
//! Flags win over environment variables. `.env` is loaded by `dotenv` before
//! resolution, and it never overrides variables that are already set.

use std::path::PathBuf;

use clap::ArgMatches;
use lapse_lib::TimeUnit;

use crate::error::CliError;

pub const UNIT_VAR: &str = "LAPSE_UNIT";
pub const PAUSABLE_VAR: &str = "LAPSE_PAUSABLE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `None` prints fractional seconds.
    pub unit: Option<TimeUnit>,
    pub pausable: bool,
    pub json: bool,
    pub quiet: bool,
}

impl Settings {
    pub fn resolve<F>(args: &ArgMatches, lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let unit = match args.get_one::<String>("unit").cloned().or_else(|| lookup(UNIT_VAR)) {
            Some(name) => Some(name.parse::<TimeUnit>()?),
            None => None,
        };

        let pausable = args.get_flag("pausable")
            || lookup(PAUSABLE_VAR)
                .map(|value| is_truthy(&value))
                .unwrap_or(false);

        let json = args.get_flag("json");

        Ok(Self {
            unit,
            pausable,
            json,
            quiet: args.get_flag("quiet") || json,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Load `.env` from the working directory or its ancestors, if present.
///
/// Called before the logger is installed so `.env` can set `RUST_LOG`; pass
/// the result to [`log_dotenv`] once logging is up.
pub fn load_dotenv() -> dotenv::Result<PathBuf> {
    dotenv::dotenv()
}

pub fn log_dotenv(result: &dotenv::Result<PathBuf>) {
    match result {
        Ok(path) => log::debug!("loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => log::warn!("ignoring .env: {}", err),
    }
}
