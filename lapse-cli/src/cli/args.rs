//! CLI argument definitions for `lapse-cli`.

use clap::{Arg, ArgAction, Command};

/// Build the CLI argument parser.
pub fn build_cli() -> Command {
    Command::new("lapse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Measure the time between two presses of ENTER")
        .arg(
            Arg::new("unit")
                .long("unit")
                .short('u')
                .value_name("UNIT")
                .help("Report in ns, us, ms, s, min or h instead of fractional seconds"),
        )
        .arg(
            Arg::new("pausable")
                .long("pausable")
                .short('p')
                .action(ArgAction::SetTrue)
                .help("Allow pausing: enter p to pause or resume, an empty line to stop"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the result as JSON"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Do not print prompts"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .short('d')
                .action(ArgAction::SetTrue)
                .help("Show debug output"),
        )
}
