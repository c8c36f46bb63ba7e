//! # Lapse
//!
//! A console stopwatch: press ENTER to start, ENTER again to stop.

use log::error;

mod cli;
mod config;
mod error;
mod logging;
mod runner;

fn main() {
    let args = cli::args::build_cli().get_matches();
    let dotenv = config::load_dotenv();
    logging::init(args.get_flag("debug"));
    config::log_dotenv(&dotenv);

    let code = match config::Settings::resolve(&args, |key| std::env::var(key).ok())
        .and_then(|settings| {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            runner::run(&settings, &mut stdin.lock(), &mut stdout.lock())
        }) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err.to_string().to_lowercase());
            -1
        }
    };

    std::process::exit(code)
}
