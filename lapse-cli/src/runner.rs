use std::io::{BufRead, Write};

use lapse_lib::{Clock, MonotonicClock, PausableTimer, TimeUnit, Timer};
use log::{info, warn};
use serde::Serialize;

use crate::config::Settings;
use crate::error::CliError;

/// Outcome of one measured session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub unit: TimeUnit,
    pub elapsed: u128,
    pub pausable: bool,
}

/// Block until a line (or EOF) arrives. Returns the trimmed line.
fn wait_for_line<R: BufRead, W: Write>(
    input: &mut R,
    prompt: &mut W,
    text: &str,
    quiet: bool,
) -> Result<String, CliError> {
    if !quiet {
        write!(prompt, "{}", text)?;
        prompt.flush()?;
    }
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Run one session on the system clock: wait, start, wait, stop.
pub fn run_session<R: BufRead, W: Write>(
    settings: &Settings,
    input: &mut R,
    prompt: &mut W,
) -> Result<Report, CliError> {
    run_session_with_clock(settings, MonotonicClock, input, prompt)
}

pub fn run_session_with_clock<C: Clock, R: BufRead, W: Write>(
    settings: &Settings,
    clock: C,
    input: &mut R,
    prompt: &mut W,
) -> Result<Report, CliError> {
    let unit = settings.unit.unwrap_or_default();
    let quiet = settings.quiet;

    wait_for_line(input, prompt, "Press ENTER to start...", quiet)?;

    let elapsed = if settings.pausable {
        let mut timer = PausableTimer::with_clock(clock);
        timer.start();
        loop {
            let text = if timer.is_paused() {
                "Paused. Enter p to resume, ENTER to stop..."
            } else {
                "Running. Enter p to pause, ENTER to stop..."
            };
            match wait_for_line(input, prompt, text, quiet)?.as_str() {
                "" => break,
                "p" | "P" if timer.is_paused() => timer.unpause(),
                "p" | "P" => timer.pause(),
                other => warn!("unrecognized input '{}'", other),
            }
        }
        timer.stop();
        timer.get_time(unit)
    } else {
        let mut timer = Timer::with_clock(clock);
        timer.start();
        wait_for_line(input, prompt, "Press ENTER to stop...", quiet)?;
        timer.stop();
        timer.get_time(unit)
    };

    info!("measured {} {}", elapsed, unit);
    Ok(Report {
        unit,
        elapsed,
        pausable: settings.pausable,
    })
}

/// Render a report the way the settings ask for.
pub fn render(settings: &Settings, report: &Report) -> Result<String, CliError> {
    if settings.json {
        return Ok(serde_json::to_string(report)?);
    }
    let text = match settings.unit {
        Some(unit) => format!("Elapsed time: {} {}", report.elapsed, unit),
        None => format!("Elapsed time: {:.3} s", report.elapsed as f64 / 1000.0),
    };
    Ok(text)
}

pub fn run<R: BufRead, W: Write>(
    settings: &Settings,
    input: &mut R,
    output: &mut W,
) -> Result<i32, CliError> {
    let report = run_session(settings, input, output)?;
    if !settings.quiet {
        writeln!(output)?;
    }
    writeln!(output, "{}", render(settings, &report)?)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    /// Answers each `now()` with the next offset from `anchor`.
    struct ScriptedClock {
        anchor: Instant,
        offsets: RefCell<VecDeque<u64>>,
    }

    impl ScriptedClock {
        fn new(offsets_ms: &[u64]) -> Self {
            Self {
                anchor: Instant::now(),
                offsets: RefCell::new(offsets_ms.iter().copied().collect()),
            }
        }
    }

    impl Clock for ScriptedClock {
        fn now(&self) -> Instant {
            let offset = self
                .offsets
                .borrow_mut()
                .pop_front()
                .expect("clock read more often than scripted");
            self.anchor + Duration::from_millis(offset)
        }
    }

    fn settings() -> Settings {
        Settings {
            unit: None,
            pausable: false,
            json: false,
            quiet: false,
        }
    }

    #[test]
    fn prompts_then_reports_seconds() {
        let mut input = Cursor::new("\n\n");
        let mut output = Vec::new();

        let code = run(&settings(), &mut input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(code, 0);
        assert!(text.starts_with("Press ENTER to start..."));
        assert!(text.contains("Press ENTER to stop..."));
        assert!(text.contains("Elapsed time: 0.0"));
        assert!(text.trim_end().ends_with(" s"));
    }

    #[test]
    fn eof_behaves_like_enter() {
        let mut input = Cursor::new("");
        let mut prompt = Vec::new();
        let report = run_session(&settings(), &mut input, &mut prompt).unwrap();
        assert_eq!(report.unit, TimeUnit::Milliseconds);
        assert!(!report.pausable);
    }

    #[test]
    fn pausable_session_toggles_on_p() {
        let settings = Settings {
            pausable: true,
            ..settings()
        };
        let mut input = Cursor::new("\np\np\nx\n\n");
        let mut prompt = Vec::new();

        let report = run_session(&settings, &mut input, &mut prompt).unwrap();
        let text = String::from_utf8(prompt).unwrap();

        assert!(report.pausable);
        assert!(text.contains("Paused. Enter p to resume"));
        assert_eq!(text.matches("Running. Enter p to pause").count(), 3);
    }

    #[test]
    fn pausable_session_leaves_out_closed_pauses() {
        let settings = Settings {
            pausable: true,
            quiet: true,
            ..settings()
        };
        // start, pause, unpause, stop
        let clock = ScriptedClock::new(&[0, 30, 430, 460]);
        let mut input = Cursor::new("\np\np\n\n");
        let mut prompt = Vec::new();

        let report = run_session_with_clock(&settings, &clock, &mut input, &mut prompt).unwrap();
        assert_eq!(report.elapsed, 60);
        assert!(clock.offsets.borrow().is_empty());
    }

    #[test]
    fn pausable_session_stopped_while_paused_counts_the_pause() {
        let settings = Settings {
            pausable: true,
            quiet: true,
            ..settings()
        };
        // start, pause, stop
        let clock = ScriptedClock::new(&[0, 30, 430]);
        let mut input = Cursor::new("\np\n\n");
        let mut prompt = Vec::new();

        let report = run_session_with_clock(&settings, &clock, &mut input, &mut prompt).unwrap();
        assert_eq!(report.elapsed, 430);
    }

    #[test]
    fn plain_session_reports_in_the_chosen_unit() {
        let settings = Settings {
            unit: Some(TimeUnit::Seconds),
            quiet: true,
            ..settings()
        };
        let clock = ScriptedClock::new(&[0, 1_500]);
        let mut input = Cursor::new("\n\n");
        let mut prompt = Vec::new();

        let report = run_session_with_clock(&settings, &clock, &mut input, &mut prompt).unwrap();
        assert_eq!(report.unit, TimeUnit::Seconds);
        assert_eq!(report.elapsed, 1);
    }

    #[test]
    fn quiet_suppresses_prompts() {
        let settings = Settings {
            unit: Some(TimeUnit::Nanoseconds),
            quiet: true,
            ..settings()
        };
        let mut input = Cursor::new("\n\n");
        let mut output = Vec::new();

        run(&settings, &mut input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("Elapsed time: "));
        assert!(text.trim_end().ends_with(" ns"));
    }

    #[test]
    fn renders_units_and_json() {
        let report = Report {
            unit: TimeUnit::Milliseconds,
            elapsed: 1_500,
            pausable: false,
        };
        assert_eq!(render(&settings(), &report).unwrap(), "Elapsed time: 1.500 s");

        let with_unit = Settings {
            unit: Some(TimeUnit::Milliseconds),
            ..settings()
        };
        assert_eq!(render(&with_unit, &report).unwrap(), "Elapsed time: 1500 ms");

        let json = Settings {
            json: true,
            ..settings()
        };
        let value: serde_json::Value =
            serde_json::from_str(&render(&json, &report).unwrap()).unwrap();
        assert_eq!(value["unit"], "milliseconds");
        assert_eq!(value["elapsed"], 1_500);
        assert_eq!(value["pausable"], false);
    }
}
