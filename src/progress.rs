//! Terminal progress feedback while the mirror is contacted or an index is parsed

use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use colored::Colorize;

use crate::analyze::{Outcome, Reporter, Stage};
use crate::arch::Architecture;

/// Delay between two animation frames
pub const ANIMATION_DELAY: Duration = Duration::from_millis(800);

/// Prints a dot every tick on a background thread until stopped
///
/// The thread is stopped and joined when the spinner is dropped, so an early
/// return or `?` in the surrounding code cannot leave it running.
pub struct Spinner {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<usize>>,
}

impl Spinner {
    /// Start animating on stderr
    pub fn start() -> Self {
        Self::start_with(io::stderr(), ANIMATION_DELAY)
    }

    /// Start animating on an arbitrary writer
    pub fn start_with<W: Write + Send + 'static>(mut out: W, delay: Duration) -> Self {
        let (stop, ticks) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut count = 0usize;
            // Any message or a dropped sender ends the animation.
            while let Err(RecvTimeoutError::Timeout) = ticks.recv_timeout(delay) {
                count += 1;
                let _ = write!(out, ".");
                let _ = out.flush();
            }
            count
        });

        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Stop the animation, returning how many frames were drawn
    pub fn stop(mut self) -> usize {
        self.shutdown()
    }

    fn shutdown(&mut self) -> usize {
        drop(self.stop.take());
        self.handle
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or(0)
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Status lines on stderr, optionally animated
pub struct TerminalReporter {
    quiet: bool,
    animate: bool,
}

impl TerminalReporter {
    pub fn new(quiet: bool, animate: bool) -> Self {
        Self { quiet, animate }
    }
}

impl Reporter for TerminalReporter {
    type Guard = Option<Spinner>;

    fn begin(&self, stage: Stage, arch: Architecture) -> Self::Guard {
        if self.quiet {
            return None;
        }

        let arch = arch.as_str();
        let message = match stage {
            Stage::CheckCache => format!(
                "{}{}{}",
                "Checking cache for up-to-date ".green(),
                arch,
                " statistics".green()
            ),
            Stage::Download => format!(
                "{}{}{}",
                "Downloading ".green(),
                arch,
                " contents index".green()
            ),
            Stage::Analyze => "Analyzing file".green().to_string(),
        };
        eprint!("{message}");
        let _ = io::stderr().flush();

        self.animate.then(Spinner::start)
    }

    fn finish(&self, guard: Self::Guard, outcome: Outcome) {
        if let Some(spinner) = guard {
            spinner.stop();
        }
        if self.quiet {
            return;
        }

        let label = match outcome {
            Outcome::Found => "Found".green(),
            Outcome::NotFound => "Not found".yellow(),
            Outcome::Success => "Success".green(),
            Outcome::Failed => "Failed".red(),
            Outcome::Complete => "Complete".green(),
        };
        eprintln!(" {label}");
    }
}
