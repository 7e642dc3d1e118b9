//! Progress tracking for a download run
//!
//! A [`Tracker`] is shared by every worker. All counters live behind a single
//! mutex and are only changed through the `increment_*` methods, so concurrent
//! workers can never lose an update. Rendering happens under the same lock,
//! which keeps the live bar from interleaving.
//!
//! Lifecycle: `set_total` → any number of increments → `finalize`.

use crate::types::Outcome;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Width of the live progress bar in cells
pub const BAR_WIDTH: usize = 40;

/// Render the live progress line for the given counts
///
/// Returns `None` while `total` is zero, so nothing is drawn before the total is known.
///
/// # Examples
///
/// ```
/// use gist_downloader::progress::render_bar;
///
/// let line = render_bar(5, 10, 1, 2).unwrap();
/// assert!(line.ends_with("50% | Done: 5/10 | Failed: 1 | Skipped: 2"));
/// assert!(render_bar(0, 0, 0, 0).is_none());
/// ```
pub fn render_bar(done: usize, total: usize, failed: usize, skipped: usize) -> Option<String> {
    if total == 0 {
        return None;
    }

    let done_clamped = done.min(total);
    let percent = done_clamped * 100 / total;
    let filled = BAR_WIDTH * done_clamped / total;
    let bar = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);

    Some(format!(
        "[{}] {}% | Done: {}/{} | Failed: {} | Skipped: {}",
        bar, percent, done, total, failed, skipped
    ))
}

/// Counter values at one point in time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    /// Number of gists in the run
    pub total: usize,
    /// Gists cloned (or simulated in dry-run)
    pub completed: usize,
    /// Gists whose clone failed
    pub failed: usize,
    /// Gists skipped because their directory already existed
    pub skipped: usize,
}

impl Counts {
    /// Gists that reached a terminal outcome
    pub fn done(&self) -> usize {
        self.completed + self.failed + self.skipped
    }
}

/// Final result of a run, produced once by [`Tracker::finalize`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Final counter values
    pub counts: Counts,
    /// Time from `set_total` to `finalize`, rounded to milliseconds
    pub elapsed: Duration,
    /// Failure message per gist id, ordered by id
    pub failures: BTreeMap<String, String>,
}

impl Summary {
    /// Whether every gist in the run produced exactly one outcome
    pub fn is_fully_accounted(&self) -> bool {
        self.counts.done() == self.counts.total
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Completed in {:?}", self.elapsed)?;
        writeln!(
            f,
            "Total: {} | Success: {} | Failed: {} | Skipped: {}",
            self.counts.total, self.counts.completed, self.counts.failed, self.counts.skipped
        )?;

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed gists:")?;
            for (id, error) in &self.failures {
                writeln!(f, "  {}: {}", id, error)?;
            }
        }
        Ok(())
    }
}

/// Where the tracker is in its lifecycle
#[derive(Debug)]
enum Phase {
    Uninitialized,
    Active { started: Instant },
    Finalized { elapsed: Duration },
}

/// Everything guarded by the tracker's lock
struct TrackerState {
    phase: Phase,
    counts: Counts,
    failures: BTreeMap<String, String>,
    dry_run: bool,
    /// A progress line was drawn without a trailing newline
    line_open: bool,
    out: Box<dyn Write + Send>,
}

impl TrackerState {
    fn render_progress(&mut self) {
        let c = self.counts;
        if let Some(line) = render_bar(c.done(), c.total, c.failed, c.skipped) {
            // Cosmetic output, write errors are ignored
            write!(self.out, "\r{}", line).ok();
            self.out.flush().ok();
            self.line_open = true;
        }
    }

    fn check_active(&self, operation: &str) {
        if !matches!(self.phase, Phase::Active { .. }) {
            warn!(operation, phase = ?self.phase, "Progress update outside an active run");
        }
    }
}

/// Thread-safe progress counters with live and final rendering
pub struct Tracker {
    state: Mutex<TrackerState>,
}

impl Tracker {
    /// Create a tracker that renders to standard output
    pub fn new(dry_run: bool) -> Self {
        Self::with_writer(dry_run, std::io::stdout())
    }

    /// Create a tracker that renders to `writer`
    pub fn with_writer(dry_run: bool, writer: impl Write + Send + 'static) -> Self {
        Self {
            state: Mutex::new(TrackerState {
                phase: Phase::Uninitialized,
                counts: Counts::default(),
                failures: BTreeMap::new(),
                dry_run,
                line_open: false,
                out: Box::new(writer),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        // Counters stay consistent even if a holder panicked: each update is a single step
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the number of gists in the run, start the clock, and print the header
    ///
    /// Only the first call has any effect.
    pub fn set_total(&self, total: usize) {
        let mut state = self.lock();
        if !matches!(state.phase, Phase::Uninitialized) {
            warn!(total, phase = ?state.phase, "Ignoring repeated set_total");
            return;
        }

        state.counts.total = total;
        state.phase = Phase::Active {
            started: Instant::now(),
        };

        writeln!(state.out, "Downloading {} gists...", total).ok();
        if state.dry_run {
            writeln!(state.out, "⚠️  DRY RUN MODE: No files will be downloaded").ok();
            writeln!(state.out).ok();
        }
        state.out.flush().ok();
    }

    /// Print a full status line without breaking the live progress line
    ///
    /// An open progress line is ended first; the bar is redrawn below the
    /// message on the next update.
    pub fn note(&self, message: &str) {
        let mut state = self.lock();
        if state.line_open {
            writeln!(state.out).ok();
            state.line_open = false;
        }
        writeln!(state.out, "{}", message).ok();
        state.out.flush().ok();
    }

    /// A worker picked up a gist; refreshes the live display only
    pub fn increment_pending(&self) {
        self.lock().render_progress();
    }

    /// Count one gist as cloned
    pub fn increment_completed(&self) {
        let mut state = self.lock();
        state.check_active("completed");
        state.counts.completed += 1;
        state.render_progress();
    }

    /// Count one gist as skipped
    pub fn increment_skipped(&self) {
        let mut state = self.lock();
        state.check_active("skipped");
        state.counts.skipped += 1;
        state.render_progress();
    }

    /// Count one gist as failed and remember why
    pub fn increment_failed(&self, id: &str, error: &str) {
        let mut state = self.lock();
        state.check_active("failed");
        state.counts.failed += 1;
        state.failures.insert(id.to_string(), error.to_string());
        state.render_progress();
    }

    /// Apply an [`Outcome`] through the matching increment
    pub fn record(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Completed => self.increment_completed(),
            Outcome::Skipped { .. } => self.increment_skipped(),
            Outcome::Failed { id, error } => self.increment_failed(id, error),
        }
    }

    /// Current counter values
    pub fn counts(&self) -> Counts {
        self.lock().counts
    }

    /// Stop the clock, print the summary, and return it
    ///
    /// Meant to be called once, after every worker has finished. A repeated call
    /// returns the same counts without printing again.
    pub fn finalize(&self) -> Summary {
        let mut state = self.lock();

        let elapsed = match state.phase {
            Phase::Finalized { elapsed } => {
                warn!("Tracker finalized more than once");
                return Summary {
                    counts: state.counts,
                    elapsed,
                    failures: state.failures.clone(),
                };
            }
            Phase::Active { started } => round_to_millis(started.elapsed()),
            Phase::Uninitialized => Duration::ZERO,
        };
        state.phase = Phase::Finalized { elapsed };

        let summary = Summary {
            counts: state.counts,
            elapsed,
            failures: state.failures.clone(),
        };

        debug!(
            total = summary.counts.total,
            completed = summary.counts.completed,
            failed = summary.counts.failed,
            skipped = summary.counts.skipped,
            elapsed_ms = elapsed.as_millis() as u64,
            "Run finalized"
        );

        writeln!(state.out).ok();
        write!(state.out, "{}", summary).ok();
        state.out.flush().ok();

        summary
    }
}

fn round_to_millis(duration: Duration) -> Duration {
    Duration::from_millis(duration.as_millis().min(u64::MAX as u128) as u64)
}
