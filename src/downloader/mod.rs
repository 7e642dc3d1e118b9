//! Download orchestration: a fixed pool of workers draining one shared queue.
//!
//! - [`GistDownloader`] owns the pool and the queue
//! - [`worker`] holds the per-worker loop and outcome classification
//!
//! Every queued gist is popped by exactly one worker and reported to the
//! [`Tracker`] exactly once, so the final counts always add up to the number
//! of gists, whatever the completion order.

mod worker;


use crate::error::{Error, Result};
use crate::progress::{Summary, Tracker};
use crate::repo::Materializer;
use crate::types::GistRecord;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Work queue shared by all workers
///
/// Filled completely before any worker starts; afterwards only popped.
pub(crate) type GistQueue = Arc<tokio::sync::Mutex<VecDeque<GistRecord>>>;

/// Clones a list of gists with a bounded number of parallel workers
#[derive(Clone)]
pub struct GistDownloader {
    /// Per-gist clone logic (shared by every worker)
    materializer: Materializer,
    /// Progress counters and rendering (shared by every worker)
    tracker: Arc<Tracker>,
    /// Maximum number of clones in flight
    workers: usize,
}

impl GistDownloader {
    /// Create a downloader running at most `workers` clones at a time
    ///
    /// # Errors
    ///
    /// Returns a config error if `workers` is zero
    pub fn new(materializer: Materializer, tracker: Arc<Tracker>, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::config("workers", "workers must be at least 1"));
        }

        Ok(Self {
            materializer,
            tracker,
            workers,
        })
    }

    /// The tracker this downloader reports to
    pub fn tracker(&self) -> &Arc<Tracker> {
        &self.tracker
    }

    /// Clone every gist into `base_path` and return the run summary
    ///
    /// 1. Announces the total to the tracker
    /// 2. Loads every gist into the shared queue
    /// 3. Spawns `min(workers, gists.len())` workers and waits for all of them
    /// 4. Finalizes the tracker exactly once
    ///
    /// Individual clone failures and skips do not make this fail; they only show
    /// up in the summary. An empty list returns an empty summary without touching
    /// the tracker.
    ///
    /// # Errors
    ///
    /// Returns a config error if `base_path` exists and is not a directory
    pub async fn execute(&self, gists: Vec<GistRecord>, base_path: &Path) -> Result<Summary> {
        if gists.is_empty() {
            debug!("No gists to download");
            return Ok(Summary::default());
        }

        check_base_path(base_path).await?;

        let total = gists.len();
        self.tracker.set_total(total);

        let queue: GistQueue = Arc::new(tokio::sync::Mutex::new(VecDeque::from(gists)));
        let base_path: Arc<PathBuf> = Arc::new(base_path.to_path_buf());
        let worker_count = self.workers.min(total);

        info!(
            total,
            workers = worker_count,
            dry_run = self.materializer.is_dry_run(),
            base_path = %base_path.display(),
            "Starting gist download"
        );

        let mut pool = JoinSet::new();
        for worker_id in 0..worker_count {
            pool.spawn(worker::run_worker(
                worker_id,
                Arc::clone(&queue),
                self.materializer.clone(),
                Arc::clone(&self.tracker),
                Arc::clone(&base_path),
            ));
        }

        let mut processed = 0;
        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok(count) => processed += count,
                Err(e) => error!(error = %e, "Download worker terminated abnormally"),
            }
        }
        debug!(processed, total, "All workers finished");

        Ok(self.tracker.finalize())
    }
}

/// Reject an output location that exists but cannot hold clone directories
async fn check_base_path(base_path: &Path) -> Result<()> {
    match tokio::fs::metadata(base_path).await {
        Ok(meta) if !meta.is_dir() => Err(Error::config(
            "output_dir",
            format!("{} exists and is not a directory", base_path.display()),
        )),
        _ => Ok(()),
    }
}
