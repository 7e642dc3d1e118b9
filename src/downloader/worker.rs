//! Worker loop: pop a gist, clone it, report one outcome, repeat until the queue is empty.

use super::GistQueue;
use crate::error::MaterializeError;
use crate::progress::Tracker;
use crate::repo::Materializer;
use crate::types::{GistRecord, Outcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Drain `queue`, returning how many gists this worker processed
pub(super) async fn run_worker(
    worker_id: usize,
    queue: GistQueue,
    materializer: Materializer,
    tracker: Arc<Tracker>,
    base_path: Arc<PathBuf>,
) -> usize {
    let mut processed = 0;

    loop {
        // Guard dropped before the clone starts so other workers keep popping
        let next = queue.lock().await.pop_front();
        let Some(gist) = next else {
            break;
        };

        tracker.increment_pending();
        let outcome = process_gist(&materializer, &tracker, &gist, &base_path).await;
        tracker.record(&outcome);
        processed += 1;
    }

    debug!(worker_id, processed, "Worker finished");
    processed
}

/// Clone one gist and classify the result
pub(super) async fn process_gist(
    materializer: &Materializer,
    tracker: &Tracker,
    gist: &GistRecord,
    base_path: &Path,
) -> Outcome {
    match materializer
        .materialize(&gist.clone_url, &gist.name, base_path)
        .await
    {
        Ok(path) if materializer.is_dry_run() => {
            tracker.note(&format!(
                "[DRY-RUN] Would clone: {} -> {}",
                gist.clone_url,
                path.display()
            ));
            Outcome::Completed
        }
        Ok(path) => {
            debug!(gist_id = %gist.id, path = %path.display(), "Gist cloned");
            Outcome::Completed
        }
        Err(MaterializeError::AlreadyExists { path }) => {
            debug!(gist_id = %gist.id, path = %path.display(), "Gist skipped");
            Outcome::Skipped { path }
        }
        Err(e) => {
            debug!(gist_id = %gist.id, error = %e, "Gist failed");
            Outcome::Failed {
                id: gist.id.clone(),
                error: e.to_string(),
            }
        }
    }
}
