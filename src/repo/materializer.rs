//! Per-gist clone decision: target path, claiming the target, dry-run

use super::traits::Cloner;
use crate::error::MaterializeError;
use crate::utils::{gist_path, path_occupied};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Clones one gist into `<base_path>/<sanitized name>`
///
/// Cheap to clone; every worker holds its own handle to the shared cloner.
/// A target is claimed by creating it as an empty directory before the clone
/// starts, so when several gists map to the same name exactly one of them is
/// cloned and the rest are reported as already existing, whatever the number
/// of workers.
#[derive(Clone)]
pub struct Materializer {
    cloner: Arc<dyn Cloner>,
    dry_run: bool,
    /// Targets a dry run has already handed out (nothing is created on disk)
    planned: Arc<Mutex<HashSet<PathBuf>>>,
}

impl Materializer {
    /// Create a materializer around `cloner`
    ///
    /// With `dry_run` set, the cloner is never called and nothing is written.
    pub fn new(cloner: Arc<dyn Cloner>, dry_run: bool) -> Self {
        Self {
            cloner,
            dry_run,
            planned: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Whether this materializer only simulates clones
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Clone `clone_url` into a directory named after `display_name` under `base_path`
    ///
    /// Returns the target path on success (including a simulated dry-run success).
    ///
    /// # Errors
    ///
    /// - [`MaterializeError::AlreadyExists`] if anything occupies the target path,
    ///   or another gist in this run already claimed it; nothing is created or
    ///   modified in that case
    /// - [`MaterializeError::CloneFailed`] if the parent directory cannot be
    ///   created or the cloner fails; the claimed target is removed again
    pub async fn materialize(
        &self,
        clone_url: &str,
        display_name: &str,
        base_path: &Path,
    ) -> Result<PathBuf, MaterializeError> {
        let target = gist_path(base_path, display_name);

        if path_occupied(&target).await {
            debug!(path = %target.display(), "Target already exists, skipping");
            return Err(MaterializeError::AlreadyExists { path: target });
        }

        if self.dry_run {
            let newly_planned = self
                .planned
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(target.clone());
            if !newly_planned {
                debug!(path = %target.display(), "Target already planned, skipping");
                return Err(MaterializeError::AlreadyExists { path: target });
            }
            return Ok(target);
        }

        self.claim(&target).await?;

        debug!(
            url = clone_url,
            path = %target.display(),
            cloner = self.cloner.name(),
            "Cloning gist"
        );
        if let Err(e) = self.cloner.clone_repo(clone_url, &target).await {
            release(&target).await;
            return Err(MaterializeError::CloneFailed(e.to_string()));
        }

        Ok(target)
    }

    /// Create `target` as an empty directory, failing if it already exists
    async fn claim(&self, target: &Path) -> Result<(), MaterializeError> {
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                MaterializeError::CloneFailed(format!(
                    "failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        match tokio::fs::create_dir(target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %target.display(), "Target claimed by another gist, skipping");
                Err(MaterializeError::AlreadyExists {
                    path: target.to_path_buf(),
                })
            }
            Err(e) => Err(MaterializeError::CloneFailed(format!(
                "failed to create directory {}: {}",
                target.display(),
                e
            ))),
        }
    }
}

/// Remove a claimed target after a failed clone so a later run retries it
async fn release(target: &Path) {
    if let Err(e) = tokio::fs::remove_dir_all(target).await
        && e.kind() != ErrorKind::NotFound
    {
        warn!(
            path = %target.display(),
            error = %e,
            "Could not remove directory of failed clone"
        );
    }
}
