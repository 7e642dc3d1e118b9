//! The clone transport seam

use async_trait::async_trait;
use std::path::Path;

/// Trait for materializing a remote repository into a local directory
///
/// `dest` already exists as an empty directory claimed for this clone. Any
/// failure is reported as an error; callers never inspect the message to
/// decide what happened.
#[async_trait]
pub trait Cloner: Send + Sync {
    /// Clone `clone_url` into `dest`
    ///
    /// # Errors
    ///
    /// Returns an error if the clone could not be started or did not succeed
    async fn clone_repo(&self, clone_url: &str, dest: &Path) -> crate::Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
