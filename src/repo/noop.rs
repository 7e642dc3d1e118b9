//! No-op cloner for runs without a git binary

use super::traits::Cloner;
use async_trait::async_trait;
use std::path::Path;

/// Cloner used when no git executable is available
///
/// Dry-run never reaches the cloner, so a dry-run works on machines without git.
/// Any real clone attempt fails with `Error::NotSupported`.
///
/// # Examples
///
/// ```
/// use gist_downloader::repo::{Cloner, NoOpCloner};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() {
/// let result = NoOpCloner
///     .clone_repo("https://gist.github.com/aa11.git", Path::new("/tmp/aa11"))
///     .await;
/// assert!(result.is_err());
/// # }
/// ```
pub struct NoOpCloner;

#[async_trait]
impl Cloner for NoOpCloner {
    async fn clone_repo(&self, _clone_url: &str, _dest: &Path) -> crate::Result<()> {
        Err(crate::Error::NotSupported(
            "cloning requires the git binary. \
             Install git or pass --git with its location."
                .into(),
        ))
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
