//! Cloner backed by the external git binary

use super::traits::Cloner;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Cloner that runs `git clone --quiet <url> <dest>`
///
/// git never prompts for credentials (`GIT_TERMINAL_PROMPT=0`), so a private
/// or missing gist fails instead of hanging a worker. With a timeout set, a
/// clone that runs too long is killed and its partial checkout removed.
///
/// # Examples
///
/// ```no_run
/// use gist_downloader::repo::{Cloner, GitCloner};
/// use std::path::{Path, PathBuf};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Create with explicit path
/// let git = GitCloner::new(PathBuf::from("/usr/bin/git"));
///
/// // Or auto-discover from PATH, with a five minute limit per clone
/// let git = GitCloner::from_path()
///     .expect("git not found in PATH")
///     .with_timeout(Some(Duration::from_secs(300)));
///
/// git.clone_repo("https://gist.github.com/aa11.git", Path::new("gist/aa11")).await?;
/// # Ok(())
/// # }
/// ```
pub struct GitCloner {
    binary_path: PathBuf,
    timeout: Option<Duration>,
}

impl GitCloner {
    /// Create a git cloner with an explicit binary path and no timeout
    pub fn new(binary_path: PathBuf) -> Self {
        Self {
            binary_path,
            timeout: None,
        }
    }

    /// Attempt to find git in PATH
    ///
    /// Uses the `which` crate to search for the `git` binary in the system PATH.
    pub fn from_path() -> Option<Self> {
        which::which("git").ok().map(Self::new)
    }

    /// Set the per-clone timeout (None = unlimited)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the git executable in use
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }
}

#[async_trait]
impl Cloner for GitCloner {
    async fn clone_repo(&self, clone_url: &str, dest: &Path) -> crate::Result<()> {
        let mut command = Command::new(&self.binary_path);
        command
            .arg("clone")
            .arg("--quiet")
            .arg(clone_url)
            .arg(dest)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, command.output()).await {
                Ok(output) => output,
                Err(_) => {
                    // The child was killed on drop; drop what it left behind
                    if let Err(e) = tokio::fs::remove_dir_all(dest).await
                        && e.kind() != std::io::ErrorKind::NotFound
                    {
                        tracing::warn!(
                            path = %dest.display(),
                            error = %e,
                            "Could not remove partial clone after timeout"
                        );
                    }
                    return Err(crate::Error::ExternalTool(format!(
                        "git clone timed out after {}s",
                        limit.as_secs_f64()
                    )));
                }
            },
            None => command.output().await,
        }
        .map_err(|e| crate::Error::ExternalTool(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(crate::Error::ExternalTool(format!(
                "git clone failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "git"
    }
}
