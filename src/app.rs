//! End-to-end run: parse the user URL, list gists, clone them, summarize

use crate::config::{Config, DownloadConfig};
use crate::downloader::GistDownloader;
use crate::error::{Error, Result};
use crate::github::GistSource;
use crate::gist_url::parse_user_url;
use crate::progress::{Summary, Tracker};
use crate::repo::{Cloner, GitCloner, Materializer, NoOpCloner};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

/// How a run ended when no fatal error occurred
#[derive(Debug)]
pub enum RunOutcome {
    /// The user exists but owns no gists; nothing was cloned
    NoGists {
        /// Username taken from the user URL
        username: String,
    },
    /// Every listed gist was processed
    Finished(Summary),
}

/// Run a complete download for `user_url`
///
/// Status lines and the progress display go to `out`. Per-gist failures end up
/// in the returned summary; only setup, URL and listing errors are returned as
/// `Err`.
pub async fn run(
    config: &Config,
    user_url: &str,
    source: &dyn GistSource,
    cloner: Arc<dyn Cloner>,
    mut out: Box<dyn Write + Send>,
) -> Result<RunOutcome> {
    config.validate()?;

    let user = parse_user_url(user_url, &config.listing.gist_host)?;
    writeln!(out, "Fetching gists for user: {}", user.username)?;

    let gists = source.list_gists(&user.username).await?;
    if gists.is_empty() {
        writeln!(out, "No gists found for this user")?;
        return Ok(RunOutcome::NoGists {
            username: user.username,
        });
    }
    writeln!(out, "Found {} gists", gists.len())?;
    out.flush()?;

    let download = &config.download;
    let base_path = download.output_dir.join(&user.username);
    info!(
        username = %user.username,
        gists = gists.len(),
        cloner = cloner.name(),
        output = %base_path.display(),
        "Downloading gists"
    );

    let tracker = Arc::new(Tracker::with_writer(download.dry_run, out));
    let materializer = Materializer::new(cloner, download.dry_run);
    let downloader = GistDownloader::new(materializer, tracker, download.workers)?;

    let summary = downloader.execute(gists, &base_path).await?;
    Ok(RunOutcome::Finished(summary))
}

/// Pick the clone transport for `config`
///
/// An explicit `git_path` wins over PATH lookup. Without git, a dry run falls
/// back to [`NoOpCloner`] (it never clones); a real run cannot proceed.
///
/// # Errors
///
/// Returns [`Error::NotSupported`] if git is not available and this is not a dry run
pub fn build_cloner(config: &DownloadConfig) -> Result<Arc<dyn Cloner>> {
    let git = match &config.git_path {
        Some(path) => Some(GitCloner::new(path.clone())),
        None => GitCloner::from_path(),
    };

    match git {
        Some(git) => {
            info!(git = %git.binary_path().display(), "Using git binary");
            Ok(Arc::new(git.with_timeout(config.clone_timeout)))
        }
        None if config.dry_run => {
            warn!("git not found in PATH, continuing because this is a dry run");
            Ok(Arc::new(NoOpCloner))
        }
        None => Err(Error::NotSupported(
            "git not found in PATH. Install git or pass --git with its location.".to_string(),
        )),
    }
}
