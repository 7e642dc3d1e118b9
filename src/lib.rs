//! # gist-downloader
//!
//! Clone every public gist of a GitHub user as a local git repository.
//!
//! A run has three stages:
//! - **Listing** - page through `GET /users/{user}/gists` until an empty page
//! - **Cloning** - a fixed pool of workers drains a shared queue, one `git clone` each
//! - **Summary** - every gist ends up completed, skipped (already on disk) or failed
//!
//! Per-gist failures never abort a run; they are collected in the [`Summary`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use gist_downloader::{Config, GistClient, app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.download.workers = 8;
//!
//!     let source = GistClient::new(&config.listing)?;
//!     let cloner = app::build_cloner(&config.download)?;
//!
//!     let outcome = app::run(
//!         &config,
//!         "https://gist.github.com/alice",
//!         &source,
//!         cloner,
//!         Box::new(std::io::stdout()),
//!     )
//!     .await?;
//!     println!("{:?}", outcome);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// End-to-end run wiring
pub mod app;
/// Configuration types
pub mod config;
/// Parallel download orchestration
pub mod downloader;
/// Error types
pub mod error;
/// User gist URL parsing
pub mod gist_url;
/// Gist listing API client
pub mod github;
/// Progress counters and the final summary
pub mod progress;
/// Cloning a single gist to disk
pub mod repo;
/// Core data types
pub mod types;
/// Utility functions
pub mod utils;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use app::RunOutcome;
pub use config::Config;
pub use downloader::GistDownloader;
pub use error::{Error, FetchError, MaterializeError, Result, UrlError};
pub use github::{GistClient, GistSource};
pub use progress::{Summary, Tracker};
pub use repo::{Cloner, GitCloner, Materializer, NoOpCloner};
pub use types::{GistRecord, Outcome};

/// Wait until the process is asked to stop.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use gist_downloader::wait_for_signal;
///
/// #[tokio::main]
/// async fn main() {
///     tokio::select! {
///         _ = tokio::time::sleep(std::time::Duration::from_secs(60)) => {}
///         _ = wait_for_signal() => println!("stopping early"),
///     }
/// }
/// ```
#[cfg(unix)]
pub async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Registration may fail in restricted environments (containers, tests)
    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM signal"),
                _ = sigint.recv() => tracing::info!("Received SIGINT signal (Ctrl+C)"),
            }
        }
        (Err(e), Ok(mut sigint)) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            sigint.recv().await;
            tracing::info!("Received SIGINT signal (Ctrl+C)");
        }
        (Ok(mut sigterm), Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            sigterm.recv().await;
            tracing::info!("Received SIGTERM signal");
        }
        (Err(e), Err(_)) => {
            tracing::error!(error = %e, "Could not register any signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

/// Wait until the process is asked to stop (Ctrl+C).
#[cfg(not(unix))]
pub async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C signal"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C signal"),
    }
}
