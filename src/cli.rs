//! CLI argument structure using clap

use clap::Parser;
use gist_downloader::{Config, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "gist-downloader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// User gist URL, e.g. https://gist.github.com/alice
    #[arg(value_name = "USER_URL")]
    pub url: Option<String>,

    /// JSON config file; flags given on the command line override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// GitHub token for authenticated listing
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output directory; clones land in <OUTPUT>/<username>/ [default: ./gist]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show what would be cloned without cloning anything
    #[arg(long)]
    pub dry_run: bool,

    /// Number of parallel clones [default: 5]
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Give up on a single clone after this many seconds
    #[arg(long, value_name = "SECS")]
    pub clone_timeout: Option<u64>,

    /// Path to the git executable (default: found on PATH)
    #[arg(long, value_name = "PATH")]
    pub git: Option<PathBuf>,
}

impl Cli {
    /// Build the run configuration: config file (or defaults), then flags
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if self.token.is_some() {
            config.listing.token = self.token.clone();
        }
        if let Some(output) = &self.output {
            config.download.output_dir = output.clone();
        }
        if let Some(workers) = self.workers {
            config.download.workers = workers;
        }
        if self.dry_run {
            config.download.dry_run = true;
        }
        if let Some(git) = &self.git {
            config.download.git_path = Some(git.clone());
        }
        if let Some(secs) = self.clone_timeout {
            config.download.clone_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
