//! Configuration types for gist-downloader

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest page size the gist listing API accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Gist listing settings (API location, credentials, paging)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Base URL of the listing API (default: "https://api.github.com")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Host a user URL must point at (default: "gist.github.com")
    #[serde(default = "default_gist_host")]
    pub gist_host: String,

    /// Bearer token passed through to the API (None = anonymous)
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Gists requested per page (default: 100, the API maximum)
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Timeout for each listing request (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// User-Agent header sent with every request (default: "gist-downloader")
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            gist_host: default_gist_host(),
            token: None,
            per_page: default_per_page(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Clone behavior settings (destination, parallelism, git invocation)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Output directory; clones land in `<output_dir>/<username>/` (default: "./gist")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Number of parallel clone workers (default: 5)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Print what would be cloned without touching disk or network
    #[serde(default)]
    pub dry_run: bool,

    /// Path to the git executable (auto-detected from PATH if None)
    #[serde(default)]
    pub git_path: Option<PathBuf>,

    /// Per-clone timeout (None = wait as long as git takes)
    #[serde(default, with = "optional_duration_serde")]
    pub clone_timeout: Option<Duration>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            workers: default_workers(),
            dry_run: false,
            git_path: None,
            clone_timeout: None,
        }
    }
}

/// Main configuration for a gist download run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listing API settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Clone settings
    #[serde(default)]
    pub download: DownloadConfig,
}

impl Config {
    /// Load a configuration from a JSON file
    ///
    /// Missing keys take their defaults, so a file only needs the settings it
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a config error if it
    /// is not valid JSON for this structure
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::config(
                "config",
                format!("invalid config file {}: {}", path.display(), e),
            )
        })
    }

    /// Check that every value is usable before any work starts
    pub fn validate(&self) -> Result<()> {
        if self.download.workers == 0 {
            return Err(Error::config("workers", "workers must be at least 1"));
        }

        if self.listing.per_page == 0 || self.listing.per_page > MAX_PER_PAGE {
            return Err(Error::config(
                "per_page",
                format!("per_page must be between 1 and {MAX_PER_PAGE}"),
            ));
        }

        if self.listing.gist_host.trim().is_empty() {
            return Err(Error::config("gist_host", "gist_host must not be empty"));
        }

        url::Url::parse(&self.listing.api_base_url).map_err(|e| {
            Error::config(
                "api_base_url",
                format!("invalid API base URL '{}': {}", self.listing.api_base_url, e),
            )
        })?;

        if self.download.clone_timeout == Some(Duration::ZERO) {
            return Err(Error::config(
                "clone_timeout",
                "clone_timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}

// Default value functions
fn default_api_base_url() -> String {
    "https://api.github.com".into()
}

fn default_gist_host() -> String {
    "gist.github.com".into()
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    "gist-downloader".into()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./gist")
}

fn default_workers() -> usize {
    5
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
