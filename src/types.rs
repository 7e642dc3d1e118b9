//! Core types for gist-downloader

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One gist as the downloader sees it
///
/// Built once by the listing client and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GistRecord {
    /// Gist identifier
    pub id: String,
    /// Display label: description, else first filename, else id. Never empty.
    pub name: String,
    /// git URL the gist can be cloned from
    pub clone_url: String,
}

impl GistRecord {
    /// Create a record, falling back to the id when `name` is blank
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        clone_url: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let name = name.into();
        let name = if name.trim().is_empty() {
            id.clone()
        } else {
            name
        };

        Self {
            id,
            name,
            clone_url: clone_url.into(),
        }
    }
}

impl From<GistResponse> for GistRecord {
    fn from(gist: GistResponse) -> Self {
        let name = gist
            .description
            .filter(|d| !d.trim().is_empty())
            .or_else(|| {
                gist.files
                    .into_values()
                    .map(|f| f.filename)
                    .find(|f| !f.trim().is_empty())
            })
            .unwrap_or_default();

        GistRecord::new(gist.id, name, gist.git_pull_url)
    }
}

/// A gist object as returned by `GET /users/{user}/gists`
///
/// Only the fields the downloader reads are modeled.
#[derive(Clone, Debug, Deserialize)]
pub struct GistResponse {
    /// Gist identifier
    pub id: String,
    /// Free-text description (null or empty for many gists)
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the gist is public
    #[serde(default)]
    pub public: bool,
    /// git URL for cloning
    pub git_pull_url: String,
    /// Files keyed by filename; ordered so "first file" is stable
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
}

/// A file entry inside [`GistResponse::files`]
#[derive(Clone, Debug, Deserialize)]
pub struct GistFile {
    /// File name
    pub filename: String,
}

/// Terminal result of processing one gist
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Cloned (or, in dry-run, would have been cloned)
    Completed,
    /// Target directory already existed; nothing was done
    Skipped {
        /// The occupied target path
        path: PathBuf,
    },
    /// Clone failed
    Failed {
        /// Gist identifier
        id: String,
        /// Human-readable failure reason
        error: String,
    },
}
