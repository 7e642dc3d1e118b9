//! Gist listing: the [`GistSource`] seam and its GitHub API implementation

mod client;

pub use client::GistClient;

use crate::error::FetchError;
use crate::types::GistRecord;
use async_trait::async_trait;

/// Anything that can list a user's gists
///
/// Implementations exhaust pagination themselves and return either the full
/// listing or an error; a partial listing is never returned.
#[async_trait]
pub trait GistSource: Send + Sync {
    /// List every gist owned by `username`, in API order
    async fn list_gists(&self, username: &str) -> Result<Vec<GistRecord>, FetchError>;
}
