//! Repository materialization: turning one gist into one local clone
//!
//! The [`Materializer`] decides *whether* and *where* a gist is cloned; the
//! actual clone goes through the [`Cloner`] trait so the transport can be
//! swapped:
//!
//! - [`GitCloner`]: runs the external `git` binary
//! - [`NoOpCloner`]: stand-in when git is unavailable (dry-run only)
//!
//! ## Usage
//!
//! ```no_run
//! use gist_downloader::repo::{GitCloner, Materializer};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let git = GitCloner::from_path().ok_or("git not found in PATH")?;
//!     let materializer = Materializer::new(Arc::new(git), false);
//!
//!     let path = materializer
//!         .materialize(
//!             "https://gist.github.com/aa11.git",
//!             "My dotfiles",
//!             Path::new("gist/alice"),
//!         )
//!         .await?;
//!     println!("cloned into {}", path.display());
//!     Ok(())
//! }
//! ```

mod git;
mod materializer;
mod noop;
mod traits;

pub use git::GitCloner;
pub use materializer::Materializer;
pub use noop::NoOpCloner;
pub use traits::Cloner;
