//! Utility functions for turning gist names into filesystem paths

use std::path::{Path, PathBuf};

/// Longest directory name produced by [`sanitize_name`], in bytes
pub const MAX_NAME_LEN: usize = 255;

/// Name used when sanitizing leaves nothing usable
pub const PLACEHOLDER_NAME: &str = "unnamed";

/// Characters that are unsafe in a path segment on at least one platform
const FORBIDDEN_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turn a gist display name into a single safe path segment
///
/// - Each of `/ \ : * ? " < > |` becomes `-`
/// - Surrounding whitespace is trimmed
/// - An empty result (or `.`/`..`) becomes `"unnamed"`
/// - The result is cut to at most 255 bytes on a character boundary
///
/// # Examples
///
/// ```
/// use gist_downloader::utils::sanitize_name;
///
/// assert_eq!(sanitize_name("  build: release/notes  "), "build- release-notes");
/// assert_eq!(sanitize_name("???"), "---");
/// assert_eq!(sanitize_name("   "), "unnamed");
/// ```
pub fn sanitize_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '-' } else { c })
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return PLACEHOLDER_NAME.to_string();
    }

    truncate_on_char_boundary(trimmed, MAX_NAME_LEN).to_string()
}

/// Longest prefix of `s` that fits in `max_bytes` without splitting a character
fn truncate_on_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Directory a gist named `name` is cloned into, under `base_path`
pub fn gist_path(base_path: &Path, name: &str) -> PathBuf {
    base_path.join(sanitize_name(name))
}

/// Whether anything (file, directory, or dangling symlink) occupies `path`
pub async fn path_occupied(path: &Path) -> bool {
    tokio::fs::symlink_metadata(path).await.is_ok()
}
