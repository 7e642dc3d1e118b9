//! Shared fakes for unit tests: cloners, an in-memory writer, synthetic gists

use crate::repo::Cloner;
use crate::types::GistRecord;
use async_trait::async_trait;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Cloner that records calls, fills `dest` with a `.git` directory, and can fail chosen URLs
#[derive(Default)]
pub(crate) struct RecordingCloner {
    calls: Mutex<Vec<(String, PathBuf)>>,
    fail_urls: HashSet<String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingCloner {
    /// Fail every clone of `url`
    pub(crate) fn failing_on(mut self, url: impl Into<String>) -> Self {
        self.fail_urls.insert(url.into());
        self
    }

    /// Sleep inside every clone so workers overlap
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every (url, dest) pair seen, in call order
    pub(crate) fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }

    /// Highest number of clones that ran at the same time
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Cloner for RecordingCloner {
    async fn clone_repo(&self, clone_url: &str, dest: &Path) -> crate::Result<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        self.calls
            .lock()
            .unwrap()
            .push((clone_url.to_string(), dest.to_path_buf()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let result = if self.fail_urls.contains(clone_url) {
            Err(crate::Error::ExternalTool(format!(
                "git clone failed (exit status: 128): repository '{}' not found",
                clone_url
            )))
        } else {
            tokio::fs::create_dir(dest.join(".git"))
                .await
                .map_err(crate::Error::from)
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Cloner that always fails with a fixed message
pub(crate) struct FailingCloner {
    message: String,
}

impl FailingCloner {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Cloner for FailingCloner {
    async fn clone_repo(&self, _clone_url: &str, _dest: &Path) -> crate::Result<()> {
        Err(crate::Error::ExternalTool(self.message.clone()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// `Write` sink that can be read back after the writer has been moved away
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// `count` gists with distinct ids, names and clone URLs
pub(crate) fn synthetic_gists(count: usize) -> Vec<GistRecord> {
    (0..count)
        .map(|i| {
            GistRecord::new(
                format!("id{i:03}"),
                format!("gist {i}"),
                format!("https://gist.github.com/id{i:03}.git"),
            )
        })
        .collect()
}

/// Sorted paths of everything below `root`
pub(crate) fn list_entries(root: &Path) -> Vec<PathBuf> {
    let mut entries = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(read_dir) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in read_dir.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path.clone());
            }
            entries.push(path);
        }
    }
    entries.sort();
    entries
}
