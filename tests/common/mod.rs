//! Common test utilities for gist-downloader integration tests

#![allow(dead_code)]

use gist_downloader::config::ListingConfig;
use serde_json::{Value, json};
use std::io::Write;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One gist object shaped like the listing API returns it
pub fn gist_json(id: &str, description: Option<&str>, files: &[&str], clone_url: &str) -> Value {
    let files: serde_json::Map<String, Value> = files
        .iter()
        .map(|name| {
            (
                name.to_string(),
                json!({ "filename": name, "type": "text/plain", "size": 12 }),
            )
        })
        .collect();

    json!({
        "id": id,
        "description": description,
        "public": true,
        "html_url": format!("https://gist.github.com/{id}"),
        "git_pull_url": clone_url,
        "files": files,
    })
}

/// `count` gists with ids `g0000`, `g0001`, ... and matching descriptions
pub fn gist_page(start: usize, count: usize) -> Value {
    let gists: Vec<Value> = (start..start + count)
        .map(|i| {
            let id = format!("g{i:04}");
            let description = format!("gist number {i}");
            let url = format!("https://gist.github.com/{id}.git");
            gist_json(&id, Some(&description), &["main.rs"], &url)
        })
        .collect();
    Value::Array(gists)
}

/// Serve `pages` for `user`, page 1 first, then an empty page
///
/// Each page is expected to be requested exactly once.
pub async fn mount_pages(server: &MockServer, user: &str, pages: &[Value]) {
    for (i, body) in pages.iter().enumerate() {
        Mock::given(method("GET"))
            .and(path(format!("/users/{user}/gists")))
            .and(query_param("page", (i + 1).to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(format!("/users/{user}/gists")))
        .and(query_param("page", (pages.len() + 1).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(server)
        .await;
}

/// Listing settings pointed at the mock server
pub fn listing_config(server: &MockServer) -> ListingConfig {
    ListingConfig {
        api_base_url: server.uri(),
        ..Default::default()
    }
}

/// `Write` sink that can be read back after the writer has been moved away
///
/// Mirrors the crate's `cfg(test)` helper, which integration tests cannot reach.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
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
