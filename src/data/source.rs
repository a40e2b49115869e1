//! Document sources for manifests and descriptor files.

use std::future::Future;

use crate::error::Result;
#[cfg(any(target_arch = "wasm32", test))]
use crate::error::ViewerError;

/// A source of JSON documents addressed by slash-separated paths.
///
/// Futures returned here are polled on a single thread; implementations
/// don't need to be `Send`.
pub trait DataSource {
    /// Fetch a document as text.
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String>>;
}

/// Join a directory and a file name with a single `/`.
///
/// An empty directory yields the file name unchanged.
pub fn join_path(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    let file = file.trim_start_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", dir, file)
    }
}

/// Reads documents from a root directory on the local filesystem.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FsSource {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FsSource {
    /// Create a source resolving paths against `root`.
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a document path to a filesystem path.
    pub fn resolve(&self, path: &str) -> std::path::PathBuf {
        self.root.join(path)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl DataSource for FsSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let full = self.resolve(path);
        std::fs::read_to_string(&full)
            .map_err(|e| crate::error::ViewerError::io(full.display().to_string(), e))
    }
}

/// Fetches documents over HTTP with the browser's Fetch API.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct FetchSource {
    bypass_cache: bool,
}

#[cfg(target_arch = "wasm32")]
impl FetchSource {
    /// Create a source that uses the browser's normal HTTP caching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source that always asks the server for the latest content.
    pub fn uncached() -> Self {
        Self { bypass_cache: true }
    }
}

#[cfg(target_arch = "wasm32")]
impl DataSource for FetchSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestCache, RequestInit, Response};

        let window = web_sys::window().ok_or_else(|| ViewerError::fetch("No window"))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        if self.bypass_cache {
            opts.set_cache(RequestCache::NoStore);
        }
        let request = Request::new_with_str_and_init(path, &opts)
            .map_err(|e| ViewerError::fetch(format!("bad request for {}: {:?}", path, e)))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ViewerError::fetch(format!("{}: {:?}", path, e)))?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ViewerError::fetch("Response cast failed"))?;
        if !resp.ok() {
            return Err(ViewerError::Http {
                url: path.to_string(),
                status: resp.status(),
            });
        }

        let text = JsFuture::from(resp.text().map_err(|e| ViewerError::fetch(format!("{:?}", e)))?)
            .await
            .map_err(|e| ViewerError::fetch(format!("text: {:?}", e)))?;
        text.as_string()
            .ok_or_else(|| ViewerError::fetch("Response body is not a string"))
    }
}

/// In-memory documents that count how often they are fetched.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemorySource {
    files: std::cell::RefCell<std::collections::HashMap<String, String>>,
    fetches: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl MemorySource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_file(self, path: &str, contents: &str) -> Self {
        self.set_file(path, contents);
        self
    }

    pub(crate) fn set_file(&self, path: &str, contents: &str) {
        self.files
            .borrow_mut()
            .insert(path.to_string(), contents.to_string());
    }

    /// Number of fetches of `path` so far.
    pub(crate) fn fetch_count(&self, path: &str) -> usize {
        self.fetches.borrow().iter().filter(|p| *p == path).count()
    }

    pub(crate) fn total_fetches(&self) -> usize {
        self.fetches.borrow().len()
    }
}

#[cfg(test)]
impl DataSource for MemorySource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        self.fetches.borrow_mut().push(path.to_string());
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| ViewerError::Http {
                url: path.to_string(),
                status: 404,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("data", "images_index.json"), "data/images_index.json");
        assert_eq!(join_path("data/", "/a.json"), "data/a.json");
        assert_eq!(join_path("", "a.json"), "a.json");
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_fs_source_reads_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/a.json"), "[\"x\"]").unwrap();

        let source = FsSource::new(dir.path());
        let text = pollster::block_on(source.fetch_text("data/a.json")).unwrap();
        assert_eq!(text, "[\"x\"]");

        let err = pollster::block_on(source.fetch_text("data/missing.json")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_memory_source_counts_fetches() {
        let source = MemorySource::new().with_file("a.json", "[]");
        pollster::block_on(source.fetch_text("a.json")).unwrap();
        assert!(pollster::block_on(source.fetch_text("b.json")).is_err());
        assert_eq!(source.fetch_count("a.json"), 1);
        assert_eq!(source.total_fetches(), 2);
    }
}
