use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::catalog::AssetRequest;
use crate::foundation::error::{CardError, CardResult};

/// Source of raw asset bytes.
///
/// Fetches are the only suspension points of a render; the renderer awaits each one before
/// starting the next layer.
pub trait AssetFetcher {
    fn fetch(&self, request: &AssetRequest) -> impl Future<Output = CardResult<Vec<u8>>>;
}

impl<T: AssetFetcher + ?Sized> AssetFetcher for &T {
    fn fetch(&self, request: &AssetRequest) -> impl Future<Output = CardResult<Vec<u8>>> {
        (**self).fetch(request)
    }
}

/// Normalize an asset path: `/` separators, no `.` segments, no `..`, no absolute paths.
pub(crate) fn normalize_rel_path(source: &str) -> CardResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(CardError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(CardError::validation("asset path must be non-empty"));
    }

    let mut parts = Vec::<&str>::new();
    for part in s.split('/') {
        match part {
            "" | "." => {}
            ".." => return Err(CardError::validation("asset paths must not contain '..'")),
            p => parts.push(p),
        }
    }
    if parts.is_empty() {
        return Err(CardError::validation("asset path must contain a file name"));
    }
    Ok(parts.join("/"))
}

/// Reads assets from a directory that mirrors the served asset root.
///
/// Static paths (`assets/anime/...`) and proxied same-origin paths (`/api/images/...`) both map
/// to files under `root`. Absolute `http(s)` URLs are rejected: the core has no network client.
#[derive(Clone, Debug)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `request`.
    pub fn resolve(&self, request: &AssetRequest) -> CardResult<PathBuf> {
        let url = request.url.as_str();
        if url.starts_with("http://") || url.starts_with("https://") {
            return Err(CardError::asset(format!(
                "remote url '{url}' is not served by the filesystem fetcher"
            )));
        }
        let rel = normalize_rel_path(url.trim_start_matches('/'))?;
        Ok(self.root.join(rel))
    }
}

impl AssetFetcher for FsFetcher {
    async fn fetch(&self, request: &AssetRequest) -> CardResult<Vec<u8>> {
        let path = self.resolve(request)?;
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read asset '{}'", path.display()))?;
        Ok(bytes)
    }
}

/// In-memory fetcher keyed by request URL. Records every request it receives, in order.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    assets: HashMap<String, Vec<u8>>,
    log: RefCell<Vec<AssetRequest>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.assets.insert(url.into(), bytes);
    }

    pub fn with(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(url, bytes);
        self
    }

    pub fn remove(&mut self, url: &str) -> Option<Vec<u8>> {
        self.assets.remove(url)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<AssetRequest> {
        self.log.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

impl AssetFetcher for MemoryFetcher {
    async fn fetch(&self, request: &AssetRequest) -> CardResult<Vec<u8>> {
        self.log.borrow_mut().push(request.clone());
        self.assets
            .get(&request.url)
            .cloned()
            .ok_or_else(|| CardError::asset(format!("no asset at '{}'", request.url)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
