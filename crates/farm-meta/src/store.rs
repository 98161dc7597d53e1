//! Caching metadata store
//!
//! Remote metadata is treated as immutable once fetched: a document found in
//! the cache directory is authoritative and the remote is not contacted.
//! Staleness is the caller's problem (delete the cache directory).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use farm_fs::StructuredStore;

use crate::document::{Document, DocumentLocation};
use crate::transport::Transport;
use crate::Result;

/// Fetches documents through a [`Transport`], memoizing them in memory and
/// persisting them under `cache_dir`.
pub struct MetadataStore<T: Transport> {
    transport: T,
    cache_dir: PathBuf,
    files: StructuredStore,
    memo: HashMap<String, Rc<Document>>,
}

impl<T: Transport> MetadataStore<T> {
    pub fn new(transport: T, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            cache_dir: cache_dir.into(),
            files: StructuredStore::new(),
            memo: HashMap::new(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the document at `url`.
    ///
    /// Lookup order: in-process memo, cache file, remote. A remote fetch is
    /// written back to the cache as YAML before returning.
    pub fn fetch(&mut self, url: &str) -> Result<Rc<Document>> {
        let location = DocumentLocation::parse(url)?;

        if let Some(document) = self.memo.get(url) {
            return Ok(Rc::clone(document));
        }

        let cache_path = self.cache_dir.join(&location.cache_name);
        let document = if cache_path.exists() {
            tracing::debug!("Load {} from cache: {}", url, cache_path.display());
            self.files.load::<Document>(&cache_path)?
        } else {
            tracing::debug!("Load {} from remote", url);
            let payload = self.transport.get(url)?;
            let document = location.decode(&payload)?;
            self.files.save(&cache_path, &document)?;
            tracing::debug!("Saved {} to cache: {}", url, cache_path.display());
            document
        };

        let document = Rc::new(document);
        self.memo.insert(url.to_string(), Rc::clone(&document));
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::StaticTransport;
    use crate::Error;
    use tempfile::TempDir;

    const INDEX_URL: &str = "https://example.org/rosdistro/index-v4.yaml";

    fn store(temp: &TempDir) -> MetadataStore<StaticTransport> {
        let transport = StaticTransport::new().with(INDEX_URL, "distributions: {}\n");
        MetadataStore::new(transport, temp.path().join("cache"))
    }

    #[test]
    fn remote_fetch_populates_cache_file() {
        let temp = TempDir::new().unwrap();
        let mut store = store(&temp);

        let document = store.fetch(INDEX_URL).unwrap();

        assert!(document.get("distributions").is_some());
        assert!(temp.path().join("cache/index-v4.yaml").exists());
    }

    #[test]
    fn repeated_fetch_is_memoized() {
        let temp = TempDir::new().unwrap();
        let mut store = store(&temp);

        store.fetch(INDEX_URL).unwrap();
        store.fetch(INDEX_URL).unwrap();

        assert_eq!(store.transport().requests().len(), 1);
    }

    #[test]
    fn format_error_precedes_any_request() {
        let temp = TempDir::new().unwrap();
        let mut store = store(&temp);

        let err = store.fetch("https://example.org/rosdistro/index.txt").unwrap_err();

        assert!(matches!(err, Error::Format { .. }));
        assert!(store.transport().requests().is_empty());
    }
}
