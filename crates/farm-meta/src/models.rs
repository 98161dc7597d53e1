//! Typed views over the distribution metadata documents
//!
//! Only the fields the planner reads are modelled; everything else in the
//! upstream YAML is ignored.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::{Error, Result};

/// Deserialize a typed view from a fetched document.
pub fn typed<T: serde::de::DeserializeOwned>(name: &str, document: &Document) -> Result<T> {
    T::deserialize(document).map_err(|e| Error::MalformedDocument {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// The global index: which documents make up each distribution.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DistributionIndex {
    #[serde(default)]
    pub distributions: BTreeMap<String, IndexEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IndexEntry {
    /// Manifest paths, relative to the metadata base URL.
    #[serde(default)]
    pub distribution: Vec<String>,
    /// Absolute URL of the distribution cache.
    #[serde(default)]
    pub distribution_cache: Option<String>,
}

/// One distribution manifest: the known source repositories.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DistributionFile {
    /// Kept in document order; the first repository releasing a package wins.
    #[serde(default)]
    pub repositories: IndexMap<String, RepositoryEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RepositoryEntry {
    #[serde(default)]
    pub release: Option<ReleaseSection>,
    #[serde(default)]
    pub source: Option<SourceSection>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReleaseSection {
    #[serde(default)]
    pub packages: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceSection {
    pub url: String,
    /// Branch or tag to check out.
    #[serde(default)]
    pub version: Option<String>,
}

/// A repository located for a package.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepositoryRef<'a> {
    pub name: &'a str,
    pub source: Option<&'a SourceSection>,
}

impl RepositoryEntry {
    /// Whether this repository releases `package`.
    ///
    /// A repository without an explicit package list releases a single
    /// package named after the repository.
    pub fn releases(&self, repository: &str, package: &str) -> bool {
        match self.release.as_ref().and_then(|r| r.packages.as_ref()) {
            Some(packages) => packages.iter().any(|p| p == package),
            None => repository == package,
        }
    }
}

impl DistributionFile {
    /// Find the repository that releases `package`.
    pub fn repository_of(&self, package: &str) -> Option<RepositoryRef<'_>> {
        let (name, entry) = self
            .repositories
            .iter()
            .find(|(name, entry)| entry.releases(name, package))?;
        tracing::debug!("package {package} found in {name}");
        Some(RepositoryRef {
            name,
            source: entry.source.as_ref(),
        })
    }
}

/// The distribution cache: embedded release descriptors per package.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DistributionCache {
    #[serde(default)]
    pub release_package_xmls: BTreeMap<String, String>,
}

/// A name -> OS package rule table (system-level or runtime-level).
///
/// Rule values are kept opaque; [`ReferenceTable::rule_for`] hands out the
/// per-OS part for the name mapper to interpret.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ReferenceTable {
    entries: BTreeMap<String, Document>,
}

impl ReferenceTable {
    pub fn new(entries: BTreeMap<String, Document>) -> Self {
        Self { entries }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The rule for `name` on `os_name`, if the table has one.
    pub fn rule_for(&self, name: &str, os_name: &str) -> Option<&Document> {
        self.entries.get(name)?.get(os_name)
    }
}
