//! Distribution context: every document the planner needs, loaded up front
//!
//! Built once per run and handed by reference to the resolver, classifier
//! and graph builder. Tests build one from in-memory documents with
//! [`DistributionContext::from_parts`].

use crate::manifest::ReleaseIndex;
use crate::models::{
    DistributionCache, DistributionFile, DistributionIndex, ReferenceTable, typed,
};
use crate::settings::MetadataSettings;
use crate::store::MetadataStore;
use crate::transport::Transport;
use crate::{Error, Result};

#[derive(Debug)]
pub struct DistributionContext {
    pub distribution: String,
    /// Source repositories of the distribution.
    pub repositories: DistributionFile,
    /// Release descriptors of every released package.
    pub releases: ReleaseIndex,
    /// Packages provided by the OS package manager.
    pub system_table: ReferenceTable,
    /// Packages provided as language-runtime (Python) OS packages.
    pub runtime_table: ReferenceTable,
}

impl DistributionContext {
    pub fn from_parts(
        distribution: impl Into<String>,
        repositories: DistributionFile,
        cache: DistributionCache,
        system_table: ReferenceTable,
        runtime_table: ReferenceTable,
    ) -> Self {
        Self {
            distribution: distribution.into(),
            repositories,
            releases: ReleaseIndex::new(cache.release_package_xmls),
            system_table,
            runtime_table,
        }
    }

    /// Fetch and type every document of `settings.distribution`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownDistribution`] if the index does not list it
    /// - [`Error::UnresolvedDistributionPath`] unless it has exactly one
    ///   manifest path
    /// - retrieval, format and shape errors from the store
    pub fn load<T: Transport>(store: &mut MetadataStore<T>, settings: &MetadataSettings) -> Result<Self> {
        let name = settings.distribution.as_str();

        let index_url = settings.url_for(&settings.index_path);
        tracing::debug!("Loading index from {index_url}");
        let index: DistributionIndex = typed(&settings.index_path, &*store.fetch(&index_url)?)?;

        let entry = index
            .distributions
            .get(name)
            .ok_or_else(|| Error::UnknownDistribution {
                distribution: name.to_string(),
            })?;

        let [manifest_path] = entry.distribution.as_slice() else {
            return Err(Error::UnresolvedDistributionPath {
                distribution: name.to_string(),
                paths: entry.distribution.clone(),
            });
        };
        let manifest_url = settings.url_for(manifest_path);
        tracing::debug!("Loading distribution manifest from {manifest_url}");
        let repositories: DistributionFile = typed(manifest_path, &*store.fetch(&manifest_url)?)?;

        let cache_url = entry
            .distribution_cache
            .as_deref()
            .ok_or_else(|| Error::MalformedDocument {
                name: settings.index_path.clone(),
                message: format!("no distribution_cache for {name}"),
            })?;
        tracing::debug!("Loading distribution cache from {cache_url}");
        let cache: DistributionCache = typed(cache_url, &*store.fetch(cache_url)?)?;

        let system_url = settings.url_for(&settings.system_table_path);
        tracing::debug!("Loading system table from {system_url}");
        let system_table: ReferenceTable =
            typed(&settings.system_table_path, &*store.fetch(&system_url)?)?;

        let runtime_url = settings.url_for(&settings.runtime_table_path);
        tracing::debug!("Loading runtime table from {runtime_url}");
        let runtime_table: ReferenceTable =
            typed(&settings.runtime_table_path, &*store.fetch(&runtime_url)?)?;

        tracing::info!(
            "{name}: {} repositories, {} release descriptors, {} system rules, {} runtime rules",
            repositories.repositories.len(),
            cache.release_package_xmls.len(),
            system_table.len(),
            runtime_table.len()
        );

        Ok(Self::from_parts(
            name,
            repositories,
            cache,
            system_table,
            runtime_table,
        ))
    }
}
