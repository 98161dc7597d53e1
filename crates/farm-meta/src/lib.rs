//! Package metadata for buildfarm
//!
//! Fetches the distribution index, manifest, cache and rosdep reference
//! tables through a caching [`MetadataStore`], and exposes typed views plus
//! release-descriptor parsing to the planner.

pub mod context;
pub mod document;
pub mod error;
pub mod manifest;
pub mod models;
pub mod settings;
pub mod store;
pub mod transport;

pub use context::DistributionContext;
pub use document::{Document, DocumentLocation, MediaType};
pub use error::{Error, Result};
pub use manifest::{DependencyEdge, DependencyKind, PackageManifest, ReleaseIndex};
pub use models::{
    DistributionCache, DistributionFile, DistributionIndex, ReferenceTable, RepositoryRef,
    SourceSection,
};
pub use settings::MetadataSettings;
pub use store::MetadataStore;
pub use transport::{HttpTransport, StaticTransport, Transport};
