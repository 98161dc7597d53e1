//! Build plan construction for buildfarm
//!
//! [`BuildGraphBuilder`] turns a classified package set into an ordered,
//! deduplicated [`BuildGraph`]; the [`render`] module turns that into the
//! files a build container consumes.

pub mod builder;
pub mod graph;
pub mod layout;
pub mod plan;
pub mod render;
pub mod tables;
pub mod target;

pub use builder::{BOOTSTRAP_ARTIFACTS, BuildGraphBuilder};
pub use graph::{BuildGraph, GraphEntry};
pub use layout::GraphLayout;
pub use plan::{Plan, PlanRequest};
pub use render::{
    ContainerImage, GraphSerializer, MakefileSerializer, ReferenceEntries, reference_table,
};
pub use tables::{BootstrapLadder, RepositoryOverride, RepositoryOverrides};
pub use target::{BuildPackage, BuildTarget, RepositorySource};
