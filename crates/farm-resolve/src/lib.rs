//! Dependency resolution for buildfarm
//!
//! Computes the transitive closure of root packages from release
//! descriptors, splits it into system / runtime / build-from-source sets,
//! and maps the first two onto OS package names.

pub mod classify;
pub mod mapping;
pub mod qualifier;
pub mod resolver;
pub mod version;

pub use classify::{Classification, PackageClassifier};
pub use mapping::{NameMapper, OsPackages, RuleOutcome, resolve_rule};
pub use qualifier::Diagnostic;
pub use resolver::{DependencyResolver, ResolvedSet, ResolverOptions};
pub use version::VersionBound;
