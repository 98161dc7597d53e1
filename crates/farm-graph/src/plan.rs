//! One pass from root packages to a build plan

use std::collections::BTreeSet;

use farm_meta::DistributionContext;
use farm_resolve::{
    Classification, DependencyResolver, Diagnostic, NameMapper, OsPackages, PackageClassifier,
    ResolvedSet, ResolverOptions,
};

use crate::builder::BuildGraphBuilder;
use crate::graph::BuildGraph;
use crate::layout::GraphLayout;

/// What to plan for.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub roots: BTreeSet<String>,
    pub resolver: ResolverOptions,
    pub os_name: String,
    pub os_distribution: String,
}

/// Everything derived from one [`PlanRequest`].
#[derive(Debug)]
pub struct Plan {
    /// Union of the roots' closures.
    pub resolved: ResolvedSet,
    pub classification: Classification,
    /// Built from source: the source set plus the roots themselves.
    pub build_set: ResolvedSet,
    /// OS packages the build image installs.
    pub os_packages: OsPackages,
    pub graph: BuildGraph,
    /// Qualifier findings recorded while resolving.
    pub diagnostics: Vec<Diagnostic>,
}

impl Plan {
    pub fn assemble(context: &DistributionContext, request: &PlanRequest, layout: &GraphLayout) -> Self {
        let resolver = DependencyResolver::with_options(&context.releases, request.resolver.clone());

        let resolved = resolver.resolve_all(request.roots.iter().map(String::as_str));
        tracing::info!("all depend packages: {} packages", resolved.len());
        tracing::debug!("  {resolved:?}");

        let classification =
            PackageClassifier::new(&context.system_table, &context.runtime_table).classify(&resolved);
        let build_set: ResolvedSet = classification
            .source
            .union(&request.roots)
            .cloned()
            .collect();
        tracing::info!("system packages: {} packages", classification.system.len());
        tracing::debug!("  {:?}", classification.system);
        tracing::info!("runtime packages: {} packages", classification.runtime.len());
        tracing::debug!("  {:?}", classification.runtime);
        tracing::info!("build packages: {} packages", build_set.len());
        tracing::debug!("  {build_set:?}");

        let os_packages = NameMapper::new(
            &context.system_table,
            &context.runtime_table,
            request.os_name.as_str(),
            request.os_distribution.as_str(),
        )
        .map_to_os_packages(&classification.system, &classification.runtime);
        tracing::info!("os packages: {} packages", os_packages.packages.len());

        let graph = BuildGraphBuilder::new(context, &resolver)
            .layout(layout.clone())
            .build(&request.roots, &build_set);

        Self {
            resolved,
            classification,
            build_set,
            os_packages,
            graph,
            diagnostics: resolver.diagnostics(),
        }
    }
}
