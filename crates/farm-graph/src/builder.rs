//! Build plan assembly
//!
//! The plan always starts with the same bootstrap block: an aggregate
//! `all` target, directory scaffolding, the rosdep setup chain and the
//! build-tooling ladder. One checkout + build pair per build-from-source
//! package follows, then a phony `clean`.

use std::collections::BTreeSet;

use farm_meta::DistributionContext;
use farm_resolve::{DependencyResolver, ResolvedSet};

use crate::graph::BuildGraph;
use crate::layout::GraphLayout;
use crate::tables::{BootstrapLadder, RELEASE_TOOL_REPOSITORY, RepositoryOverrides};
use crate::target::{BuildPackage, BuildTarget, RepositorySource};

/// `.deb` files the bootstrap block contributes on top of one per package.
pub const BOOTSTRAP_ARTIFACTS: usize = 8;

pub struct BuildGraphBuilder<'a> {
    context: &'a DistributionContext,
    resolver: &'a DependencyResolver<'a>,
    layout: GraphLayout,
    ladder: BootstrapLadder,
    overrides: RepositoryOverrides,
}

impl<'a> BuildGraphBuilder<'a> {
    pub fn new(context: &'a DistributionContext, resolver: &'a DependencyResolver<'a>) -> Self {
        Self {
            context,
            resolver,
            layout: GraphLayout::default(),
            ladder: BootstrapLadder::default(),
            overrides: RepositoryOverrides::default(),
        }
    }

    pub fn layout(mut self, layout: GraphLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn ladder(mut self, ladder: BootstrapLadder) -> Self {
        self.ladder = ladder;
        self
    }

    pub fn overrides(mut self, overrides: RepositoryOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Assemble the plan building `build_set`, with `roots` as the
    /// aggregate's prerequisites.
    pub fn build(&self, roots: &BTreeSet<String>, build_set: &ResolvedSet) -> BuildGraph {
        let mut graph = BuildGraph::new();

        graph.section("main target");
        graph.push(
            BuildTarget::new("all")
                .prerequisites(roots.iter().cloned())
                .command(format!(
                    "@echo built packages : `ls -1 {}/* | wc -l` / {}",
                    self.layout.artifact_dir,
                    build_set.len() + BOOTSTRAP_ARTIFACTS
                ))
                .phony(),
        );

        graph.section("build env");
        let scaffolding = self.scaffolding();
        graph.push(BuildTarget::new("env_targets").prerequisites(scaffolding.iter().cloned()));
        for marker in &scaffolding {
            graph.push(
                BuildTarget::new(marker.as_str())
                    .command("mkdir -p $(shell dirname $@)")
                    .command("touch $@"),
            );
        }

        graph.section("python tools for build");
        self.push_rosdep_setup(&mut graph);
        for package in self.bootstrap_packages(&scaffolding) {
            graph.extend(package.targets());
        }

        graph.section("ROS packages to build");
        for package in build_set {
            if let Some(build) = self.package(package, build_set) {
                graph.extend(build.targets());
            }
        }

        graph.push(self.clean_target());
        graph
    }

    fn checkout_root(&self) -> String {
        self.layout.checkout_root(&self.context.distribution)
    }

    /// Touch files standing in for the scaffolding directories; a directory
    /// target would look stale whenever its contents change.
    fn scaffolding(&self) -> Vec<String> {
        [
            self.layout.artifact_dir.clone(),
            self.layout.marker_dir.clone(),
            self.checkout_root(),
        ]
        .iter()
        .map(|dir| format!("{}/.touch", dir.trim_end_matches('/')))
        .collect()
    }

    fn ladder_marker(&self, package: &str) -> String {
        self.layout.marker(&package.replace('_', "-"))
    }

    fn push_rosdep_setup(&self, graph: &mut BuildGraph) {
        let layout = &self.layout;
        graph.push(
            BuildTarget::new("python_tools")
                .prerequisite(layout.rosdep_sources_cache.as_str())
                .phony(),
        );
        graph.push(
            BuildTarget::new(layout.rosdep_sources_dir.as_str())
                .prerequisite(self.ladder_marker("rosdep"))
                .command("rosdep init"),
        );
        graph.push(
            BuildTarget::new(layout.rosdep_sources_cache.as_str())
                .prerequisite(layout.rosdep_file.as_str())
                .prerequisite(layout.rosdep_sources_dir.as_str())
                .command(format!(
                    "echo \"yaml file://{}\" > {}/99-custom.list",
                    layout.rosdep_file, layout.rosdep_sources_dir
                ))
                .command("rosdep update"),
        );
    }

    fn bootstrap_packages(&self, scaffolding: &[String]) -> Vec<BuildPackage> {
        let checkout_root = self.checkout_root();
        let mut packages = vec![BuildPackage::new(
            BuildTarget::new(self.layout.release_tool.as_str()).command(format!(
                "ln -sf {checkout_root}/{RELEASE_TOOL_REPOSITORY}/scripts/{RELEASE_TOOL_REPOSITORY} $@"
            )),
            RepositorySource::new(
                RELEASE_TOOL_REPOSITORY,
                self.ladder.repository_url(RELEASE_TOOL_REPOSITORY),
                checkout_root.as_str(),
            ),
        )];

        for (package, after) in self.ladder.steps() {
            let target = BuildTarget::new(self.ladder_marker(package))
                .prerequisite(self.layout.release_tool.as_str())
                .prerequisites(scaffolding.iter().cloned())
                .prerequisites(after.iter().map(|p| self.ladder_marker(p)))
                .command(format!(
                    "cd `dirname $<` && ros_release_python deb3 && apt-get install -y ./deb_dist/*.deb && mv ./deb_dist/*.deb {} && touch $@",
                    self.layout.artifact_dir
                ));
            let repository = RepositorySource::new(
                package,
                self.ladder.repository_url(package),
                checkout_root.as_str(),
            );
            packages.push(BuildPackage::new(target, repository));
        }

        packages
    }

    /// Checkout + build pair for one build-from-source package.
    ///
    /// Prerequisites are the markers of its first-order dependencies that
    /// are built too, plus the rosdep readiness marker.
    fn package(&self, package: &str, build_set: &ResolvedSet) -> Option<BuildPackage> {
        let Some(found) = self.context.repositories.repository_of(package) else {
            tracing::warn!("no repository releases {package}; not building it");
            return None;
        };
        let Some(source) = found.source else {
            tracing::warn!("repository {} of {package} has no source entry; not building it", found.name);
            return None;
        };

        let (url, branch) = match self.overrides.get(found.name) {
            Some(fork) => {
                tracing::debug!("{}: using {} instead of {}", found.name, fork.url, source.url);
                (fork.url.clone(), fork.branch.clone())
            }
            None => (source.url.clone(), source.version.clone()),
        };
        let repository =
            RepositorySource::new(found.name, url, self.checkout_root()).branch(branch);

        let dependencies = self
            .resolver
            .resolve_with(package, &ResolvedSet::new(), false);
        let target = BuildTarget::new(self.layout.marker(package))
            .prerequisites(
                dependencies
                    .intersection(build_set)
                    .map(|dependency| self.layout.marker(dependency)),
            )
            .prerequisite(self.layout.rosdep_sources_cache.as_str())
            .command(format!(
                "bash {} {} {package} && touch $@",
                self.layout.build_script,
                repository.checkout_dir()
            ))
            .alias(package);

        Some(BuildPackage::new(target, repository))
    }

    fn clean_target(&self) -> BuildTarget {
        let layout = &self.layout;
        BuildTarget::new("clean")
            .command(format!(
                "rm -rf {} {} {} {} {}/20-default.list",
                layout.artifact_dir,
                layout.marker_dir,
                self.checkout_root(),
                layout.release_tool,
                layout.rosdep_sources_dir
            ))
            .phony()
    }
}
