//! Tests for BuildGraphBuilder

use std::collections::{BTreeMap, BTreeSet};

use farm_graph::{
    BOOTSTRAP_ARTIFACTS, BootstrapLadder, BuildGraph, BuildGraphBuilder, GraphLayout,
    GraphSerializer, MakefileSerializer, RepositoryOverrides,
};
use farm_meta::{DistributionCache, DistributionContext, DistributionFile, ReferenceTable};
use farm_resolve::{DependencyResolver, ResolvedSet};
use farm_test_utils::PackageXml;
use pretty_assertions::assert_eq;

const REPOSITORIES: &str = r#"
repositories:
  ros_comm:
    release:
      packages: [roscpp, rosout]
    source:
      type: git
      url: https://github.com/ros/ros_comm.git
      version: noetic-devel
  roscpp_core:
    release:
      packages: [cpp_common]
    source:
      url: https://github.com/ros/roscpp_core.git
      version: noetic-devel
  rosconsole:
    source:
      url: https://github.com/ros/rosconsole.git
      version: noetic-devel
  released_only:
    release:
      packages: [sourceless]
"#;

fn context() -> DistributionContext {
    let repositories: DistributionFile = serde_yaml::from_str(REPOSITORIES).unwrap();
    let xmls: BTreeMap<String, String> = [
        PackageXml::new("roscpp")
            .depend("cpp_common")
            .depend("rosconsole")
            .depend("boost"),
        PackageXml::new("rosout").depend("roscpp"),
        PackageXml::new("rosconsole").depend("cpp_common"),
        PackageXml::new("cpp_common"),
    ]
    .into_iter()
    .map(|p| (p.name().to_string(), p.to_xml()))
    .collect();

    DistributionContext::from_parts(
        "noetic",
        repositories,
        DistributionCache {
            release_package_xmls: xmls,
        },
        ReferenceTable::default(),
        ReferenceTable::default(),
    )
}

fn set(names: &[&str]) -> ResolvedSet {
    names.iter().map(|n| n.to_string()).collect()
}

fn build(context: &DistributionContext, roots: &[&str], build_set: &[&str]) -> BuildGraph {
    let resolver = DependencyResolver::new(&context.releases);
    let roots: BTreeSet<String> = set(roots);
    BuildGraphBuilder::new(context, &resolver).build(&roots, &set(build_set))
}

#[test]
fn test_dependent_lists_dependency_marker() {
    let context = context();
    let graph = build(&context, &["roscpp"], &["roscpp", "cpp_common"]);

    let roscpp = graph.target("/tmp/built_packages/roscpp").unwrap();
    assert_eq!(
        roscpp.prerequisites,
        vec![
            "/root/noetic_build/src/ros_comm/.git".to_string(),
            "/tmp/built_packages/cpp_common".to_string(),
            "/root/.ros/rosdep/sources.cache".to_string(),
        ]
    );

    let cpp_common = graph.target("/tmp/built_packages/cpp_common").unwrap();
    assert!(
        !cpp_common
            .prerequisites
            .iter()
            .any(|p| p.contains("roscpp"))
    );
}

#[test]
fn test_dependencies_outside_build_set_are_not_prerequisites() {
    let context = context();
    let graph = build(&context, &["roscpp"], &["roscpp"]);

    let roscpp = graph.target("/tmp/built_packages/roscpp").unwrap();
    assert!(!roscpp.prerequisites.iter().any(|p| p.ends_with("/boost")));
    assert!(!roscpp.prerequisites.iter().any(|p| p.ends_with("/cpp_common")));
}

#[test]
fn test_aggregate_counts_bootstrap_artifacts() {
    let context = context();
    let graph = build(&context, &["rosout"], &["rosout", "roscpp", "cpp_common"]);

    let all = graph.target("all").unwrap();
    assert!(all.phony);
    assert_eq!(all.prerequisites, vec!["rosout".to_string()]);
    assert_eq!(
        all.commands,
        vec![format!(
            "@echo built packages : `ls -1 /tmp/deb/* | wc -l` / {}",
            3 + BOOTSTRAP_ARTIFACTS
        )]
    );
    assert!(all.commands[0].ends_with("/ 11"));
}

#[test]
fn test_shared_repository_checkout_emitted_once() {
    let context = context();
    let graph = build(&context, &["rosout"], &["rosout", "roscpp"]);

    let checkouts = graph
        .targets()
        .filter(|t| t.id == "/root/noetic_build/src/ros_comm/.git")
        .count();
    assert_eq!(checkouts, 1);
    assert_eq!(
        graph.skipped(),
        ["/root/noetic_build/src/ros_comm/.git".to_string()]
    );
}

#[test]
fn test_package_target_builds_in_checkout() {
    let context = context();
    let graph = build(&context, &["roscpp"], &["roscpp"]);

    let roscpp = graph.target("/tmp/built_packages/roscpp").unwrap();
    assert_eq!(roscpp.alias.as_deref(), Some("roscpp"));
    assert_eq!(
        roscpp.commands,
        vec![
            "bash build_ros_package.sh /root/noetic_build/src/ros_comm roscpp && touch $@"
                .to_string()
        ]
    );

    let checkout = graph
        .target("/root/noetic_build/src/ros_comm/.git")
        .unwrap();
    assert_eq!(
        checkout.commands,
        vec![
            "git clone https://github.com/ros/ros_comm.git `dirname $@` -b noetic-devel --recursive"
                .to_string()
        ]
    );
}

#[test]
fn test_override_replaces_repository_source() {
    let context = context();
    let graph = build(&context, &["rosconsole"], &["rosconsole"]);

    let checkout = graph
        .target("/root/noetic_build/src/rosconsole/.git")
        .unwrap();
    assert_eq!(
        checkout.commands,
        vec![
            "git clone https://github.com/twdragon/rosconsole.git `dirname $@` -b log4cxx-0.12 --recursive"
                .to_string()
        ]
    );
}

#[test]
fn test_overrides_are_injectable() {
    let context = context();
    let resolver = DependencyResolver::new(&context.releases);
    let graph = BuildGraphBuilder::new(&context, &resolver)
        .overrides(RepositoryOverrides::empty())
        .build(&set(&["rosconsole"]), &set(&["rosconsole"]));

    let checkout = graph
        .target("/root/noetic_build/src/rosconsole/.git")
        .unwrap();
    assert!(checkout.commands[0].contains("https://github.com/ros/rosconsole.git"));
}

#[test]
fn test_packages_without_source_are_skipped() {
    let context = context();
    let graph = build(&context, &["sourceless"], &["sourceless", "unreleased"]);

    assert!(graph.target("/tmp/built_packages/sourceless").is_none());
    assert!(graph.target("/tmp/built_packages/unreleased").is_none());
    assert!(graph.target("clean").is_some());
}

#[test]
fn test_bootstrap_ladder_chain() {
    let context = context();
    let graph = build(&context, &[], &[]);

    let rospkg = graph.target("/tmp/built_packages/rospkg").unwrap();
    assert_eq!(
        rospkg.prerequisites,
        vec![
            "/root/noetic_build/src/rospkg/.git".to_string(),
            "/usr/local/bin/ros_release_python".to_string(),
            "/tmp/deb/.touch".to_string(),
            "/tmp/built_packages/.touch".to_string(),
            "/root/noetic_build/src/.touch".to_string(),
            "/tmp/built_packages/catkin-pkg".to_string(),
        ]
    );
    assert!(graph.contains("/tmp/built_packages/catkin-pkg"));
    assert!(graph.contains("/tmp/built_packages/rosdep"));
    assert_eq!(
        graph.target("/etc/ros/rosdep/sources.list.d").unwrap().prerequisites,
        vec!["/tmp/built_packages/rosdep".to_string()]
    );
}

#[test]
fn test_custom_ladder_and_layout() {
    let context = context();
    let resolver = DependencyResolver::new(&context.releases);
    let layout = GraphLayout {
        marker_dir: "/markers".to_string(),
        checkout_root: Some("/src".to_string()),
        ..GraphLayout::default()
    };
    let graph = BuildGraphBuilder::new(&context, &resolver)
        .layout(layout)
        .ladder(BootstrapLadder::new("https://mirror.test").step("rosdep", &[]))
        .build(&BTreeSet::new(), &ResolvedSet::new());

    let rosdep_checkout = graph.target("/src/rosdep/.git").unwrap();
    assert!(rosdep_checkout.commands[0].starts_with("git clone https://mirror.test/rosdep.git"));
    assert!(graph.contains("/markers/rosdep"));
    assert!(!graph.contains("/markers/rospkg"));
}

#[test]
fn test_empty_plan_renders_bootstrap_block() {
    let context = context();
    let graph = build(&context, &[], &[]);

    let makefile = MakefileSerializer.render(&graph);

    let expected_head = "\
# main target
.PHONY: all
all:
\t@echo built packages : `ls -1 /tmp/deb/* | wc -l` / 8

# build env
env_targets: /tmp/deb/.touch /tmp/built_packages/.touch /root/noetic_build/src/.touch

/tmp/deb/.touch:
\tmkdir -p $(shell dirname $@)
\ttouch $@

";
    assert!(makefile.starts_with(expected_head), "{makefile}");
    assert!(makefile.contains(
        "/root/.ros/rosdep/sources.cache: /root/rosdep.yaml /etc/ros/rosdep/sources.list.d\n\
         \techo \"yaml file:///root/rosdep.yaml\" > /etc/ros/rosdep/sources.list.d/99-custom.list\n\
         \trosdep update\n"
    ));
    assert!(makefile.contains(
        "/usr/local/bin/ros_release_python: /root/noetic_build/src/ros_release_python/.git\n\
         \tln -sf /root/noetic_build/src/ros_release_python/scripts/ros_release_python $@\n"
    ));
    assert!(makefile.ends_with(
        ".PHONY: clean\nclean:\n\trm -rf /tmp/deb /tmp/built_packages /root/noetic_build/src /usr/local/bin/ros_release_python /etc/ros/rosdep/sources.list.d/20-default.list\n\n"
    ));
}
