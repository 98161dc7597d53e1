//! End-to-end tests for the planning pipeline
//!
//! metadata (in-memory remote) -> store + cache -> context -> plan -> rendered files

use std::collections::BTreeSet;

use farm_fs::StructuredStore;
use farm_graph::{
    ContainerImage, GraphLayout, GraphSerializer, MakefileSerializer, Plan, PlanRequest,
    reference_table,
};
use farm_meta::{DistributionContext, MetadataSettings, MetadataStore, StaticTransport};
use farm_resolve::ResolverOptions;
use farm_test_utils::{MetadataSnapshot, sample};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn settings(temp: &TempDir, snapshot: &MetadataSnapshot) -> MetadataSettings {
    MetadataSettings {
        base_url: snapshot.base_url().to_string(),
        cache_dir: temp.path().join("cache"),
        ..MetadataSettings::default()
    }
}

fn remote(snapshot: &MetadataSnapshot) -> StaticTransport {
    snapshot
        .documents()
        .into_iter()
        .fold(StaticTransport::new(), |transport, document| {
            transport.with(&document.url, document.payload)
        })
}

fn request(roots: &[&str]) -> PlanRequest {
    PlanRequest {
        roots: roots.iter().map(|r| r.to_string()).collect::<BTreeSet<_>>(),
        resolver: ResolverOptions::default(),
        os_name: "ubuntu".to_string(),
        os_distribution: "jammy".to_string(),
    }
}

fn load(temp: &TempDir, snapshot: &MetadataSnapshot, transport: StaticTransport) -> (DistributionContext, usize) {
    let settings = settings(temp, snapshot);
    let mut store = MetadataStore::new(transport, settings.cache_dir.clone());
    let context = DistributionContext::load(&mut store, &settings).unwrap();
    (context, store.transport().requests().len())
}

#[test]
fn test_plan_from_remote_metadata() {
    let temp = TempDir::new().unwrap();
    let snapshot = sample::ros_comm();
    let (context, requests) = load(&temp, &snapshot, remote(&snapshot));
    assert_eq!(requests, 5);

    let plan = Plan::assemble(&context, &request(&["rosout"]), &GraphLayout::default());

    assert_eq!(
        plan.classification.system,
        BTreeSet::from(["boost".to_string()])
    );
    assert_eq!(
        plan.classification.runtime,
        BTreeSet::from(["python3-yaml".to_string()])
    );
    assert_eq!(
        plan.build_set,
        ["cpp_common", "roscpp", "rosconsole", "rosout"]
            .iter()
            .map(|p| p.to_string())
            .collect::<BTreeSet<_>>()
    );
    assert_eq!(
        plan.os_packages.packages,
        BTreeSet::from(["libboost-all-dev".to_string(), "python3-yaml".to_string()])
    );
    assert!(plan.os_packages.unmapped.is_empty());
    assert!(plan.diagnostics.is_empty());
}

#[test]
fn test_cached_metadata_gives_identical_plan() {
    let temp = TempDir::new().unwrap();
    let snapshot = sample::ros_comm();

    let (first, _) = load(&temp, &snapshot, remote(&snapshot));
    let (second, requests) = load(&temp, &snapshot, StaticTransport::new());
    assert_eq!(requests, 0);

    let layout = GraphLayout::default();
    let render = |context: &DistributionContext| {
        let plan = Plan::assemble(context, &request(&["rosout"]), &layout);
        MakefileSerializer.render(&plan.graph)
    };
    assert_eq!(render(&first), render(&second));
}

#[test]
fn test_dependency_order_in_rendered_plan() {
    let temp = TempDir::new().unwrap();
    let snapshot = sample::ros_comm();
    let (context, _) = load(&temp, &snapshot, remote(&snapshot));

    let plan = Plan::assemble(&context, &request(&["rosout"]), &GraphLayout::default());

    let rosconsole = plan.graph.target("/tmp/built_packages/rosconsole").unwrap();
    assert!(
        rosconsole
            .prerequisites
            .contains(&"/tmp/built_packages/cpp_common".to_string())
    );
    let cpp_common = plan.graph.target("/tmp/built_packages/cpp_common").unwrap();
    assert!(
        !cpp_common
            .prerequisites
            .iter()
            .any(|p| p.ends_with("/rosconsole") || p.ends_with("/roscpp"))
    );
    // roscpp and rosout share ros_comm
    assert_eq!(
        plan.graph.skipped(),
        ["/root/noetic_build/src/ros_comm/.git".to_string()]
    );
}

#[test]
fn test_violated_bound_is_reported_and_planned() {
    let temp = TempDir::new().unwrap();
    let snapshot = MetadataSnapshot::new("noetic")
        .package(
            farm_test_utils::PackageXml::new("rviz")
                .tagged("depend", "ogre", &[("version_gte", "2.0")]),
        )
        .package(farm_test_utils::PackageXml::new("ogre").version("1.12.1"))
        .repository("rviz", &["rviz"], "https://github.com/ros-visualization/rviz.git", "noetic-devel")
        .repository("ogre", &["ogre"], "https://github.com/OGRECave/ogre.git", "v1.12.1");
    let (context, _) = load(&temp, &snapshot, remote(&snapshot));

    let plan = Plan::assemble(&context, &request(&["rviz"]), &GraphLayout::default());

    assert_eq!(plan.diagnostics.len(), 1);
    assert!(plan.graph.contains("/tmp/built_packages/ogre"));
    assert_eq!(
        plan.graph.target("/tmp/built_packages/rviz").unwrap().prerequisites[1],
        "/tmp/built_packages/ogre"
    );
}

#[test]
fn test_generated_files_round_trip() {
    let temp = TempDir::new().unwrap();
    let snapshot = sample::ros_comm();
    let (context, _) = load(&temp, &snapshot, remote(&snapshot));
    let plan = Plan::assemble(&context, &request(&["rosout"]), &GraphLayout::default());

    let path = temp.path().join("docker").join("rosdep.yaml");
    let table = reference_table(&plan.build_set, "ubuntu", "ros-noetic-");
    let store = StructuredStore::new();
    store.save(&path, &table).unwrap();
    let reloaded: farm_graph::ReferenceEntries = store.load(&path).unwrap();
    assert_eq!(reloaded, table);
    assert_eq!(reloaded["rosout"]["ubuntu"], "ros-noetic-rosout");

    let image = ContainerImage::new("ubuntu", "jammy").install(&plan.os_packages.packages);
    assert!(image.packages().contains("libboost-all-dev"));
    assert!(image.render().contains("COPY Makefile /root/\n"));
}
