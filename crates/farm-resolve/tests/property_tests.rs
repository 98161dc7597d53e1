use std::collections::BTreeMap;

use farm_meta::{Document, ReferenceTable, ReleaseIndex};
use farm_resolve::{DependencyResolver, PackageClassifier, ResolvedSet};
use farm_test_utils::PackageXml;
use proptest::prelude::*;

fn table(names: &[String]) -> ReferenceTable {
    ReferenceTable::new(
        names
            .iter()
            .map(|n| (n.clone(), Document::Null))
            .collect::<BTreeMap<_, _>>(),
    )
}

/// Package `p{i}` depends on `p{j}` for every `(i, j)` edge.
fn graph(size: usize, edges: &[(usize, usize)]) -> ReleaseIndex {
    let xmls = (0..size)
        .map(|i| {
            let package = edges
                .iter()
                .filter(|(from, _)| *from == i)
                .fold(PackageXml::new(&format!("p{i}")), |xml, (_, to)| {
                    xml.depend(&format!("p{to}"))
                });
            (package.name().to_string(), package.to_xml())
        })
        .collect();
    ReleaseIndex::new(xmls)
}

proptest! {
    #[test]
    fn test_classification_is_a_partition(
        resolved in prop::collection::btree_set("[a-e]{1,2}", 0..20),
        system in prop::collection::vec("[a-e]{1,2}", 0..10),
        runtime in prop::collection::vec("[a-e]{1,2}", 0..10),
    ) {
        let system = table(&system);
        let runtime = table(&runtime);
        let result = PackageClassifier::new(&system, &runtime).classify(&resolved);

        prop_assert!(result.system.is_disjoint(&result.runtime));
        prop_assert!(result.system.is_disjoint(&result.source));
        prop_assert!(result.runtime.is_disjoint(&result.source));

        let union: ResolvedSet = result
            .system
            .iter()
            .chain(&result.runtime)
            .chain(&result.source)
            .cloned()
            .collect();
        prop_assert_eq!(union, resolved);
    }

    #[test]
    fn test_resolution_terminates_and_is_closed(
        size in 1usize..12,
        raw_edges in prop::collection::vec((0usize..12, 0usize..12), 0..40),
    ) {
        let edges: Vec<_> = raw_edges
            .into_iter()
            .map(|(from, to)| (from % size, to % size))
            .collect();
        let releases = graph(size, &edges);
        let resolver = DependencyResolver::new(&releases);

        for i in 0..size {
            let root = format!("p{i}");
            let closure = resolver.resolve(&root);

            // Every member's own closure stays inside the root's closure.
            for member in &closure {
                prop_assert!(resolver.resolve(member).is_subset(&closure));
            }
            prop_assert_eq!(resolver.resolve(&root), closure);
        }
    }
}
