//! Partition a resolved set by provisioning strategy

use farm_meta::ReferenceTable;

use crate::resolver::ResolvedSet;

/// Where each resolved package comes from.
///
/// The three sets are disjoint and their union is the classified input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Installed from OS packages.
    pub system: ResolvedSet,
    /// Installed from OS-packaged Python modules.
    pub runtime: ResolvedSet,
    /// Built from source.
    pub source: ResolvedSet,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.system.len() + self.runtime.len() + self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct PackageClassifier<'a> {
    system_table: &'a ReferenceTable,
    runtime_table: &'a ReferenceTable,
}

impl<'a> PackageClassifier<'a> {
    pub fn new(system_table: &'a ReferenceTable, runtime_table: &'a ReferenceTable) -> Self {
        Self {
            system_table,
            runtime_table,
        }
    }

    /// Split `resolved` using table membership.
    ///
    /// A name present in both tables counts as a system package.
    pub fn classify(&self, resolved: &ResolvedSet) -> Classification {
        let mut classification = Classification::default();
        for name in resolved {
            let bucket = if self.system_table.contains(name) {
                &mut classification.system
            } else if self.runtime_table.contains(name) {
                &mut classification.runtime
            } else {
                &mut classification.source
            };
            bucket.insert(name.clone());
        }
        classification
    }
}
