//! Reference table rules -> concrete OS package names

use std::collections::BTreeSet;

use farm_meta::{Document, ReferenceTable};

/// Key matching any OS distribution.
pub const WILDCARD: &str = "*";

/// Result of interpreting one per-OS rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Install these packages (possibly none).
    Packages(BTreeSet<String>),
    /// The rule has a shape or distribution coverage we cannot use.
    Unmapped,
}

/// Interpret a per-OS rule for `distribution`.
///
/// Accepted shapes:
/// - a flat list, used verbatim on every distribution
/// - a mapping keyed by distribution, falling back to `*`; a null value
///   means nothing needs installing
pub fn resolve_rule(rule: &Document, distribution: &str) -> RuleOutcome {
    match rule {
        Document::Sequence(items) => RuleOutcome::Packages(names(items)),
        Document::Mapping(by_distribution) => {
            let chosen = by_distribution
                .get(distribution)
                .or_else(|| by_distribution.get(WILDCARD));
            match chosen {
                Some(Document::Null) => RuleOutcome::Packages(BTreeSet::new()),
                Some(Document::Sequence(items)) => RuleOutcome::Packages(names(items)),
                Some(Document::String(name)) => RuleOutcome::Packages(BTreeSet::from([name.clone()])),
                _ => RuleOutcome::Unmapped,
            }
        }
        _ => RuleOutcome::Unmapped,
    }
}

fn names(items: &[Document]) -> BTreeSet<String> {
    items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// OS packages for a classification, plus the names that could not be
/// mapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsPackages {
    pub packages: BTreeSet<String>,
    pub unmapped: BTreeSet<String>,
}

pub struct NameMapper<'a> {
    system_table: &'a ReferenceTable,
    runtime_table: &'a ReferenceTable,
    os_name: String,
    os_distribution: String,
}

impl<'a> NameMapper<'a> {
    pub fn new(
        system_table: &'a ReferenceTable,
        runtime_table: &'a ReferenceTable,
        os_name: impl Into<String>,
        os_distribution: impl Into<String>,
    ) -> Self {
        Self {
            system_table,
            runtime_table,
            os_name: os_name.into(),
            os_distribution: os_distribution.into(),
        }
    }

    /// Map system and runtime packages to OS package names.
    ///
    /// Unmappable names are logged and reported, never fatal.
    pub fn map_to_os_packages(
        &self,
        system: &BTreeSet<String>,
        runtime: &BTreeSet<String>,
    ) -> OsPackages {
        let mut result = OsPackages::default();
        let lookups = system
            .iter()
            .map(|name| (name, self.system_table))
            .chain(runtime.iter().map(|name| (name, self.runtime_table)));

        for (name, table) in lookups {
            let outcome = match table.rule_for(name, &self.os_name) {
                Some(rule) => resolve_rule(rule, &self.os_distribution),
                None => RuleOutcome::Unmapped,
            };
            match outcome {
                RuleOutcome::Packages(packages) => result.packages.extend(packages),
                RuleOutcome::Unmapped => {
                    tracing::warn!(
                        "package names not found for {} {}: {name}",
                        self.os_name,
                        self.os_distribution
                    );
                    result.unmapped.insert(name.clone());
                }
            }
        }

        result
    }
}
