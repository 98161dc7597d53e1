//! Transitive dependency resolution
//!
//! Walks release descriptors from a root package, following every active
//! edge. The walk keeps one visited set per call, so circular declarations
//! in upstream metadata terminate instead of recursing forever.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use farm_meta::{DependencyKind, ReleaseIndex};

use crate::qualifier::{self, DEFAULT_PYTHON_MAJOR, Diagnostic};

/// A deduplicated set of package names.
pub type ResolvedSet = BTreeSet<String>;

/// Knobs for edge selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Token `condition` attributes must end with.
    pub python_major: String,
    /// Dependency kinds that count as edges.
    pub kinds: BTreeSet<DependencyKind>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            python_major: DEFAULT_PYTHON_MAJOR.to_string(),
            kinds: DependencyKind::ALL.into_iter().collect(),
        }
    }
}

pub struct DependencyResolver<'a> {
    releases: &'a ReleaseIndex,
    options: ResolverOptions,
    /// Active first-order dependencies per package.
    direct: RefCell<HashMap<String, Rc<ResolvedSet>>>,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(releases: &'a ReleaseIndex) -> Self {
        Self::with_options(releases, ResolverOptions::default())
    }

    pub fn with_options(releases: &'a ReleaseIndex, options: ResolverOptions) -> Self {
        Self {
            releases,
            options,
            direct: RefCell::default(),
            diagnostics: RefCell::default(),
        }
    }

    /// Full transitive closure of `package`.
    pub fn resolve(&self, package: &str) -> ResolvedSet {
        self.resolve_with(package, &ResolvedSet::new(), true)
    }

    /// Closure of `package` with names in `exclude` never expanded.
    ///
    /// Excluded names still appear in the result when something depends on
    /// them directly. With `recursive = false` only first-order
    /// dependencies are returned.
    pub fn resolve_with(&self, package: &str, exclude: &ResolvedSet, recursive: bool) -> ResolvedSet {
        if !recursive {
            return (*self.direct_dependencies(package)).clone();
        }

        let mut resolved = ResolvedSet::new();
        let mut expanded: HashSet<String> = exclude.iter().cloned().collect();
        expanded.insert(package.to_string());

        let mut pending = vec![package.to_string()];
        while let Some(current) = pending.pop() {
            for dependency in self.direct_dependencies(&current).iter() {
                if dependency == package {
                    tracing::debug!("dependency cycle: {current} depends on {package}");
                }
                resolved.insert(dependency.clone());
                if expanded.insert(dependency.clone()) {
                    pending.push(dependency.clone());
                }
            }
        }

        resolved
    }

    /// Union of the closures of every root.
    pub fn resolve_all<'n>(&self, roots: impl IntoIterator<Item = &'n str>) -> ResolvedSet {
        roots
            .into_iter()
            .flat_map(|root| self.resolve(root))
            .collect()
    }

    /// Diagnostics recorded so far, in discovery order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    fn direct_dependencies(&self, package: &str) -> Rc<ResolvedSet> {
        if let Some(cached) = self.direct.borrow().get(package) {
            return Rc::clone(cached);
        }

        let mut found = Vec::new();
        let active: ResolvedSet = self
            .releases
            .dependencies_of(package)
            .iter()
            .filter(|edge| self.options.kinds.contains(&edge.kind))
            .filter(|edge| {
                qualifier::evaluate(
                    package,
                    edge,
                    self.releases,
                    &self.options.python_major,
                    &mut found,
                )
            })
            .map(|edge| edge.name.clone())
            .collect();

        for diagnostic in &found {
            tracing::warn!("{diagnostic}");
        }
        self.diagnostics.borrow_mut().extend(found);

        let active = Rc::new(active);
        self.direct
            .borrow_mut()
            .insert(package.to_string(), Rc::clone(&active));
        active
    }
}
