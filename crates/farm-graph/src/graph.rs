//! Ordered, deduplicated build plan

use std::collections::HashSet;

use crate::target::BuildTarget;

/// One line group of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEntry {
    /// A free-standing comment marking a group of targets.
    Section(String),
    Target(BuildTarget),
}

/// The emitted build plan.
///
/// Target ids are unique: a target whose id was already emitted is
/// dropped, never merged, and its id is recorded in [`BuildGraph::skipped`].
#[derive(Debug, Clone, Default)]
pub struct BuildGraph {
    entries: Vec<GraphEntry>,
    ids: HashSet<String>,
    skipped: Vec<String>,
}

impl BuildGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&mut self, text: impl Into<String>) {
        self.entries.push(GraphEntry::Section(text.into()));
    }

    /// Append `target` unless its id is taken. Returns whether it was kept.
    pub fn push(&mut self, target: BuildTarget) -> bool {
        if !self.ids.insert(target.id.clone()) {
            tracing::debug!("skip duplicated target: {}", target.id);
            self.skipped.push(target.id);
            return false;
        }
        self.entries.push(GraphEntry::Target(target));
        true
    }

    pub fn extend(&mut self, targets: impl IntoIterator<Item = BuildTarget>) {
        for target in targets {
            self.push(target);
        }
    }

    pub fn entries(&self) -> &[GraphEntry] {
        &self.entries
    }

    pub fn targets(&self) -> impl Iterator<Item = &BuildTarget> {
        self.entries.iter().filter_map(|entry| match entry {
            GraphEntry::Target(target) => Some(target),
            GraphEntry::Section(_) => None,
        })
    }

    pub fn target(&self, id: &str) -> Option<&BuildTarget> {
        self.targets().find(|target| target.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Ids of targets dropped as duplicates, in encounter order.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
