//! Output artifacts derived from a plan

mod container;
mod makefile;
mod reference;

pub use container::{ContainerImage, EXCLUDED_PACKAGES, TOOLCHAIN_PACKAGES};
pub use makefile::MakefileSerializer;
pub use reference::{ReferenceEntries, reference_table};

use crate::graph::BuildGraph;

/// Renders a [`BuildGraph`] into a build-description document.
pub trait GraphSerializer {
    fn render(&self, graph: &BuildGraph) -> String;
}
