use std::fmt::Write;

use crate::graph::{BuildGraph, GraphEntry};
use crate::render::GraphSerializer;
use crate::target::BuildTarget;

/// Renders the plan as a GNU make file.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakefileSerializer;

impl MakefileSerializer {
    fn write_target(out: &mut String, target: &BuildTarget) {
        if let Some(comment) = &target.comment {
            let _ = writeln!(out, "# {comment}");
        }
        if let Some(alias) = &target.alias {
            let _ = writeln!(out, ".PHONY: {alias}");
            let _ = writeln!(out, "{alias}: {}\n", target.id);
        }
        if target.phony {
            let _ = writeln!(out, ".PHONY: {}", target.id);
        }
        out.push_str(&target.id);
        out.push(':');
        if !target.prerequisites.is_empty() {
            out.push(' ');
            out.push_str(&target.prerequisites.join(" "));
        }
        out.push('\n');
        for command in &target.commands {
            let _ = writeln!(out, "\t{command}");
        }
    }
}

impl GraphSerializer for MakefileSerializer {
    fn render(&self, graph: &BuildGraph) -> String {
        let mut out = String::new();
        for entry in graph.entries() {
            match entry {
                GraphEntry::Section(text) => {
                    let _ = writeln!(out, "# {text}");
                }
                GraphEntry::Target(target) => {
                    Self::write_target(&mut out, target);
                    out.push('\n');
                }
            }
        }
        out
    }
}
