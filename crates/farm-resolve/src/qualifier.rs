//! Dependency qualifier evaluation
//!
//! A `condition` attribute decides whether an edge exists at all; version
//! bounds and anything unrecognized only produce diagnostics.

use std::fmt;

use farm_meta::{DependencyEdge, ReleaseIndex};

use crate::version::VersionBound;

/// Python major version conditions are evaluated against.
pub const DEFAULT_PYTHON_MAJOR: &str = "3";

/// Non-fatal findings about upstream metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A dependency's declared version falls outside a bound.
    VersionBound {
        dependent: String,
        dependency: String,
        bound: String,
        declared: String,
    },
    /// An attribute the evaluator does not model.
    UnknownQualifier {
        dependent: String,
        dependency: String,
        key: String,
        value: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VersionBound {
                dependent,
                dependency,
                bound,
                declared,
            } => write!(
                f,
                "{dependency} required {bound} by {dependent} but {declared}"
            ),
            Self::UnknownQualifier {
                dependent,
                dependency,
                key,
                value,
            } => write!(
                f,
                "unknown attribute {key}: {value} in depends {dependency} of {dependent}"
            ),
        }
    }
}

/// Whether `condition` holds for `python_major`.
///
/// Conditions look like `$ROS_PYTHON_VERSION == 3`; only the last
/// whitespace-separated token is compared.
pub fn condition_holds(condition: &str, python_major: &str) -> bool {
    condition.split_whitespace().next_back() == Some(python_major)
}

/// Evaluate one edge declared by `dependent`.
///
/// Returns whether the edge is active; diagnostics are appended to `out`.
pub fn evaluate(
    dependent: &str,
    edge: &DependencyEdge,
    releases: &ReleaseIndex,
    python_major: &str,
    out: &mut Vec<Diagnostic>,
) -> bool {
    if let Some(condition) = edge.attribute("condition") {
        if !condition_holds(condition, python_major) {
            tracing::trace!("{dependent}: skipping {} ({condition})", edge.name);
            return false;
        }
    }

    for (key, value) in &edge.attributes {
        match key.as_str() {
            "condition" => {}
            "version_gte" | "version_gt" => check_bound(dependent, edge, key, value, releases, out),
            _ => out.push(Diagnostic::UnknownQualifier {
                dependent: dependent.to_string(),
                dependency: edge.name.clone(),
                key: key.clone(),
                value: value.clone(),
            }),
        }
    }

    true
}

fn check_bound(
    dependent: &str,
    edge: &DependencyEdge,
    key: &str,
    value: &str,
    releases: &ReleaseIndex,
    out: &mut Vec<Diagnostic>,
) {
    let Some(declared) = releases.version(&edge.name) else {
        return;
    };
    let Some(bound) = VersionBound::from_qualifier(key, value) else {
        tracing::debug!("{dependent}: unparseable bound {key}={value} on {}", edge.name);
        return;
    };

    match bound.is_satisfied_by(&declared) {
        Some(true) => {}
        Some(false) => out.push(Diagnostic::VersionBound {
            dependent: dependent.to_string(),
            dependency: edge.name.clone(),
            bound: bound.to_string(),
            declared,
        }),
        None => tracing::debug!("{}: unparseable version {declared}", edge.name),
    }
}
