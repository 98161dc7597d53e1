//! Minimum-version qualifiers on dependency declarations.
//!
//! Release descriptors bound dependencies with `version_gte="1.2.3"` or
//! `version_gt="1.2"`. Versions are compared as semver, with a missing patch
//! component treated as `.0`.
//!
//! # Examples
//!
//! ```
//! use farm_resolve::version::VersionBound;
//!
//! let bound = VersionBound::from_qualifier("version_gte", "0.5.78").unwrap();
//! assert_eq!(bound.is_satisfied_by("0.8.10"), Some(true));
//! assert_eq!(bound.is_satisfied_by("0.5.0"), Some(false));
//! assert_eq!(bound.is_satisfied_by("unknown"), None);
//! ```

use std::fmt;

/// Bound comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundOp {
    /// `version_gte`
    Gte,
    /// `version_gt`
    Gt,
}

impl BoundOp {
    pub fn qualifier(self) -> &'static str {
        match self {
            Self::Gte => "version_gte",
            Self::Gt => "version_gt",
        }
    }
}

/// A parsed minimum-version bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBound {
    pub op: BoundOp,
    /// The bound as written in the descriptor.
    pub raw: String,
    version: semver::Version,
}

impl VersionBound {
    /// Interpret a qualifier attribute.
    ///
    /// Returns `None` for keys other than `version_gte`/`version_gt`, and for
    /// bounds that are not a recognizable version.
    pub fn from_qualifier(key: &str, value: &str) -> Option<Self> {
        let op = match key {
            "version_gte" => BoundOp::Gte,
            "version_gt" => BoundOp::Gt,
            _ => return None,
        };
        let version = normalize_version(value).ok()?;
        Some(Self {
            op,
            raw: value.trim().to_string(),
            version,
        })
    }

    /// Check a declared version against this bound.
    ///
    /// `None` when `declared` cannot be parsed.
    pub fn is_satisfied_by(&self, declared: &str) -> Option<bool> {
        let declared = normalize_version(declared).ok()?;
        Some(match self.op {
            BoundOp::Gte => declared >= self.version,
            BoundOp::Gt => declared > self.version,
        })
    }
}

impl fmt::Display for VersionBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.qualifier(), self.raw)
    }
}

/// Normalize a version string to semver by appending `.0` for missing patch.
///
/// - `"1.14"` -> `"1.14.0"`
/// - `"1.14.3"` -> `"1.14.3"`
/// - `"1"` -> error
fn normalize_version(s: &str) -> Result<semver::Version, String> {
    let s = s.trim();

    if let Ok(v) = semver::Version::parse(s) {
        return Ok(v);
    }

    let with_patch = format!("{s}.0");
    semver::Version::parse(&with_patch).map_err(|e| format!("invalid version '{s}': {e}"))
}
