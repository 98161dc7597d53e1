//! Release descriptor (`package.xml`) parsing
//!
//! Descriptors are embedded as raw XML in the distribution cache. Only the
//! direct children of the root element matter: `<version>` and the
//! dependency tags.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use crate::{Error, Result};

/// The dependency tag a declaration came from.
///
/// All kinds resolve the same way today; the kind is kept so a stricter
/// policy (e.g. skipping test-only dependencies) can filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyKind {
    Depend,
    BuildDepend,
    BuildtoolDepend,
    RunDepend,
    ExecDepend,
    BuildExportDepend,
    TestDepend,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 7] = [
        Self::Depend,
        Self::BuildDepend,
        Self::BuildtoolDepend,
        Self::RunDepend,
        Self::ExecDepend,
        Self::BuildExportDepend,
        Self::TestDepend,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Depend => "depend",
            Self::BuildDepend => "build_depend",
            Self::BuildtoolDepend => "buildtool_depend",
            Self::RunDepend => "run_depend",
            Self::ExecDepend => "exec_depend",
            Self::BuildExportDepend => "build_export_depend",
            Self::TestDepend => "test_depend",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One declared dependency with its raw qualifier attributes
/// (`condition`, `version_gte`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    pub kind: DependencyKind,
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl DependencyEdge {
    pub fn new(kind: DependencyKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Parsed view over one package's release descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    pub version: Option<String>,
    pub dependencies: Vec<DependencyEdge>,
}

impl PackageManifest {
    /// Parse a release descriptor.
    ///
    /// `package` only labels errors.
    pub fn parse(package: &str, xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| Error::MalformedDocument {
            name: format!("{package}/package.xml"),
            message: e.to_string(),
        })?;

        let mut manifest = Self::default();
        for child in doc.root_element().children().filter(|n| n.is_element()) {
            let tag = child.tag_name().name();
            let text = child.text().map(str::trim).unwrap_or_default();

            if tag == "version" {
                if !text.is_empty() {
                    manifest.version = Some(text.to_string());
                }
                continue;
            }

            let Some(kind) = DependencyKind::from_tag(tag) else {
                continue;
            };
            if text.is_empty() {
                tracing::debug!("empty <{tag}> in {package}");
                continue;
            }

            let attributes = child
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect();
            manifest.dependencies.push(DependencyEdge {
                kind,
                name: text.to_string(),
                attributes,
            });
        }

        Ok(manifest)
    }
}

/// Lookup of release descriptors by package name.
///
/// Descriptors are parsed on first access and kept. An absent or
/// unparseable descriptor reads as "no version, no dependencies".
#[derive(Debug, Default)]
pub struct ReleaseIndex {
    xmls: BTreeMap<String, String>,
    parsed: RefCell<HashMap<String, Option<Rc<PackageManifest>>>>,
}

impl ReleaseIndex {
    pub fn new(xmls: BTreeMap<String, String>) -> Self {
        Self {
            xmls,
            parsed: RefCell::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.xmls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xmls.is_empty()
    }

    pub fn contains(&self, package: &str) -> bool {
        self.xmls.contains_key(package)
    }

    pub fn manifest(&self, package: &str) -> Option<Rc<PackageManifest>> {
        if let Some(cached) = self.parsed.borrow().get(package) {
            return cached.clone();
        }

        let manifest = self.xmls.get(package).and_then(|xml| {
            PackageManifest::parse(package, xml)
                .map_err(|e| tracing::warn!("ignoring release descriptor: {e}"))
                .ok()
                .map(Rc::new)
        });
        self.parsed
            .borrow_mut()
            .insert(package.to_string(), manifest.clone());
        manifest
    }

    /// Declared version of `package`, if known.
    pub fn version(&self, package: &str) -> Option<String> {
        let version = self.manifest(package).and_then(|m| m.version.clone());
        if version.is_none() {
            tracing::debug!("package version for {package} is not found.");
        }
        version
    }

    /// Declared dependency edges of `package`, unfiltered.
    pub fn dependencies_of(&self, package: &str) -> Vec<DependencyEdge> {
        self.manifest(package)
            .map(|m| m.dependencies.clone())
            .unwrap_or_default()
    }
}
