//! [`MetadataSnapshot`] builder: a complete, offline distribution.
//!
//! Produces the five documents the planner loads (index, distribution
//! manifest, gzip'd distribution cache, system table, runtime table) either
//! as URL/payload pairs for an in-memory transport, or written into a cache
//! directory so the binary runs without network access.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde_yaml::{Mapping, Value};

use crate::PackageXml;

pub const BASE_URL: &str = "https://metadata.test/rosdistro";

/// One document of a snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotDocument {
    pub url: String,
    /// File name the store caches this document under.
    pub cache_name: String,
    /// Plain YAML text.
    pub yaml: String,
    /// What a remote would serve (gzip'd for `.gz` URLs).
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone)]
struct Repository {
    packages: Option<Vec<String>>,
    url: String,
    branch: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MetadataSnapshot {
    distribution: String,
    manifest_paths: Vec<String>,
    repositories: Vec<(String, Repository)>,
    packages: BTreeMap<String, String>,
    system: BTreeMap<String, Value>,
    runtime: BTreeMap<String, Value>,
}

impl MetadataSnapshot {
    pub fn new(distribution: &str) -> Self {
        Self {
            distribution: distribution.to_string(),
            manifest_paths: vec![format!("{distribution}/distribution.yaml")],
            repositories: Vec::new(),
            packages: BTreeMap::new(),
            system: BTreeMap::new(),
            runtime: BTreeMap::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        BASE_URL
    }

    /// Override the manifest path list of the index entry.
    pub fn manifest_paths(mut self, paths: &[&str]) -> Self {
        self.manifest_paths = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Add a release descriptor.
    pub fn package(mut self, package: PackageXml) -> Self {
        self.packages
            .insert(package.name().to_string(), package.to_xml());
        self
    }

    /// Add a source repository releasing `packages`.
    pub fn repository(mut self, name: &str, packages: &[&str], url: &str, branch: &str) -> Self {
        self.repositories.push((
            name.to_string(),
            Repository {
                packages: Some(packages.iter().map(|p| p.to_string()).collect()),
                url: url.to_string(),
                branch: Some(branch.to_string()),
            },
        ));
        self
    }

    /// Add a repository with no package list (it releases itself).
    pub fn single_package_repository(mut self, name: &str, url: &str) -> Self {
        self.repositories.push((
            name.to_string(),
            Repository {
                packages: None,
                url: url.to_string(),
                branch: None,
            },
        ));
        self
    }

    /// Add a system table rule; `rule` is YAML, e.g. `{ubuntu: [cmake]}`.
    pub fn system_rule(mut self, name: &str, rule: &str) -> Self {
        self.system.insert(name.to_string(), parse(rule));
        self
    }

    /// Add a runtime table rule; `rule` is YAML.
    pub fn runtime_rule(mut self, name: &str, rule: &str) -> Self {
        self.runtime.insert(name.to_string(), parse(rule));
        self
    }

    pub fn index_url(&self) -> String {
        format!("{BASE_URL}/index-v4.yaml")
    }

    pub fn cache_url(&self) -> String {
        format!("{BASE_URL}/{}-cache.yaml.gz", self.distribution)
    }

    pub fn documents(&self) -> Vec<SnapshotDocument> {
        let mut entry = Mapping::new();
        entry.insert(
            "distribution".into(),
            Value::Sequence(self.manifest_paths.iter().map(|p| p.as_str().into()).collect()),
        );
        entry.insert("distribution_cache".into(), self.cache_url().into());
        let mut distributions = Mapping::new();
        distributions.insert(self.distribution.as_str().into(), Value::Mapping(entry));
        let index = mapping([("distributions", Value::Mapping(distributions))]);

        let mut repositories = Mapping::new();
        for (name, repo) in &self.repositories {
            let mut release = Mapping::new();
            if let Some(packages) = &repo.packages {
                release.insert(
                    "packages".into(),
                    Value::Sequence(packages.iter().map(|p| p.as_str().into()).collect()),
                );
            }
            let mut source = Mapping::new();
            source.insert("type".into(), "git".into());
            source.insert("url".into(), repo.url.as_str().into());
            if let Some(branch) = &repo.branch {
                source.insert("version".into(), branch.as_str().into());
            }
            repositories.insert(
                name.as_str().into(),
                mapping([
                    ("release", Value::Mapping(release)),
                    ("source", Value::Mapping(source)),
                ]),
            );
        }
        let distribution = mapping([("repositories", Value::Mapping(repositories))]);

        let xmls: Mapping = self
            .packages
            .iter()
            .map(|(name, xml)| (name.as_str().into(), xml.as_str().into()))
            .collect();
        let cache = mapping([("release_package_xmls", Value::Mapping(xmls))]);

        let manifest_path = self
            .manifest_paths
            .first()
            .cloned()
            .unwrap_or_else(|| format!("{}/distribution.yaml", self.distribution));

        vec![
            plain(self.index_url(), &index),
            plain(format!("{BASE_URL}/{manifest_path}"), &distribution),
            gzipped(self.cache_url(), &cache),
            plain(format!("{BASE_URL}/rosdep/base.yaml"), &table(&self.system)),
            plain(format!("{BASE_URL}/rosdep/python.yaml"), &table(&self.runtime)),
        ]
    }

    /// Write every document into `dir` under its cache name.
    pub fn write_cache(&self, dir: &Path) {
        fs::create_dir_all(dir)
            .unwrap_or_else(|e| panic!("write_cache: failed to create {}: {e}", dir.display()));
        for document in self.documents() {
            let path = dir.join(&document.cache_name);
            fs::write(&path, &document.yaml)
                .unwrap_or_else(|e| panic!("write_cache: failed to write {}: {e}", path.display()));
        }
    }
}

fn parse(rule: &str) -> Value {
    serde_yaml::from_str(rule).unwrap_or_else(|e| panic!("invalid rule YAML {rule:?}: {e}"))
}

fn mapping<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
}

fn table(rules: &BTreeMap<String, Value>) -> Value {
    Value::Mapping(
        rules
            .iter()
            .map(|(name, rule)| (name.as_str().into(), rule.clone()))
            .collect(),
    )
}

fn to_yaml(value: &Value) -> String {
    serde_yaml::to_string(value).unwrap_or_else(|e| panic!("snapshot YAML: {e}"))
}

fn cache_name(url: &str) -> String {
    let file = url.rsplit('/').next().unwrap_or_default();
    file.strip_suffix(".gz").unwrap_or(file).to_string()
}

fn plain(url: String, value: &Value) -> SnapshotDocument {
    let yaml = to_yaml(value);
    SnapshotDocument {
        cache_name: cache_name(&url),
        payload: yaml.clone().into_bytes(),
        yaml,
        url,
    }
}

fn gzipped(url: String, value: &Value) -> SnapshotDocument {
    let yaml = to_yaml(value);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(yaml.as_bytes())
        .unwrap_or_else(|e| panic!("snapshot gzip: {e}"));
    let payload = encoder
        .finish()
        .unwrap_or_else(|e| panic!("snapshot gzip: {e}"));
    SnapshotDocument {
        cache_name: cache_name(&url),
        payload,
        yaml,
        url,
    }
}
