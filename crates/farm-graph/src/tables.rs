//! Fixed data the plan is assembled from: the bootstrap tooling ladder and
//! per-repository source overrides.

use std::collections::BTreeMap;

use indexmap::IndexMap;

/// Where the bootstrap tooling lives.
pub const TOOLING_URL_BASE: &str = "https://github.com/ros-infrastructure";

/// Repository providing the release tool every ladder step runs.
pub const RELEASE_TOOL_REPOSITORY: &str = "ros_release_python";

/// Build-tooling packages built before anything else, each after its
/// predecessors. Order is build order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapLadder {
    url_base: String,
    steps: IndexMap<String, Vec<String>>,
}

impl Default for BootstrapLadder {
    fn default() -> Self {
        Self::new(TOOLING_URL_BASE)
            .step("catkin_pkg", &[])
            .step("rospkg", &["catkin_pkg"])
            .step("rosdistro", &["rospkg"])
            .step("rosdep", &["rosdistro"])
    }
}

impl BootstrapLadder {
    /// An empty ladder whose repositories live under `url_base`.
    pub fn new(url_base: impl Into<String>) -> Self {
        Self {
            url_base: url_base.into(),
            steps: IndexMap::new(),
        }
    }

    pub fn step(mut self, package: &str, after: &[&str]) -> Self {
        self.steps.insert(
            package.to_string(),
            after.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    pub fn steps(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.steps
            .iter()
            .map(|(package, after)| (package.as_str(), after.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn repository_url(&self, repository: &str) -> String {
        format!("{}/{repository}.git", self.url_base.trim_end_matches('/'))
    }
}

/// A replacement checkout location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOverride {
    pub url: String,
    pub branch: Option<String>,
}

/// Source substitutions keyed by repository name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOverrides {
    by_repository: BTreeMap<String, RepositoryOverride>,
}

impl Default for RepositoryOverrides {
    fn default() -> Self {
        // rosconsole upstream does not build against liblog4cxx 0.11-0.13
        // (ros/rosconsole#58).
        Self::empty().with(
            "rosconsole",
            "https://github.com/twdragon/rosconsole.git",
            Some("log4cxx-0.12"),
        )
    }
}

impl RepositoryOverrides {
    pub fn empty() -> Self {
        Self {
            by_repository: BTreeMap::new(),
        }
    }

    pub fn with(mut self, repository: &str, url: &str, branch: Option<&str>) -> Self {
        self.by_repository.insert(
            repository.to_string(),
            RepositoryOverride {
                url: url.to_string(),
                branch: branch.map(str::to_string),
            },
        );
        self
    }

    pub fn get(&self, repository: &str) -> Option<&RepositoryOverride> {
        self.by_repository.get(repository)
    }
}
