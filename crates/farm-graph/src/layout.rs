//! Filesystem locations the plan refers to

use serde::{Deserialize, Serialize};

/// `[layout]` section of the farm configuration.
///
/// Every path is written verbatim into the plan, so they are kept as
/// strings rather than host paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphLayout {
    /// Built `.deb` files are collected here.
    pub artifact_dir: String,
    /// One marker file per built package.
    pub marker_dir: String,
    /// Defaults to `/root/<distribution>_build/src`.
    pub checkout_root: Option<String>,
    pub rosdep_file: String,
    pub rosdep_sources_cache: String,
    pub rosdep_sources_dir: String,
    pub release_tool: String,
    pub build_script: String,
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self {
            artifact_dir: "/tmp/deb".to_string(),
            marker_dir: "/tmp/built_packages".to_string(),
            checkout_root: None,
            rosdep_file: "/root/rosdep.yaml".to_string(),
            rosdep_sources_cache: "/root/.ros/rosdep/sources.cache".to_string(),
            rosdep_sources_dir: "/etc/ros/rosdep/sources.list.d".to_string(),
            release_tool: "/usr/local/bin/ros_release_python".to_string(),
            build_script: "build_ros_package.sh".to_string(),
        }
    }
}

impl GraphLayout {
    pub fn checkout_root(&self, distribution: &str) -> String {
        self.checkout_root
            .clone()
            .unwrap_or_else(|| format!("/root/{distribution}_build/src"))
    }

    /// Marker file recording that `name` was built.
    pub fn marker(&self, name: &str) -> String {
        format!("{}/{name}", self.marker_dir.trim_end_matches('/'))
    }
}
