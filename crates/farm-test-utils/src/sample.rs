//! A small, realistic distribution used across test suites.

use crate::{MetadataSnapshot, PackageXml};

/// `noetic` with a slice of ros_comm.
///
/// Resolving `rosout` gives:
/// - system: `boost` (`libboost-all-dev` on jammy, `libboost-dev` elsewhere)
/// - runtime: `python3-yaml`
/// - source: `roscpp`, `cpp_common`, `rosconsole`
///
/// `python-yaml` is only a Python 2 dependency and never resolves.
pub fn ros_comm() -> MetadataSnapshot {
    MetadataSnapshot::new("noetic")
        .package(
            PackageXml::new("rosout")
                .version("1.16.0")
                .depend("roscpp"),
        )
        .package(
            PackageXml::new("roscpp")
                .version("1.16.0")
                .tagged("build_depend", "cpp_common", &[("version_gte", "0.3.17")])
                .depend("rosconsole")
                .depend("boost")
                .conditional("exec_depend", "python-yaml", "$ROS_PYTHON_VERSION == 2")
                .conditional("exec_depend", "python3-yaml", "$ROS_PYTHON_VERSION == 3"),
        )
        .package(
            PackageXml::new("rosconsole")
                .version("1.14.3")
                .depend("cpp_common"),
        )
        .package(
            PackageXml::new("cpp_common")
                .version("0.7.2")
                .depend("boost"),
        )
        .repository(
            "ros_comm",
            &["rosout", "roscpp"],
            "https://github.com/ros/ros_comm.git",
            "noetic-devel",
        )
        .repository(
            "roscpp_core",
            &["cpp_common"],
            "https://github.com/ros/roscpp_core.git",
            "noetic-devel",
        )
        .single_package_repository("rosconsole", "https://github.com/ros/rosconsole.git")
        .system_rule(
            "boost",
            r#"{ubuntu: {jammy: [libboost-all-dev], "*": [libboost-dev]}}"#,
        )
        .runtime_rule("python3-yaml", "{ubuntu: [python3-yaml]}")
        .runtime_rule("python-yaml", "{ubuntu: {focal: [python-yaml]}}")
}
