use std::collections::BTreeSet;

/// Packages every build image needs regardless of the plan.
pub const TOOLCHAIN_PACKAGES: [&str; 13] = [
    "build-essential",
    "git",
    "dh-make",
    "dh-python",
    "libxml2-utils",
    "libturbojpeg0-dev",
    "vim",
    "python3-stdeb",
    "python3-dateutil",
    "python3-docutils",
    "python3-vcstools",
    "python3-packaging",
    "python3-pip",
];

/// OS packages never installed into the image: the bootstrap ladder builds
/// them, or the target distribution does not ship them.
pub const EXCLUDED_PACKAGES: [&str; 8] = [
    "python3-catkin-pkg",
    "python3-catkin-pkg-modules",
    "python3-rospkg",
    "python3-rospkg-modules",
    "python3-rosdistro",
    "python3-rosdistro-modules",
    "python3-rosdep",
    "python3-rosdep-modules",
];

/// Container image description for the build environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerImage {
    os_name: String,
    os_distribution: String,
    packages: BTreeSet<String>,
}

impl ContainerImage {
    pub fn new(os_name: impl Into<String>, os_distribution: impl Into<String>) -> Self {
        Self {
            os_name: os_name.into(),
            os_distribution: os_distribution.into(),
            packages: TOOLCHAIN_PACKAGES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Add resolved OS packages. Excluded names are dropped.
    pub fn install<'p>(mut self, packages: impl IntoIterator<Item = &'p String>) -> Self {
        self.packages.extend(
            packages
                .into_iter()
                .filter(|p| !EXCLUDED_PACKAGES.contains(&p.as_str()))
                .cloned(),
        );
        self
    }

    /// Sorted install list.
    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }

    pub fn render(&self) -> String {
        let install = self
            .packages
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" \\\n  ");

        let mut out = String::new();
        out.push_str(&format!("FROM {}:{}\n", self.os_name, self.os_distribution));
        out.push_str("ENV DEBIAN_FRONTEND=noninteractive\n");
        out.push_str("RUN apt-get update && apt-get upgrade -y && apt-get install -y \\\n  ");
        out.push_str(&install);
        out.push_str("\n\n");
        // bloom from the archive does not build the ladder; take the latest from pip
        out.push_str("RUN pip3 install -U pip && pip3 install bloom\n\n");
        out.push_str("COPY rosdep.yaml /root\n");
        out.push_str("COPY *.sh /root/\n");
        out.push_str("COPY Makefile /root/\n\n");
        out.push_str("WORKDIR /root\n");
        out
    }
}
