//! Build plan nodes: targets, source checkouts and package builds

/// One node of the build plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTarget {
    pub id: String,
    pub prerequisites: Vec<String>,
    pub commands: Vec<String>,
    pub comment: Option<String>,
    /// Not a file; always rebuilt when requested.
    pub phony: bool,
    /// Short name forwarding to `id`.
    pub alias: Option<String>,
}

impl BuildTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn prerequisite(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisites.push(prerequisite.into());
        self
    }

    pub fn prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites
            .extend(prerequisites.into_iter().map(Into::into));
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn phony(mut self) -> Self {
        self.phony = true;
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// A git checkout the plan clones before building from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySource {
    pub name: String,
    pub url: String,
    /// Directory the checkout lands under.
    pub base_dir: String,
    pub branch: Option<String>,
    pub recursive: bool,
}

impl RepositorySource {
    /// A recursive clone of the default branch.
    pub fn new(name: impl Into<String>, url: impl Into<String>, base_dir: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            base_dir: base_dir.into(),
            branch: None,
            recursive: true,
        }
    }

    pub fn branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Where the repository is checked out.
    pub fn checkout_dir(&self) -> String {
        format!("{}/{}", self.base_dir.trim_end_matches('/'), self.name)
    }

    /// Target cloning the repository; identified by its `.git` directory.
    pub fn checkout_target(&self) -> BuildTarget {
        let mut clone = format!("git clone {} `dirname $@`", self.url);
        if let Some(branch) = &self.branch {
            clone.push_str(&format!(" -b {branch}"));
        }
        if self.recursive {
            clone.push_str(" --recursive");
        }
        BuildTarget::new(format!("{}/.git", self.checkout_dir())).command(clone)
    }
}

/// A build target paired with the checkout it builds from.
///
/// The checkout is always the first prerequisite, so `$<` in commands
/// names the `.git` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPackage {
    pub target: BuildTarget,
    pub repository: RepositorySource,
}

impl BuildPackage {
    pub fn new(mut target: BuildTarget, repository: RepositorySource) -> Self {
        target
            .prerequisites
            .insert(0, repository.checkout_target().id);
        Self { target, repository }
    }

    /// Checkout target followed by the build target.
    pub fn targets(&self) -> [BuildTarget; 2] {
        [self.repository.checkout_target(), self.target.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(None, true, "git clone https://x/r.git `dirname $@` --recursive")]
    #[case(Some("noetic-devel"), true, "git clone https://x/r.git `dirname $@` -b noetic-devel --recursive")]
    #[case(Some("main"), false, "git clone https://x/r.git `dirname $@` -b main")]
    fn test_clone_command(
        #[case] branch: Option<&str>,
        #[case] recursive: bool,
        #[case] expected: &str,
    ) {
        let source = RepositorySource::new("r", "https://x/r.git", "/src")
            .branch(branch.map(str::to_string))
            .recursive(recursive);

        let target = source.checkout_target();

        assert_eq!(target.id, "/src/r/.git");
        assert_eq!(target.commands, vec![expected.to_string()]);
    }

    #[test]
    fn test_build_package_puts_checkout_first() {
        let source = RepositorySource::new("ros_comm", "https://x/ros_comm.git", "/src/");
        let target = BuildTarget::new("/tmp/built_packages/roscpp").prerequisite("dep");

        let package = BuildPackage::new(target, source);

        assert_eq!(
            package.target.prerequisites,
            vec!["/src/ros_comm/.git".to_string(), "dep".to_string()]
        );
        let [checkout, build] = package.targets();
        assert_eq!(checkout.id, "/src/ros_comm/.git");
        assert_eq!(build.id, "/tmp/built_packages/roscpp");
    }
}
