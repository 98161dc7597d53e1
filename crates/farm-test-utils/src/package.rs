//! [`PackageXml`] builder for release descriptors.

/// Builds the `package.xml` text embedded in a distribution cache.
///
/// # Example
///
/// ```
/// use farm_test_utils::PackageXml;
///
/// let xml = PackageXml::new("roscpp")
///     .version("1.16.0")
///     .depend("cpp_common")
///     .conditional("exec_depend", "python-yaml", "$ROS_PYTHON_VERSION == 2")
///     .to_xml();
/// assert!(xml.contains("<version>1.16.0</version>"));
/// ```
#[derive(Debug, Clone)]
pub struct PackageXml {
    name: String,
    version: Option<String>,
    dependencies: Vec<(String, String, Vec<(String, String)>)>,
}

impl PackageXml {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: None,
            dependencies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Plain `<depend>`.
    pub fn depend(self, dependency: &str) -> Self {
        self.tagged("depend", dependency, &[])
    }

    /// `<tag condition="...">`.
    pub fn conditional(self, tag: &str, dependency: &str, condition: &str) -> Self {
        self.tagged(tag, dependency, &[("condition", condition)])
    }

    /// Any dependency tag with arbitrary attributes.
    pub fn tagged(mut self, tag: &str, dependency: &str, attributes: &[(&str, &str)]) -> Self {
        self.dependencies.push((
            tag.to_string(),
            dependency.to_string(),
            attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\"?>\n<package format=\"3\">\n");
        xml.push_str(&format!("  <name>{}</name>\n", self.name));
        if let Some(version) = &self.version {
            xml.push_str(&format!("  <version>{version}</version>\n"));
        }
        for (tag, dependency, attributes) in &self.dependencies {
            let attrs: String = attributes
                .iter()
                .map(|(k, v)| format!(" {k}=\"{}\"", escape(v)))
                .collect();
            xml.push_str(&format!("  <{tag}{attrs}>{dependency}</{tag}>\n"));
        }
        xml.push_str("</package>\n");
        xml
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
