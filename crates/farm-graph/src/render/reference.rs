use std::collections::BTreeMap;

/// `name -> { os_name -> OS package }`, in the reference table file format.
pub type ReferenceEntries = BTreeMap<String, BTreeMap<String, String>>;

/// Reference entries for packages built from source, so rosdep resolves
/// them to the packages this plan produces.
///
/// The OS package name is `prefix` followed by the package name with
/// underscores turned into dashes.
pub fn reference_table<'p>(
    build_set: impl IntoIterator<Item = &'p String>,
    os_name: &str,
    prefix: &str,
) -> ReferenceEntries {
    build_set
        .into_iter()
        .map(|name| {
            let os_package = format!("{prefix}{}", name.replace('_', "-"));
            (name.clone(), BTreeMap::from([(os_name.to_string(), os_package)]))
        })
        .collect()
}
