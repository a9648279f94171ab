use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// File name of a package manifest
pub const PACKAGE_JSON: &str = "package.json";

/// npm's limit on package name length
const MAX_PACKAGE_NAME_LENGTH: usize = 214;

/// Subset of `package.json` the scanner cares about
///
/// Dependency maps keep declaration order, which drives discovery order and
/// therefore which install of a duplicated package becomes canonical.
/// Fields of an unexpected JSON type read as absent, so a package with a
/// sloppy manifest is still linked and walked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    version: Option<String>,
    #[serde(default, deserialize_with = "lenient_map")]
    dependencies: IndexMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_map")]
    dev_dependencies: IndexMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_map")]
    optional_dependencies: IndexMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_map")]
    peer_dependencies: IndexMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_map")]
    peer_dependencies_meta: IndexMap<String, PeerDependencyMeta>,
    #[serde(default)]
    expo: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PeerDependencyMeta {
    #[serde(default)]
    optional: bool,
}

/// A string field; any other JSON type reads as `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.as_str().map(str::to_string)))
}

/// An object field; non-objects read as empty and entries of the wrong
/// shape are dropped
fn lenient_map<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Object(entries)) = value else {
        return Ok(IndexMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(key, entry)| serde_json::from_value(entry).ok().map(|entry| (key, entry)))
        .collect())
}

impl PackageManifest {
    /// Parses manifest text. Malformed JSON yields `None`: a corrupt
    /// manifest makes the directory "not a package" rather than an error.
    pub fn parse(content: &str) -> Option<Self> {
        serde_json::from_str(content).ok()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared version, or an empty string when absent
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or("")
    }

    /// Raw `expo.autolinking` value, if the manifest declares one
    pub fn autolinking(&self) -> Option<&serde_json::Value> {
        self.expo.as_ref().and_then(|expo| expo.get("autolinking"))
    }

    /// Dependency names to follow when this manifest is the project root.
    ///
    /// Order: `dependencies`, `devDependencies`, `optionalDependencies`,
    /// `peerDependencies`; a name is listed once, at its first occurrence.
    pub fn root_dependency_names(&self) -> Vec<String> {
        Self::collect_names(&[
            &self.dependencies,
            &self.dev_dependencies,
            &self.optional_dependencies,
            &self.peer_dependencies,
        ])
    }

    /// Dependency names to follow for an installed package.
    ///
    /// Dev dependencies are never installed for dependencies, and optional
    /// peers are skipped.
    pub fn dependency_names(&self) -> Vec<String> {
        let required_peers: IndexMap<String, serde_json::Value> = self
            .peer_dependencies
            .iter()
            .filter(|(name, _)| {
                !self
                    .peer_dependencies_meta
                    .get(*name)
                    .is_some_and(|meta| meta.optional)
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Self::collect_names(&[
            &self.dependencies,
            &self.optional_dependencies,
            &required_peers,
        ])
    }

    fn collect_names(sections: &[&IndexMap<String, serde_json::Value>]) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for section in sections {
            for name in section.keys() {
                if is_valid_dependency_name(name) && !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }
}

/// Checks that a dependency name is safe to join onto a `node_modules` path
///
/// Accepts `name` and `@scope/name`; rejects empty segments, path traversal
/// and separators that would escape the `node_modules` directory.
pub fn is_valid_dependency_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_PACKAGE_NAME_LENGTH {
        return false;
    }
    if name.contains('\\') || name.starts_with('.') {
        return false;
    }

    let segments: Vec<&str> = name.split('/').collect();
    let valid_segment = |segment: &&str| {
        !segment.is_empty() && *segment != "." && *segment != ".."
    };

    match segments.as_slice() {
        [single] => !single.starts_with('@') && valid_segment(single),
        [scope, package] => {
            scope.len() > 1
                && scope.starts_with('@')
                && valid_segment(scope)
                && valid_segment(package)
                && !package.starts_with('.')
        }
        _ => false,
    }
}
