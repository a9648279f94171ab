use super::Platform;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAutolinkingOptions {
    #[serde(default)]
    search_paths: Option<Vec<String>>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
}

impl RawAutolinkingOptions {
    fn from_value(value: Option<&Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

/// Linking options for one project and (optionally) one platform
///
/// Read from `expo.autolinking` in the project manifest. A per-platform
/// object (`expo.autolinking.android`, ...) replaces the base value of each
/// field it sets. Search paths are absolute, resolved against the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutolinkingOptions {
    search_paths: Vec<PathBuf>,
    exclude: Vec<String>,
}

impl AutolinkingOptions {
    pub fn new(search_paths: Vec<PathBuf>, exclude: Vec<String>) -> Self {
        Self {
            search_paths,
            exclude,
        }
    }

    /// Builds options from the raw `expo.autolinking` value of a manifest
    pub fn from_manifest_value(
        autolinking: Option<&Value>,
        platform: Option<Platform>,
        project_root: &Path,
    ) -> Self {
        let base = RawAutolinkingOptions::from_value(autolinking);
        let platform_value = platform.and_then(|platform| {
            platform
                .option_keys()
                .into_iter()
                .find_map(|key| autolinking?.get(key))
        });
        let overrides = RawAutolinkingOptions::from_value(platform_value);

        let search_paths = overrides
            .search_paths
            .or(base.search_paths)
            .unwrap_or_default()
            .into_iter()
            .map(|p| project_root.join(p))
            .collect();
        let exclude = overrides.exclude.or(base.exclude).unwrap_or_default();

        Self::new(search_paths, exclude)
    }

    /// Adds invocation-level search paths and excluded names, skipping ones
    /// already present. Relative search paths resolve against `project_root`.
    pub fn extend(
        mut self,
        search_paths: &[PathBuf],
        exclude: &[String],
        project_root: &Path,
    ) -> Self {
        for path in search_paths {
            let path = project_root.join(path);
            if !self.search_paths.contains(&path) {
                self.search_paths.push(path);
            }
        }
        for name in exclude {
            if !self.exclude.contains(name) {
                self.exclude.push(name.clone());
            }
        }
        self
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_section_is_empty() {
        let options = AutolinkingOptions::from_manifest_value(None, None, Path::new("/app"));
        assert!(options.search_paths().is_empty());
        assert!(options.exclude().is_empty());
    }

    #[test]
    fn test_base_options_resolve_search_paths() {
        let value = json!({"searchPaths": ["../../packages", "/abs/modules"], "exclude": ["expo-camera"]});
        let options =
            AutolinkingOptions::from_manifest_value(Some(&value), None, Path::new("/repo/apps/app"));

        assert_eq!(
            options.search_paths(),
            &[
                PathBuf::from("/repo/apps/app/../../packages"),
                PathBuf::from("/abs/modules")
            ]
        );
        assert!(options.is_excluded("expo-camera"));
        assert!(!options.is_excluded("expo-av"));
    }

    #[test]
    fn test_platform_override_replaces_fields_it_sets() {
        let value = json!({
            "searchPaths": ["modules"],
            "exclude": ["expo-camera"],
            "android": {"exclude": ["expo-av"]}
        });
        let options = AutolinkingOptions::from_manifest_value(
            Some(&value),
            Some(Platform::Android),
            Path::new("/app"),
        );

        assert_eq!(options.search_paths(), &[PathBuf::from("/app/modules")]);
        assert_eq!(options.exclude(), &["expo-av".to_string()]);
    }

    #[test]
    fn test_apple_platform_reads_legacy_ios_key() {
        let value = json!({"ios": {"exclude": ["expo-gl"]}});
        let options = AutolinkingOptions::from_manifest_value(
            Some(&value),
            Some(Platform::Apple),
            Path::new("/app"),
        );
        assert!(options.is_excluded("expo-gl"));
    }

    #[test]
    fn test_malformed_section_is_ignored() {
        let value = json!({"searchPaths": "not-a-list"});
        let options = AutolinkingOptions::from_manifest_value(Some(&value), None, Path::new("/app"));
        assert_eq!(options, AutolinkingOptions::default());
    }

    #[test]
    fn test_extend_deduplicates() {
        let options = AutolinkingOptions::new(
            vec![PathBuf::from("/app/modules")],
            vec!["expo-camera".to_string()],
        )
        .extend(
            &[PathBuf::from("modules"), PathBuf::from("vendor")],
            &["expo-camera".to_string(), "expo-av".to_string()],
            Path::new("/app"),
        );

        assert_eq!(
            options.search_paths(),
            &[PathBuf::from("/app/modules"), PathBuf::from("/app/vendor")]
        );
        assert_eq!(options.exclude(), &["expo-camera".to_string(), "expo-av".to_string()]);
    }
}
