use super::Platform;
use serde::Deserialize;

/// File name of the native module descriptor
pub const MODULE_CONFIG_FILE: &str = "expo-module.config.json";

/// Parsed `expo-module.config.json`
///
/// Only the platform declaration matters for linking decisions. Older
/// descriptors omit `platforms` and instead carry one object per platform
/// (`"ios": {...}`, `"android": {...}`); those keys are honoured as well.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpoModuleConfig {
    #[serde(default)]
    platforms: Option<Vec<String>>,
    #[serde(default)]
    apple: Option<serde_json::Value>,
    #[serde(default)]
    ios: Option<serde_json::Value>,
    #[serde(default)]
    android: Option<serde_json::Value>,
    #[serde(default)]
    web: Option<serde_json::Value>,
}

impl ExpoModuleConfig {
    /// Parses descriptor text; malformed JSON yields `None`
    pub fn parse(content: &str) -> Option<Self> {
        serde_json::from_str(content).ok()
    }

    /// Declared platform names, lowercased
    pub fn declared_platforms(&self) -> Vec<String> {
        if let Some(platforms) = &self.platforms {
            return platforms.iter().map(|p| p.to_lowercase()).collect();
        }

        let mut inferred = Vec::new();
        if self.apple.is_some() {
            inferred.push("apple".to_string());
        }
        if self.ios.is_some() {
            inferred.push("ios".to_string());
        }
        if self.android.is_some() {
            inferred.push("android".to_string());
        }
        if self.web.is_some() {
            inferred.push("web".to_string());
        }
        inferred
    }

    /// Whether the module can be linked into `platform`
    ///
    /// Asking for `apple` accepts any Apple OS; asking for a specific Apple OS
    /// accepts that OS or the `apple` umbrella. A legacy `ios` declaration
    /// predates the umbrella and counts as `apple`.
    pub fn supports_platform(&self, platform: Platform) -> bool {
        let declared = self.declared_platforms();
        let declares = |name: &str| declared.iter().any(|p| p == name);

        match platform {
            Platform::Apple => ["apple", "ios", "macos", "tvos"]
                .iter()
                .any(|name| declares(name)),
            Platform::Ios | Platform::Macos | Platform::Tvos => {
                declares(platform.as_str()) || declares("apple") || declares("ios")
            }
            Platform::Android | Platform::Web => declares(platform.as_str()),
        }
    }
}
