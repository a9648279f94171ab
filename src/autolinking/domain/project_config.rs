use indexmap::IndexMap;
use serde::Deserialize;

/// File holding explicit dependency roots (JSON form of the dependency
/// section of `react-native.config.js`)
pub const PROJECT_CONFIG_FILE: &str = "react-native.config.json";

/// `{ "dependencies": { "<name>": { "root": "<path>" } } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    dependencies: IndexMap<String, LocalDependencyConfig>,
}

/// A single explicit dependency declaration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalDependencyConfig {
    /// Root directory, relative to the project root. `null` disables the entry.
    #[serde(default)]
    root: Option<String>,
}

impl LocalDependencyConfig {
    pub fn new(root: Option<String>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }
}

impl ProjectConfig {
    pub fn new(dependencies: IndexMap<String, LocalDependencyConfig>) -> Self {
        Self { dependencies }
    }

    /// Parses the config file; malformed JSON is treated as an empty config
    pub fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_default()
    }

    pub fn dependencies(&self) -> impl Iterator<Item = (&str, &LocalDependencyConfig)> {
        self.dependencies
            .iter()
            .map(|(name, config)| (name.as_str(), config))
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}
