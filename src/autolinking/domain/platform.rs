use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target platform a native module can be linked into
///
/// `Apple` is the umbrella platform used by modern module configs; the
/// individual Apple OSes are accepted so that older configs (and callers
/// that link a single OS) keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Apple,
    Ios,
    Macos,
    Tvos,
    Android,
    Web,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Apple => "apple",
            Platform::Ios => "ios",
            Platform::Macos => "macos",
            Platform::Tvos => "tvos",
            Platform::Android => "android",
            Platform::Web => "web",
        }
    }

    /// Whether this platform belongs to the Apple family
    pub fn is_apple(&self) -> bool {
        matches!(
            self,
            Platform::Apple | Platform::Ios | Platform::Macos | Platform::Tvos
        )
    }

    /// Keys to look up, in order, when reading per-platform options.
    ///
    /// `ios`, `macos` and `tvos` fall back to `apple`, and `apple` falls
    /// back to the legacy `ios` key.
    pub fn option_keys(&self) -> Vec<&'static str> {
        match self {
            Platform::Apple => vec!["apple", "ios"],
            Platform::Ios | Platform::Macos | Platform::Tvos => vec![self.as_str(), "apple"],
            Platform::Android | Platform::Web => vec![self.as_str()],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apple" => Ok(Platform::Apple),
            "ios" => Ok(Platform::Ios),
            "macos" => Ok(Platform::Macos),
            "tvos" => Ok(Platform::Tvos),
            "android" => Ok(Platform::Android),
            "web" => Ok(Platform::Web),
            _ => Err(format!(
                "Invalid platform: {}. Please specify one of 'apple', 'ios', 'macos', 'tvos', 'android' or 'web'",
                s
            )),
        }
    }
}
