use crate::shared::Result;
use serde::Deserialize;

/// Maximum number of exclusion patterns accepted in a policy
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclusion pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// Scopes whose packages are development tooling and never ship native code
pub const DEFAULT_EXCLUDED_SCOPES: &[&str] = &[
    "babel",
    "types",
    "eslint",
    "typescript-eslint",
    "testing-library",
    "aws-crypto",
    "aws-sdk",
];

/// Individual packages skipped by default
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    "eslint",
    "prettier",
    "typescript",
    "jest",
    "metro",
    "@expo/cli",
    "@expo/config",
    "@expo/config-plugins",
    "@expo/metro-config",
    "@expo/prebuild-config",
    "expo-module-scripts",
    "babel-preset-expo",
    "jest-expo",
    "eslint-config-expo",
];

/// Wildcard patterns skipped by default
pub const DEFAULT_EXCLUDED_PATTERNS: &[&str] = &["eslint-config-*", "eslint-plugin-*"];

/// Configurable inclusion policy as written in the config file
///
/// ```yaml
/// dependency_policy:
///   use_defaults: true
///   excluded_scopes: [storybook]
///   excluded_names: [react-native-reanimated]
///   excluded_patterns: ["*-codemod"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DependencyPolicy {
    pub use_defaults: bool,
    pub excluded_scopes: Vec<String>,
    pub excluded_names: Vec<String>,
    pub excluded_patterns: Vec<String>,
}

impl Default for DependencyPolicy {
    fn default() -> Self {
        Self {
            use_defaults: true,
            excluded_scopes: Vec::new(),
            excluded_names: Vec::new(),
            excluded_patterns: Vec::new(),
        }
    }
}

/// DependencyFilter - decides whether a dependency name is worth scanning
///
/// Dev tooling (linters, type packages, test runners) never contributes
/// native modules, and skipping it keeps the walk small. A name is excluded
/// when its scope, its exact name, or one of the wildcard patterns matches.
/// Patterns support '*' to match zero or more characters and are
/// case-sensitive.
#[derive(Debug, Clone)]
pub struct DependencyFilter {
    scopes: Vec<String>,
    names: Vec<String>,
    patterns: Vec<NamePattern>,
}

impl DependencyFilter {
    /// Builds a filter from a policy
    ///
    /// # Errors
    /// - Too many patterns (> MAX_EXCLUDE_PATTERNS)
    /// - Invalid pattern format (empty, too long, bad characters, only wildcards)
    pub fn new(policy: &DependencyPolicy) -> Result<Self> {
        let mut scopes: Vec<String> = Vec::new();
        let mut names: Vec<String> = Vec::new();
        let mut raw_patterns: Vec<String> = Vec::new();

        if policy.use_defaults {
            scopes.extend(DEFAULT_EXCLUDED_SCOPES.iter().map(|s| s.to_string()));
            names.extend(DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()));
            raw_patterns.extend(DEFAULT_EXCLUDED_PATTERNS.iter().map(|s| s.to_string()));
        }

        for scope in &policy.excluded_scopes {
            let scope = scope.trim_start_matches('@').to_string();
            if scope.is_empty() {
                anyhow::bail!("Excluded scope cannot be empty");
            }
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }
        for name in &policy.excluded_names {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        raw_patterns.extend(policy.excluded_patterns.iter().cloned());

        if raw_patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many exclusion patterns: {} (maximum: {})",
                raw_patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = raw_patterns
            .into_iter()
            .map(NamePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            scopes,
            names,
            patterns,
        })
    }

    /// The default deny list
    pub fn with_defaults() -> Self {
        let patterns = DEFAULT_EXCLUDED_PATTERNS
            .iter()
            .map(|p| NamePattern {
                original: p.to_string(),
                matcher: compile_pattern(p),
            })
            .collect();

        Self {
            scopes: DEFAULT_EXCLUDED_SCOPES.iter().map(|s| s.to_string()).collect(),
            names: DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect(),
            patterns,
        }
    }

    /// A filter that includes every name
    pub fn allow_all() -> Self {
        Self {
            scopes: Vec::new(),
            names: Vec::new(),
            patterns: Vec::new(),
        }
    }

    pub fn should_include(&self, name: &str) -> bool {
        !self.is_excluded(name)
    }

    fn is_excluded(&self, name: &str) -> bool {
        if let Some(scope) = scope_of(name) {
            if self.scopes.iter().any(|s| s == scope) {
                return true;
            }
        }
        self.names.iter().any(|n| n == name) || self.patterns.iter().any(|p| p.matches(name))
    }

    /// Raw patterns in effect, defaults included
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.original.as_str())
    }
}

impl Default for DependencyFilter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// `@scope/name` → `scope`
fn scope_of(name: &str) -> Option<&str> {
    name.strip_prefix('@')
        .and_then(|rest| rest.split_once('/'))
        .map(|(scope, _)| scope)
}

#[derive(Debug, Clone)]
struct NamePattern {
    original: String,
    matcher: PatternMatcher,
}

impl NamePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;
        let matcher = compile_pattern(&pattern);
        Ok(Self {
            original: pattern,
            matcher,
        })
    }

    fn matches(&self, name: &str) -> bool {
        self.matcher.matches(name)
    }
}

#[derive(Debug, Clone)]
enum PatternMatcher {
    /// "package-name"
    Exact(String),
    /// "*-suffix"
    EndsWith(String),
    /// "prefix-*"
    StartsWith(String),
    /// "*middle*"
    Contains(String),
    /// "pre*mid*suf", anchored at both ends
    Parts {
        first: String,
        middle: Vec<String>,
        last: String,
    },
}

impl PatternMatcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => name == s,
            PatternMatcher::EndsWith(suffix) => name.ends_with(suffix.as_str()),
            PatternMatcher::StartsWith(prefix) => name.starts_with(prefix.as_str()),
            PatternMatcher::Contains(middle) => name.contains(middle.as_str()),
            PatternMatcher::Parts {
                first,
                middle,
                last,
            } => {
                if name.len() < first.len() + last.len()
                    || !name.starts_with(first.as_str())
                    || !name.ends_with(last.as_str())
                {
                    return false;
                }
                let mut rest = &name[first.len()..name.len() - last.len()];
                for part in middle {
                    match rest.find(part.as_str()) {
                        Some(pos) => rest = &rest[pos + part.len()..],
                        None => return false,
                    }
                }
                true
            }
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    for ch in pattern.chars() {
        if !is_valid_pattern_char(ch) {
            anyhow::bail!(
                "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
                 Only alphanumeric, hyphens, underscores, dots, '@', '/', and asterisks (*) are allowed.",
                ch,
                pattern
            );
        }
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | '/' | '*' | '~')
}

fn compile_pattern(pattern: &str) -> PatternMatcher {
    let wildcard_count = pattern.matches('*').count();

    match wildcard_count {
        0 => PatternMatcher::Exact(pattern.to_string()),
        1 if pattern.starts_with('*') => PatternMatcher::EndsWith(pattern[1..].to_string()),
        1 if pattern.ends_with('*') => {
            PatternMatcher::StartsWith(pattern[..pattern.len() - 1].to_string())
        }
        2 if pattern.starts_with('*') && pattern.ends_with('*') => {
            PatternMatcher::Contains(pattern[1..pattern.len() - 1].to_string())
        }
        _ => {
            let mut parts: Vec<String> = pattern.split('*').map(|s| s.to_string()).collect();
            let last = parts.pop().unwrap_or_default();
            let first = if parts.is_empty() {
                String::new()
            } else {
                parts.remove(0)
            };
            let middle = parts.into_iter().filter(|s| !s.is_empty()).collect();
            PatternMatcher::Parts {
                first,
                middle,
                last,
            }
        }
    }
}
