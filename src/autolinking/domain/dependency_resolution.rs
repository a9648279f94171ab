use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a resolution was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionSource {
    /// Found by walking declared dependencies from the project root
    RecursiveResolution,
    /// Found by listing a flat `node_modules`-like search path
    SearchPath,
    /// Declared explicitly in the project's `react-native.config.json`
    ProjectConfigLocal,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::RecursiveResolution => "recursive",
            ResolutionSource::SearchPath => "search-path",
            ResolutionSource::ProjectConfigLocal => "local",
        }
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single installed package, as seen by the scanner
///
/// `origin_path` is where the package was encountered during traversal
/// (possibly a symlink), `path` is its canonical location on disk. Entries in
/// `duplicates` never carry duplicates of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyResolution {
    source: ResolutionSource,
    name: String,
    version: String,
    path: PathBuf,
    origin_path: PathBuf,
    depth: usize,
    duplicates: Option<Vec<DependencyResolution>>,
}

impl DependencyResolution {
    pub fn new(
        source: ResolutionSource,
        name: impl Into<String>,
        version: impl Into<String>,
        path: PathBuf,
        origin_path: PathBuf,
        depth: usize,
    ) -> Self {
        Self {
            source,
            name: name.into(),
            version: version.into(),
            path,
            origin_path,
            depth,
            duplicates: None,
        }
    }

    pub fn source(&self) -> ResolutionSource {
        self.source
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin_path(&self) -> &Path {
        &self.origin_path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn duplicates(&self) -> &[DependencyResolution] {
        self.duplicates.as_deref().unwrap_or(&[])
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates().is_empty()
    }

    /// Whether the package was reached through a symlink
    pub fn is_linked(&self) -> bool {
        self.path != self.origin_path
    }

    /// Appends `duplicate` unless it is the same install as `self` or as an
    /// already recorded duplicate. Returns whether it was recorded.
    pub(crate) fn push_duplicate(&mut self, mut duplicate: DependencyResolution) -> bool {
        if duplicate.path == self.path {
            return false;
        }
        let duplicates = self.duplicates.get_or_insert_with(Vec::new);
        if duplicates.iter().any(|known| known.path == duplicate.path) {
            return false;
        }
        duplicate.duplicates = None;
        duplicates.push(duplicate);
        true
    }

    /// Detaches the recorded duplicates, leaving none behind
    pub(crate) fn take_duplicates(&mut self) -> Vec<DependencyResolution> {
        self.duplicates.take().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(path: &str, depth: usize) -> DependencyResolution {
        DependencyResolution::new(
            ResolutionSource::RecursiveResolution,
            "react-native-reanimated",
            "3.6.0",
            PathBuf::from(path),
            PathBuf::from(path),
            depth,
        )
    }

    #[test]
    fn test_new_has_no_duplicates() {
        let r = resolution("/app/node_modules/react-native-reanimated", 0);
        assert_eq!(r.name(), "react-native-reanimated");
        assert_eq!(r.version(), "3.6.0");
        assert_eq!(r.depth(), 0);
        assert!(!r.has_duplicates());
        assert!(r.duplicates().is_empty());
        assert!(!r.is_linked());
    }

    #[test]
    fn test_push_duplicate_ignores_same_path() {
        let mut r = resolution("/app/node_modules/a", 0);
        assert!(!r.push_duplicate(resolution("/app/node_modules/a", 1)));
        assert!(!r.has_duplicates());
    }

    #[test]
    fn test_push_duplicate_records_once_per_path() {
        let mut r = resolution("/app/node_modules/a", 0);
        assert!(r.push_duplicate(resolution("/app/node_modules/b/node_modules/a", 1)));
        assert!(!r.push_duplicate(resolution("/app/node_modules/b/node_modules/a", 2)));
        assert_eq!(r.duplicates().len(), 1);
        assert_eq!(r.duplicates()[0].depth(), 1);
    }

    #[test]
    fn test_push_duplicate_flattens_nested_duplicates() {
        let mut nested = resolution("/app/node_modules/b/node_modules/a", 1);
        nested.push_duplicate(resolution("/app/node_modules/c/node_modules/a", 1));

        let mut r = resolution("/app/node_modules/a", 0);
        r.push_duplicate(nested);
        assert!(!r.duplicates()[0].has_duplicates());
    }

    #[test]
    fn test_is_linked() {
        let r = DependencyResolution::new(
            ResolutionSource::RecursiveResolution,
            "a",
            "1.0.0",
            PathBuf::from("/app/node_modules/.pnpm/a@1.0.0/node_modules/a"),
            PathBuf::from("/app/node_modules/a"),
            0,
        );
        assert!(r.is_linked());
    }

    #[test]
    fn test_serializes_camel_case_with_null_duplicates() {
        let r = resolution("/app/node_modules/a", 0);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["source"], "recursiveResolution");
        assert_eq!(json["originPath"], "/app/node_modules/a");
        assert!(json["duplicates"].is_null());
    }

    #[test]
    fn test_source_display() {
        assert_eq!(ResolutionSource::SearchPath.to_string(), "search-path");
        assert_eq!(ResolutionSource::ProjectConfigLocal.to_string(), "local");
    }
}
