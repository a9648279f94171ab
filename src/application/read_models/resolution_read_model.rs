//! Resolution read model for query operations
//!
//! Formatters only see these flattened views, never the domain types.

/// Main read model for a resolution report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionReadModel {
    pub metadata: ReportMetadataView,
    /// One view per requested platform, in request order
    pub views: Vec<PlatformView>,
}

impl ResolutionReadModel {
    /// Number of packages with duplicate installs in any view
    pub fn duplicate_count(&self) -> usize {
        self.views
            .iter()
            .map(|view| view.packages_with_duplicates().count())
            .sum()
    }
}

/// View representation of report metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadataView {
    /// Canonical project root
    pub project_root: String,
    /// RFC 3339 timestamp of the report
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
}

/// Resolutions for one platform (or `all`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformView {
    pub platform: String,
    pub packages: Vec<PackageView>,
}

impl PlatformView {
    pub fn packages_with_duplicates(&self) -> impl Iterator<Item = &PackageView> {
        self.packages.iter().filter(|p| !p.duplicates.is_empty())
    }
}

/// View representation of a canonical resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageView {
    pub name: String,
    /// Empty when the manifest declared no version
    pub version: String,
    pub path: String,
    pub origin_path: String,
    pub depth: usize,
    /// `recursive`, `search-path` or `local`
    pub source: String,
    /// Whether the package was reached through a symlink
    pub is_linked: bool,
    pub duplicates: Vec<DuplicateView>,
}

/// View representation of a non-canonical install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateView {
    pub version: String,
    pub path: String,
    pub origin_path: String,
    pub depth: usize,
    pub source: String,
}
