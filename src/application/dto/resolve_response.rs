use crate::autolinking::domain::{Platform, ResolutionResult};
use std::path::PathBuf;

/// Resolutions for one view of the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformResolutions {
    /// `None` for the unfiltered view
    pub platform: Option<Platform>,
    pub resolutions: ResolutionResult,
}

impl PlatformResolutions {
    pub fn new(platform: Option<Platform>, resolutions: ResolutionResult) -> Self {
        Self {
            platform,
            resolutions,
        }
    }

    /// `"all"` for the unfiltered view, the platform name otherwise
    pub fn label(&self) -> &'static str {
        self.platform.map(|p| p.as_str()).unwrap_or("all")
    }
}

/// ResolveResponse - response DTO of the dependency resolution use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveResponse {
    /// Canonical project root
    pub project_root: PathBuf,
    /// One entry per requested platform, in request order
    pub views: Vec<PlatformResolutions>,
}

impl ResolveResponse {
    pub fn new(project_root: PathBuf, views: Vec<PlatformResolutions>) -> Self {
        Self {
            project_root,
            views,
        }
    }

    pub fn has_duplicates(&self) -> bool {
        self.duplicate_count() > 0
    }

    /// Number of distinct package names with duplicate installs, across views
    pub fn duplicate_count(&self) -> usize {
        let mut names: Vec<&str> = self
            .views
            .iter()
            .flat_map(|view| view.resolutions.with_duplicates())
            .map(|resolution| resolution.name())
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }
}
