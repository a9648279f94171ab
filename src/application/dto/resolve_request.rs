use crate::autolinking::domain::Platform;
use crate::shared::error::ResolverError;
use crate::shared::Result;
use std::path::PathBuf;

/// ResolveRequest - request DTO for the dependency resolution use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Project directory containing the root package.json
    pub project_path: PathBuf,
    /// Platforms to produce a view for; empty means one unfiltered view
    pub platforms: Vec<Platform>,
    /// When non-empty, only these package names are reported
    pub include: Vec<String>,
}

impl ResolveRequest {
    pub fn new(project_path: PathBuf, platforms: Vec<Platform>, include: Vec<String>) -> Self {
        Self {
            project_path,
            platforms,
            include,
        }
    }

    pub fn builder() -> ResolveRequestBuilder {
        ResolveRequestBuilder::default()
    }
}

/// Builder for `ResolveRequest`
///
/// Platforms are deduplicated while keeping their first position.
#[derive(Debug, Default)]
pub struct ResolveRequestBuilder {
    project_path: Option<PathBuf>,
    platforms: Vec<Platform>,
    include: Vec<String>,
}

impl ResolveRequestBuilder {
    pub fn project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        if !self.platforms.contains(&platform) {
            self.platforms.push(platform);
        }
        self
    }

    pub fn platforms(self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        platforms
            .into_iter()
            .fold(self, |builder, platform| builder.platform(platform))
    }

    pub fn include(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.include.extend(names);
        self
    }

    /// # Errors
    /// Returns `ResolverError::Validation` if no project path was given
    pub fn build(self) -> Result<ResolveRequest> {
        let project_path = self.project_path.ok_or_else(|| ResolverError::Validation {
            message: "project_path is required".to_string(),
        })?;
        Ok(ResolveRequest::new(project_path, self.platforms, self.include))
    }
}
