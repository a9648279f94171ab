use crate::application::dto::{PlatformResolutions, ResolveRequest, ResolveResponse};
use crate::application::linker::CachedDependenciesLinker;
use crate::autolinking::domain::{DependencyResolution, Platform, ResolutionResult};
use crate::ports::outbound::{PackageStore, ProgressReporter};
use crate::shared::error::ResolverError;
use crate::shared::security::validate_project_directory;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// ResolveDependenciesUseCase - resolves the autolinkable packages of a
/// project, once per requested platform
///
/// All views are computed through one `CachedDependenciesLinker`, so the
/// dependency tree is walked once no matter how many platforms are asked for.
///
/// # Type Parameters
/// * `S` - PackageStore implementation
/// * `PR` - ProgressReporter implementation
pub struct ResolveDependenciesUseCase<S: PackageStore, PR: ProgressReporter> {
    linker: CachedDependenciesLinker<S>,
    progress_reporter: PR,
}

impl<S: PackageStore, PR: ProgressReporter> ResolveDependenciesUseCase<S, PR> {
    pub fn new(linker: CachedDependenciesLinker<S>, progress_reporter: PR) -> Self {
        Self {
            linker,
            progress_reporter,
        }
    }

    pub fn linker(&self) -> &CachedDependenciesLinker<S> {
        &self.linker
    }

    pub async fn execute(&self, request: ResolveRequest) -> Result<ResolveResponse> {
        // Step 1: Validate and canonicalize the project directory
        let project_root = Self::project_root(&request.project_path)?;
        self.progress_reporter.report(&format!(
            "🔍 Scanning dependencies of {}...",
            project_root.display()
        ));

        // Step 2: Resolve one view per platform (or the unfiltered view)
        let targets: Vec<Option<Platform>> = if request.platforms.is_empty() {
            vec![None]
        } else {
            request.platforms.iter().copied().map(Some).collect()
        };

        let mut views = Vec::with_capacity(targets.len());
        for (index, target) in targets.iter().enumerate() {
            let mut resolutions = self
                .resolve_view(&project_root, *target, index, targets.len())
                .await?;

            // Step 3: Restrict to explicitly included names
            if !request.include.is_empty() {
                resolutions.retain(|resolution| {
                    request.include.iter().any(|name| name == resolution.name())
                });
            }

            views.push(PlatformResolutions::new(*target, resolutions));
        }

        // Step 4: Report the outcome
        let response = ResolveResponse::new(project_root, views);
        self.report_views(&response);
        self.report_duplicates(&response);
        self.progress_reporter.report_completion(&format!(
            "✅ Resolution complete: {} view(s), {} package(s) with duplicate installs",
            response.views.len(),
            response.duplicate_count()
        ));

        Ok(response)
    }

    fn project_root(project_path: &Path) -> Result<PathBuf> {
        validate_project_directory(project_path)?;
        let root = std::fs::canonicalize(project_path).map_err(|e| {
            ResolverError::InvalidProjectPath {
                path: project_path.to_path_buf(),
                reason: format!("Failed to canonicalize path: {}", e),
            }
        })?;
        Ok(root)
    }

    async fn resolve_view(
        &self,
        project_root: &Path,
        target: Option<Platform>,
        index: usize,
        total: usize,
    ) -> Result<ResolutionResult> {
        let label = target.map(|p| p.as_str()).unwrap_or("all");
        let message = format!("resolving {}", label);
        self.progress_reporter
            .report_progress(index, total, Some(message.as_str()));

        let resolutions = match target {
            Some(platform) => {
                self.linker
                    .resolutions_for_platform(project_root, platform)
                    .await?
            }
            None => self.linker.resolutions(project_root, None).await?,
        };

        self.progress_reporter
            .report_progress(index + 1, total, Some(label));
        Ok(resolutions)
    }

    fn report_views(&self, response: &ResolveResponse) {
        for view in &response.views {
            self.progress_reporter.report(&format!(
                "📦 {}: {} package(s) resolved",
                view.label(),
                view.resolutions.len()
            ));
        }
    }

    /// Warns once per duplicated name, even if several views contain it
    fn report_duplicates(&self, response: &ResolveResponse) {
        let mut reported: Vec<&str> = Vec::new();
        for view in &response.views {
            for resolution in view.resolutions.with_duplicates() {
                if reported.contains(&resolution.name()) {
                    continue;
                }
                reported.push(resolution.name());
                self.progress_reporter
                    .report_error(&Self::duplicate_warning(resolution));
            }
        }
    }

    fn duplicate_warning(resolution: &DependencyResolution) -> String {
        let mut message = format!(
            "⚠️  Warning: {} is installed in {} locations; using {} ({})",
            resolution.name(),
            resolution.duplicates().len() + 1,
            resolution.path().display(),
            display_version(resolution.version())
        );
        for duplicate in resolution.duplicates() {
            message.push_str(&format!(
                "\n   - {} ({})",
                duplicate.path().display(),
                display_version(duplicate.version())
            ));
        }
        message
    }
}

fn display_version(version: &str) -> &str {
    if version.is_empty() {
        "unknown version"
    } else {
        version
    }
}
