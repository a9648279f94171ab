use super::package_lookup::read_manifest;
use crate::autolinking::domain::{
    DependencyResolution, ProjectConfig, ResolutionResult, ResolutionSource,
};
use crate::autolinking::policies::DependencyFilter;
use crate::ports::outbound::PackageStore;
use crate::shared::Result;
use std::path::Path;

/// LocalOverrideResolver - resolves dependencies declared with an explicit
/// root in the project config
///
/// Entries are resolved relative to the project root. A root that does not
/// exist (or is not a directory) is dropped without error; a root without a
/// manifest still resolves, with an empty version.
pub struct LocalOverrideResolver<'a, S: PackageStore + ?Sized> {
    store: &'a S,
    filter: &'a DependencyFilter,
}

impl<'a, S: PackageStore + ?Sized> LocalOverrideResolver<'a, S> {
    pub fn new(store: &'a S, filter: &'a DependencyFilter) -> Self {
        Self { store, filter }
    }

    pub async fn resolve(
        &self,
        project_root: &Path,
        config: &ProjectConfig,
    ) -> Result<ResolutionResult> {
        let mut result = ResolutionResult::new();

        for (name, dependency) in config.dependencies() {
            if !self.filter.should_include(name) {
                continue;
            }
            let Some(root) = dependency.root() else {
                continue;
            };

            let origin_path = project_root.join(root);
            let Some(path) = self.store.real_path(&origin_path).await? else {
                continue;
            };
            if !self.store.is_dir(&path).await? {
                continue;
            }

            let version = read_manifest(self.store, &path)
                .await?
                .map(|manifest| manifest.version().to_string())
                .unwrap_or_default();

            result.record(DependencyResolution::new(
                ResolutionSource::ProjectConfigLocal,
                name,
                version,
                path,
                origin_path,
                0,
            ));
        }

        Ok(result)
    }
}
