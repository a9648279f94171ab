use super::package_lookup::load_package;
use crate::autolinking::domain::{DependencyResolution, ResolutionResult, ResolutionSource};
use crate::autolinking::policies::DependencyFilter;
use crate::ports::outbound::PackageStore;
use crate::shared::Result;
use futures::future::join_all;
use std::path::{Path, PathBuf};

/// SearchPathScanner - lists the packages installed directly in one
/// `node_modules`-like directory
///
/// Nothing is descended except `@scope` directories. Hidden entries
/// (`.bin`, `.pnpm`, ...) are skipped. Every package found is a depth 0
/// resolution, recorded in lexicographic directory order.
pub struct SearchPathScanner<'a, S: PackageStore + ?Sized> {
    store: &'a S,
    filter: &'a DependencyFilter,
}

impl<'a, S: PackageStore + ?Sized> SearchPathScanner<'a, S> {
    pub fn new(store: &'a S, filter: &'a DependencyFilter) -> Self {
        Self { store, filter }
    }

    pub async fn scan(&self, search_path: &Path) -> Result<ResolutionResult> {
        let candidates = self.list_candidates(search_path).await?;

        let loads = candidates
            .into_iter()
            .map(|(name, origin_path)| async move {
                let package = load_package(self.store, origin_path).await?;
                Ok::<_, anyhow::Error>(package.map(|package| (name, package)))
            });
        let loaded = join_all(loads)
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        Ok(loaded
            .into_iter()
            .flatten()
            .map(|(name, package)| {
                DependencyResolution::new(
                    ResolutionSource::SearchPath,
                    name,
                    package.manifest.version(),
                    package.path,
                    package.origin_path,
                    0,
                )
            })
            .collect())
    }

    /// Package names and directories under `search_path`, after filtering
    async fn list_candidates(&self, search_path: &Path) -> Result<Vec<(String, PathBuf)>> {
        let mut candidates = Vec::new();

        for entry in self.store.read_dir_names(search_path).await? {
            if entry.starts_with('.') {
                continue;
            }
            let dir = search_path.join(&entry);

            if entry.starts_with('@') {
                if !self.store.is_dir(&dir).await? {
                    continue;
                }
                for scoped in self.store.read_dir_names(&dir).await? {
                    if scoped.starts_with('.') {
                        continue;
                    }
                    let name = format!("{}/{}", entry, scoped);
                    candidates.push((name, dir.join(&scoped)));
                }
            } else {
                candidates.push((entry, dir));
            }
        }

        candidates.retain(|(name, _)| self.filter.should_include(name));
        Ok(candidates)
    }
}
