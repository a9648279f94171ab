use super::package_lookup::{locate_package, read_manifest, LocatedPackage};
use crate::autolinking::domain::{DependencyResolution, ResolutionResult, ResolutionSource};
use crate::autolinking::policies::DependencyFilter;
use crate::ports::outbound::PackageStore;
use crate::shared::Result;
use futures::future::join_all;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Maximum dependency depth walked before the scan is truncated
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// A package whose dependencies still have to be looked up
struct QueueEntry {
    /// Canonical package directory; lookups start here
    path: PathBuf,
    dependencies: Vec<String>,
}

/// RecursiveScanner - walks the dependency tree of a project
///
/// The walk is breadth first and processes one depth level at a time. All
/// lookups of a level run concurrently, then their results are recorded in
/// queue order, so the first install found for a name is always the
/// shallowest one and ties go to the earlier declaration.
///
/// Each real path is descended at most once, which breaks symlink cycles.
/// The same name found at another real path is recorded as a duplicate and
/// still descended, since its own dependencies may differ.
pub struct RecursiveScanner<'a, S: PackageStore + ?Sized> {
    store: &'a S,
    filter: &'a DependencyFilter,
    max_depth: usize,
}

impl<'a, S: PackageStore + ?Sized> RecursiveScanner<'a, S> {
    pub fn new(store: &'a S, filter: &'a DependencyFilter) -> Self {
        Self {
            store,
            filter,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Scans the dependencies declared by the project at `project_root`
    ///
    /// A root without a readable manifest yields an empty result.
    pub async fn scan(&self, project_root: &Path) -> Result<ResolutionResult> {
        let mut result = ResolutionResult::new();

        let Some(root) = self.store.real_path(project_root).await? else {
            return Ok(result);
        };
        let Some(manifest) = read_manifest(self.store, &root).await? else {
            return Ok(result);
        };

        let mut visited: HashSet<PathBuf> = HashSet::from([root.clone()]);
        let mut level = vec![QueueEntry {
            path: root.clone(),
            dependencies: self.included(manifest.root_dependency_names()),
        }];
        let mut depth = 0;

        while !level.is_empty() {
            if depth >= self.max_depth {
                eprintln!(
                    "Warning: Maximum dependency depth ({}) reached. \
                     {} package(s) were not descended; results may be incomplete.",
                    self.max_depth,
                    level.len()
                );
                break;
            }

            let lookups = level.iter().map(|entry| self.locate_dependencies(entry));
            let found = join_all(lookups)
                .await
                .into_iter()
                .collect::<Result<Vec<_>>>()?;

            let mut next_level = Vec::new();
            for (name, package) in found.into_iter().flatten() {
                if package.path == root {
                    continue;
                }

                let LocatedPackage {
                    origin_path,
                    path,
                    manifest,
                } = package;
                result.record(DependencyResolution::new(
                    ResolutionSource::RecursiveResolution,
                    name,
                    manifest.version(),
                    path.clone(),
                    origin_path,
                    depth,
                ));

                if visited.insert(path.clone()) {
                    next_level.push(QueueEntry {
                        path,
                        dependencies: self.included(manifest.dependency_names()),
                    });
                }
            }

            level = next_level;
            depth += 1;
        }

        Ok(result)
    }

    /// Looks up every dependency of `entry` concurrently, keeping
    /// declaration order and dropping names with no install
    async fn locate_dependencies(&self, entry: &QueueEntry) -> Result<Vec<(String, LocatedPackage)>> {
        let lookups = entry.dependencies.iter().map(|name| async move {
            let package = locate_package(self.store, &entry.path, name).await?;
            Ok::<_, anyhow::Error>(package.map(|package| (name.clone(), package)))
        });

        let found = join_all(lookups)
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        Ok(found.into_iter().flatten().collect())
    }

    fn included(&self, names: Vec<String>) -> Vec<String> {
        names
            .into_iter()
            .filter(|name| self.filter.should_include(name))
            .collect()
    }
}
