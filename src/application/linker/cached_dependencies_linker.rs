use crate::autolinking::domain::{
    AutolinkingOptions, Platform, ProjectConfig, ResolutionResult, PROJECT_CONFIG_FILE,
};
use crate::autolinking::policies::DependencyFilter;
use crate::autolinking::services::{
    read_manifest, read_module_config, LocalOverrideResolver, RecursiveScanner,
    SearchPathScanner, DEFAULT_MAX_DEPTH,
};
use crate::ports::outbound::PackageStore;
use crate::shared::Result;
use dashmap::DashMap;
use futures::future::join_all;
use std::path::{Path, PathBuf};

/// Invocation-level linking options, added on top of what each project's
/// manifest declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkerOptions {
    /// Extra flat directories to scan (relative paths resolve against the
    /// project root)
    pub search_paths: Vec<PathBuf>,
    /// Package names dropped from every view
    pub exclude: Vec<String>,
    pub max_depth: usize,
}

impl Default for LinkerOptions {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            exclude: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// CachedDependenciesLinker - platform-aware resolution with per-invocation
/// memoization
///
/// Several link steps of one invocation (one per platform) need the same
/// dependency graph. Every intermediate result is cached by value:
/// - recursive scan per project root
/// - each search path scan
/// - local overrides per project root
/// - autolinking options per (project root, platform)
/// - platform views per (project root, platform)
///
/// There is no invalidation: a linker lives exactly as long as the
/// invocation that owns it, and tests build fresh instances.
pub struct CachedDependenciesLinker<S: PackageStore> {
    store: S,
    filter: DependencyFilter,
    options: LinkerOptions,
    recursive_cache: DashMap<PathBuf, ResolutionResult>,
    search_path_cache: DashMap<PathBuf, ResolutionResult>,
    project_config_cache: DashMap<PathBuf, ResolutionResult>,
    options_cache: DashMap<(PathBuf, Option<Platform>), AutolinkingOptions>,
    platform_cache: DashMap<(PathBuf, Platform), ResolutionResult>,
}

impl<S: PackageStore> CachedDependenciesLinker<S> {
    pub fn new(store: S, filter: DependencyFilter, options: LinkerOptions) -> Self {
        Self {
            store,
            filter,
            options,
            recursive_cache: DashMap::new(),
            search_path_cache: DashMap::new(),
            project_config_cache: DashMap::new(),
            options_cache: DashMap::new(),
            platform_cache: DashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Canonical project root, so that `./app` and `/abs/app` share cache entries
    async fn project_root(&self, root: &Path) -> Result<PathBuf> {
        Ok(self
            .store
            .real_path(root)
            .await?
            .unwrap_or_else(|| root.to_path_buf()))
    }

    /// Autolinking options of the project for `platform` (or the base
    /// options when `None`), merged with the invocation options
    pub async fn options_for_platform(
        &self,
        root: &Path,
        platform: Option<Platform>,
    ) -> Result<AutolinkingOptions> {
        let root = self.project_root(root).await?;
        let key = (root.clone(), platform);
        if let Some(cached) = self.options_cache.get(&key) {
            return Ok(cached.clone());
        }

        let manifest = read_manifest(&self.store, &root).await?;
        let options = AutolinkingOptions::from_manifest_value(
            manifest.as_ref().and_then(|m| m.autolinking()),
            platform,
            &root,
        )
        .extend(&self.options.search_paths, &self.options.exclude, &root);

        self.options_cache.insert(key, options.clone());
        Ok(options)
    }

    /// Reads `react-native.config.json`; missing or malformed files give an
    /// empty config
    pub async fn load_project_config(&self, root: &Path) -> Result<ProjectConfig> {
        let content = self
            .store
            .read_text_file(&root.join(PROJECT_CONFIG_FILE))
            .await?;
        Ok(content
            .as_deref()
            .map(ProjectConfig::parse)
            .unwrap_or_default())
    }

    pub async fn scan_dependencies_from_project_config(
        &self,
        root: &Path,
    ) -> Result<ResolutionResult> {
        let root = self.project_root(root).await?;
        if let Some(cached) = self.project_config_cache.get(&root) {
            return Ok(cached.clone());
        }

        let config = self.load_project_config(&root).await?;
        let result = LocalOverrideResolver::new(&self.store, &self.filter)
            .resolve(&root, &config)
            .await?;

        self.project_config_cache.insert(root, result.clone());
        Ok(result)
    }

    pub async fn scan_dependencies_recursively(&self, root: &Path) -> Result<ResolutionResult> {
        let root = self.project_root(root).await?;
        if let Some(cached) = self.recursive_cache.get(&root) {
            return Ok(cached.clone());
        }

        let result = RecursiveScanner::new(&self.store, &self.filter)
            .with_max_depth(self.options.max_depth)
            .scan(&root)
            .await?;

        self.recursive_cache.insert(root, result.clone());
        Ok(result)
    }

    pub async fn scan_dependencies_in_search_path(
        &self,
        search_path: &Path,
    ) -> Result<ResolutionResult> {
        if let Some(cached) = self.search_path_cache.get(search_path) {
            return Ok(cached.clone());
        }

        let result = SearchPathScanner::new(&self.store, &self.filter)
            .scan(search_path)
            .await?;

        self.search_path_cache
            .insert(search_path.to_path_buf(), result.clone());
        Ok(result)
    }

    /// All resolutions of the project, before platform filtering
    ///
    /// Sources are merged in priority order: local overrides, then search
    /// paths in declaration order, then the recursive scan. Names listed in
    /// the platform's `exclude` option are dropped afterwards.
    pub async fn resolutions(
        &self,
        root: &Path,
        platform: Option<Platform>,
    ) -> Result<ResolutionResult> {
        let root = self.project_root(root).await?;
        let options = self.options_for_platform(&root, platform).await?;

        let mut sources = vec![self.scan_dependencies_from_project_config(&root).await?];
        for search_path in options.search_paths() {
            sources.push(self.scan_dependencies_in_search_path(search_path).await?);
        }
        sources.push(self.scan_dependencies_recursively(&root).await?);

        let mut merged = ResolutionResult::merge_all(sources);
        merged.retain(|resolution| !options.is_excluded(resolution.name()));
        Ok(merged)
    }

    /// Resolutions of the packages that can be linked into `platform`
    ///
    /// Keeps only packages whose `expo-module.config.json` declares support
    /// for the platform. Cached per (project root, platform).
    pub async fn resolutions_for_platform(
        &self,
        root: &Path,
        platform: Platform,
    ) -> Result<ResolutionResult> {
        let root = self.project_root(root).await?;
        let key = (root.clone(), platform);
        if let Some(cached) = self.platform_cache.get(&key) {
            return Ok(cached.clone());
        }

        let resolutions = self.resolutions(&root, Some(platform)).await?;
        let configs = join_all(
            resolutions
                .iter()
                .map(|resolution| read_module_config(&self.store, resolution.path())),
        )
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

        let result: ResolutionResult = resolutions
            .into_iter()
            .zip(configs)
            .filter(|(_, config)| {
                config
                    .as_ref()
                    .is_some_and(|config| config.supports_platform(platform))
            })
            .map(|(resolution, _)| resolution)
            .collect();

        self.platform_cache.insert(key, result.clone());
        Ok(result)
    }
}
