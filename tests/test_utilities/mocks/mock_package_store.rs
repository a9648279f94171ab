use async_trait::async_trait;
use autolink_resolver::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory package tree for testing
///
/// Directories, text files and symlinks live in maps keyed by absolute
/// path. Symlinks may point at directories anywhere in the tree, which is
/// enough to model pnpm's isolated layout. Manifest reads are counted so
/// tests can check that cached scans do not touch the tree again. Paths
/// registered with `with_error` fail every access with an I/O error.
#[derive(Default)]
pub struct MockPackageStore {
    dirs: BTreeSet<PathBuf>,
    files: HashMap<PathBuf, String>,
    links: HashMap<PathBuf, PathBuf>,
    failing: BTreeSet<PathBuf>,
    reads: AtomicUsize,
}

impl MockPackageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a package directory with a manifest declaring `dependencies`
    pub fn with_package(
        self,
        dir: &str,
        name: &str,
        version: &str,
        dependencies: &[(&str, &str)],
    ) -> Self {
        let deps: serde_json::Map<String, serde_json::Value> = dependencies
            .iter()
            .map(|(name, range)| (name.to_string(), serde_json::Value::from(*range)))
            .collect();
        let manifest = serde_json::json!({
            "name": name,
            "version": version,
            "dependencies": deps,
        });
        self.with_file(&format!("{}/package.json", dir), &manifest.to_string())
    }

    /// Adds `expo-module.config.json` declaring `platforms` to a package
    pub fn with_module_config(self, dir: &str, platforms: &[&str]) -> Self {
        let config = serde_json::json!({ "platforms": platforms });
        self.with_file(
            &format!("{}/expo-module.config.json", dir),
            &config.to_string(),
        )
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, content.to_string());
        self
    }

    /// Adds a symlink at `link` pointing to the directory `target`
    pub fn with_link(mut self, link: &str, target: &str) -> Self {
        let link = PathBuf::from(link);
        if let Some(parent) = link.parent() {
            self.add_dir(parent);
        }
        self.links.insert(link, PathBuf::from(target));
        self
    }

    /// Makes every access to `path` fail like a permission error
    pub fn with_error(mut self, path: &str) -> Self {
        self.failing.insert(normalize(Path::new(path)));
        self
    }

    /// Number of text files read so far
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn add_dir(&mut self, dir: &Path) {
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Follows symlinks on every prefix of `path`; `None` on a loop
    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        let mut current = normalize(path);
        for _ in 0..40 {
            let linked = current.ancestors().find_map(|ancestor| {
                self.links.get(ancestor).map(|target| {
                    let rest = current.strip_prefix(ancestor).unwrap_or(Path::new(""));
                    target.join(rest)
                })
            });
            match linked {
                Some(next) => current = normalize(&next),
                None => return Some(current),
            }
        }
        None
    }

    fn check_access(&self, path: &Path) -> Result<()> {
        let normalized = normalize(path);
        let real = self.resolve(path);
        if self.failing.contains(&normalized)
            || real.as_ref().is_some_and(|real| self.failing.contains(real))
        {
            anyhow::bail!("Permission denied: {}", path.display());
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains(path) || self.files.contains_key(path)
    }
}

/// Lexically removes `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[async_trait]
impl PackageStore for MockPackageStore {
    async fn real_path(&self, path: &Path) -> Result<Option<PathBuf>> {
        self.check_access(path)?;
        Ok(self.resolve(path).filter(|real| self.exists(real)))
    }

    async fn is_dir(&self, path: &Path) -> Result<bool> {
        self.check_access(path)?;
        Ok(self
            .resolve(path)
            .is_some_and(|real| self.dirs.contains(&real)))
    }

    async fn read_dir_names(&self, path: &Path) -> Result<Vec<String>> {
        self.check_access(path)?;
        let Some(dir) = self.resolve(path).filter(|real| self.dirs.contains(real)) else {
            return Ok(Vec::new());
        };

        let names: BTreeSet<String> = self
            .dirs
            .iter()
            .chain(self.files.keys())
            .chain(self.links.keys())
            .filter(|entry| entry.parent() == Some(dir.as_path()))
            .filter_map(|entry| entry.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        Ok(names.into_iter().collect())
    }

    async fn read_text_file(&self, path: &Path) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_access(path)?;
        Ok(self
            .resolve(path)
            .and_then(|real| self.files.get(&real).cloned()))
    }
}
