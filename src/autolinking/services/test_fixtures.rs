//! On-disk `node_modules` trees for scanner tests

use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes `<dir>/package.json` and returns `dir`
pub fn write_package(dir: &Path, name: &str, version: &str, dependencies: &[(&str, &str)]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let dependencies: Map<String, Value> = dependencies
        .iter()
        .map(|(name, range)| (name.to_string(), json!(range)))
        .collect();
    let manifest = json!({
        "name": name,
        "version": version,
        "dependencies": dependencies,
    });
    fs::write(dir.join("package.json"), manifest.to_string()).unwrap();
    dir.to_path_buf()
}

/// A temporary project with a root manifest
pub struct ProjectFixture {
    _dir: TempDir,
    root: PathBuf,
}

impl ProjectFixture {
    pub fn new(dependencies: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("app");
        write_package(&root, "app", "1.0.0", dependencies);
        Self { _dir: dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn node_modules(&self) -> PathBuf {
        self.root.join("node_modules")
    }

    /// Installs a package into the root `node_modules`
    pub fn install(&self, name: &str, version: &str, dependencies: &[(&str, &str)]) -> PathBuf {
        write_package(&self.node_modules().join(name), name, version, dependencies)
    }

    /// Writes a file relative to the project root
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}
