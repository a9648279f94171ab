use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes `<dir>/package.json` declaring `dependencies`
pub fn write_package(dir: &Path, name: &str, version: &str, dependencies: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    let deps: serde_json::Map<String, serde_json::Value> = dependencies
        .iter()
        .map(|(name, range)| (name.to_string(), serde_json::Value::from(*range)))
        .collect();
    let manifest = serde_json::json!({
        "name": name,
        "version": version,
        "dependencies": deps,
    });
    fs::write(dir.join("package.json"), manifest.to_string()).unwrap();
}

/// Writes `<dir>/expo-module.config.json` declaring `platforms`
pub fn write_module_config(dir: &Path, platforms: &[&str]) {
    let config = serde_json::json!({ "platforms": platforms });
    fs::write(dir.join("expo-module.config.json"), config.to_string()).unwrap();
}

/// A project directory `app/` inside a temporary directory
pub struct TestProject {
    // Kept alive for the lifetime of the project
    temp_dir: TempDir,
    root: PathBuf,
}

impl TestProject {
    pub fn new(dependencies: &[(&str, &str)]) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("app");
        write_package(&root, "app", "1.0.0", dependencies);
        Self { temp_dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory next to the project, outside its `node_modules`
    pub fn outside(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Installs a package at `node_modules/<name>` and returns its directory
    pub fn install(&self, name: &str, version: &str, dependencies: &[(&str, &str)]) -> PathBuf {
        let dir = self.root.join("node_modules").join(name);
        write_package(&dir, name, version, dependencies);
        dir
    }

    /// Installs a native module supporting `platforms`
    pub fn install_module(&self, name: &str, platforms: &[&str]) -> PathBuf {
        let dir = self.install(name, "1.0.0", &[]);
        write_module_config(&dir, platforms);
        dir
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path_str(&self) -> &str {
        self.root.to_str().unwrap()
    }
}
