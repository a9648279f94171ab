use super::node_module_paths::node_module_paths;
use crate::autolinking::domain::{
    ExpoModuleConfig, PackageManifest, MODULE_CONFIG_FILE, PACKAGE_JSON,
};
use crate::ports::outbound::PackageStore;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// A package directory located on disk together with its manifest
#[derive(Debug, Clone)]
pub struct LocatedPackage {
    /// Where the package was found (may be a symlink)
    pub origin_path: PathBuf,
    /// Canonical location
    pub path: PathBuf,
    pub manifest: PackageManifest,
}

/// Reads and parses `<dir>/package.json`; unreadable or malformed manifests
/// yield `None`
pub async fn read_manifest<S: PackageStore + ?Sized>(
    store: &S,
    dir: &Path,
) -> Result<Option<PackageManifest>> {
    let content = store.read_text_file(&dir.join(PACKAGE_JSON)).await?;
    Ok(content.as_deref().and_then(PackageManifest::parse))
}

/// Reads and parses `<dir>/expo-module.config.json`
pub async fn read_module_config<S: PackageStore + ?Sized>(
    store: &S,
    dir: &Path,
) -> Result<Option<ExpoModuleConfig>> {
    let content = store.read_text_file(&dir.join(MODULE_CONFIG_FILE)).await?;
    Ok(content.as_deref().and_then(ExpoModuleConfig::parse))
}

/// Loads the package at `origin_path`, resolving symlinks
pub async fn load_package<S: PackageStore + ?Sized>(
    store: &S,
    origin_path: PathBuf,
) -> Result<Option<LocatedPackage>> {
    let Some(path) = store.real_path(&origin_path).await? else {
        return Ok(None);
    };
    let Some(manifest) = read_manifest(store, &path).await? else {
        return Ok(None);
    };
    Ok(Some(LocatedPackage {
        origin_path,
        path,
        manifest,
    }))
}

/// Finds the install of `name` visible from package directory `from`
///
/// The first candidate of `node_module_paths` holding a readable manifest
/// wins.
pub async fn locate_package<S: PackageStore + ?Sized>(
    store: &S,
    from: &Path,
    name: &str,
) -> Result<Option<LocatedPackage>> {
    for candidate in node_module_paths(from, name) {
        if let Some(package) = load_package(store, candidate).await? {
            return Ok(Some(package));
        }
    }
    Ok(None)
}
