use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub const NODE_MODULES: &str = "node_modules";

/// Candidate install locations of `name` as seen from package directory
/// `from`, nearest first
///
/// Follows Node's lookup: `<dir>/node_modules/<name>` for `from` and each of
/// its ancestors, skipping ancestors that are themselves `node_modules`
/// directories. A nested install therefore shadows a hoisted one, and a
/// package living in pnpm's `.pnpm/<id>/node_modules/<pkg>` finds its
/// siblings in `.pnpm/<id>/node_modules`.
pub fn node_module_paths(from: &Path, name: &str) -> Vec<PathBuf> {
    from.ancestors()
        .filter(|dir| dir.file_name() != Some(OsStr::new(NODE_MODULES)))
        .map(|dir| dir.join(NODE_MODULES).join(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root_lookup() {
        let paths = node_module_paths(Path::new("/repo/app"), "expo");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/repo/app/node_modules/expo"),
                PathBuf::from("/repo/node_modules/expo"),
                PathBuf::from("/node_modules/expo"),
            ]
        );
    }

    #[test]
    fn test_nested_package_skips_node_modules_ancestors() {
        let paths = node_module_paths(Path::new("/app/node_modules/parent-a"), "child");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/app/node_modules/parent-a/node_modules/child"),
                PathBuf::from("/app/node_modules/child"),
                PathBuf::from("/node_modules/child"),
            ]
        );
    }

    #[test]
    fn test_pnpm_store_layout() {
        let from = Path::new("/app/node_modules/.pnpm/expo-camera@15.0.0/node_modules/expo-camera");
        let paths = node_module_paths(from, "@expo/config");
        assert_eq!(
            paths[1],
            PathBuf::from("/app/node_modules/.pnpm/expo-camera@15.0.0/node_modules/@expo/config")
        );
        assert!(paths.contains(&PathBuf::from("/app/node_modules/@expo/config")));
    }
}
