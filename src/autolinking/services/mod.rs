mod local_override_resolver;
pub mod node_module_paths;
pub mod package_lookup;
mod recursive_scanner;
mod search_path_scanner;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use local_override_resolver::LocalOverrideResolver;
pub use node_module_paths::node_module_paths;
pub use package_lookup::{read_manifest, read_module_config};
pub use recursive_scanner::{RecursiveScanner, DEFAULT_MAX_DEPTH};
pub use search_path_scanner::SearchPathScanner;
