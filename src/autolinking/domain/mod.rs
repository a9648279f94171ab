pub mod autolinking_options;
pub mod dependency_resolution;
pub mod module_config;
pub mod package_manifest;
pub mod platform;
pub mod project_config;
pub mod resolution_result;

pub use autolinking_options::AutolinkingOptions;
pub use dependency_resolution::{DependencyResolution, ResolutionSource};
pub use module_config::{ExpoModuleConfig, MODULE_CONFIG_FILE};
pub use package_manifest::{is_valid_dependency_name, PackageManifest, PACKAGE_JSON};
pub use platform::Platform;
pub use project_config::{LocalDependencyConfig, ProjectConfig, PROJECT_CONFIG_FILE};
pub use resolution_result::{Discovery, ResolutionResult};
