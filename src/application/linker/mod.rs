/// Platform-aware, memoizing front of the autolinking scanners
mod cached_dependencies_linker;

pub use cached_dependencies_linker::{CachedDependenciesLinker, LinkerOptions};
