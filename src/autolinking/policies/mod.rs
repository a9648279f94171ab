pub mod dependency_filter;
pub mod duplicate_policy;

pub use dependency_filter::{DependencyFilter, DependencyPolicy};
pub use duplicate_policy::DuplicatePolicy;
