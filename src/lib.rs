//! autolink-resolver - native module dependency resolution for React Native / Expo projects
//!
//! This library walks a project's `node_modules` tree the way Node resolves
//! packages, and reports which packages are autolinked, per platform,
//! following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`autolinking`): resolution models, inclusion and duplicate policies, scanners
//! - **Application Layer** (`application`): the caching linker, use cases and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use autolink_resolver::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let linker = CachedDependenciesLinker::new(
//!     FileSystemPackageStore::new(),
//!     DependencyFilter::with_defaults(),
//!     LinkerOptions::default(),
//! );
//! let use_case = ResolveDependenciesUseCase::new(linker, StderrProgressReporter::new());
//!
//! let request = ResolveRequest::builder()
//!     .project_path(".")
//!     .platform(Platform::Ios)
//!     .build()?;
//! let response = use_case.execute(request).await?;
//!
//! let model = ResolutionReadModelBuilder::build(&response);
//! println!("{}", JsonFormatter::new().format(&model)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod autolinking;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemPackageStore, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{
        OutputFormat, PlatformResolutions, ResolveRequest, ResolveResponse,
    };
    pub use crate::application::linker::{CachedDependenciesLinker, LinkerOptions};
    pub use crate::application::read_models::{ResolutionReadModel, ResolutionReadModelBuilder};
    pub use crate::application::use_cases::ResolveDependenciesUseCase;
    pub use crate::autolinking::domain::{
        DependencyResolution, Platform, ResolutionResult, ResolutionSource,
    };
    pub use crate::autolinking::policies::{DependencyFilter, DependencyPolicy};
    pub use crate::ports::outbound::{
        OutputPresenter, PackageStore, ProgressReporter, ResolutionFormatter,
    };
    pub use crate::shared::Result;
}
