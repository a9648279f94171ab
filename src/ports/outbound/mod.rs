/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, output).
pub mod formatter;
pub mod output_presenter;
pub mod package_store;
pub mod progress_reporter;

pub use formatter::ResolutionFormatter;
pub use output_presenter::OutputPresenter;
pub use package_store::PackageStore;
pub use progress_reporter::ProgressReporter;
