/// Mock implementations for testing
mod mock_package_store;
mod mock_progress_reporter;

pub use mock_package_store::MockPackageStore;
pub use mock_progress_reporter::MockProgressReporter;
