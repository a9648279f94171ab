/// Filesystem adapters for file I/O operations
mod file_writer;
mod package_store;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use package_store::FileSystemPackageStore;
