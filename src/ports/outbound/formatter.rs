use crate::application::read_models::ResolutionReadModel;
use crate::shared::Result;

/// ResolutionFormatter port for rendering a resolution report
///
/// Implemented once per output format (JSON, Markdown).
pub trait ResolutionFormatter {
    /// Formats the report read model
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &ResolutionReadModel) -> Result<String>;
}
