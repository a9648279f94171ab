//! Builder for constructing ResolutionReadModel from a use case response

use super::resolution_read_model::{
    DuplicateView, PackageView, PlatformView, ReportMetadataView, ResolutionReadModel,
};
use crate::application::dto::ResolveResponse;
use crate::autolinking::domain::DependencyResolution;
use chrono::{DateTime, SecondsFormat, Utc};

const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builder for constructing ResolutionReadModel from domain objects
pub struct ResolutionReadModelBuilder;

impl ResolutionReadModelBuilder {
    /// Builds the read model with the current time as report timestamp
    pub fn build(response: &ResolveResponse) -> ResolutionReadModel {
        Self::build_at(response, Utc::now())
    }

    /// Builds the read model with a fixed report timestamp
    pub fn build_at(response: &ResolveResponse, generated_at: DateTime<Utc>) -> ResolutionReadModel {
        let metadata = ReportMetadataView {
            project_root: response.project_root.display().to_string(),
            timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            tool_name: TOOL_NAME.to_string(),
            tool_version: TOOL_VERSION.to_string(),
        };

        let views = response
            .views
            .iter()
            .map(|view| PlatformView {
                platform: view.label().to_string(),
                packages: view.resolutions.iter().map(Self::build_package).collect(),
            })
            .collect();

        ResolutionReadModel { metadata, views }
    }

    fn build_package(resolution: &DependencyResolution) -> PackageView {
        PackageView {
            name: resolution.name().to_string(),
            version: resolution.version().to_string(),
            path: resolution.path().display().to_string(),
            origin_path: resolution.origin_path().display().to_string(),
            depth: resolution.depth(),
            source: resolution.source().as_str().to_string(),
            is_linked: resolution.is_linked(),
            duplicates: resolution
                .duplicates()
                .iter()
                .map(|duplicate| DuplicateView {
                    version: duplicate.version().to_string(),
                    path: duplicate.path().display().to_string(),
                    origin_path: duplicate.origin_path().display().to_string(),
                    depth: duplicate.depth(),
                    source: duplicate.source().as_str().to_string(),
                })
                .collect(),
        }
    }
}
