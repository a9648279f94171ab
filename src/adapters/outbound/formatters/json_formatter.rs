use crate::application::read_models::{
    DuplicateView, PackageView, ReportMetadataView, ResolutionReadModel,
};
use crate::ports::outbound::ResolutionFormatter;
use crate::shared::Result;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    project_root: String,
    generated_at: String,
    tool: Tool,
    /// platform label → package name → resolution
    views: IndexMap<String, IndexMap<String, Resolution>>,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Resolution {
    source: String,
    name: String,
    version: String,
    path: String,
    origin_path: String,
    depth: usize,
    duplicates: Option<Vec<Duplicate>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Duplicate {
    source: String,
    name: String,
    version: String,
    path: String,
    origin_path: String,
    depth: usize,
}

/// JsonFormatter adapter for machine-readable resolution reports
///
/// Each view maps package names to resolutions in discovery order.
/// `duplicates` is `null` when the package has a single install.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn build_tool(metadata: &ReportMetadataView) -> Tool {
        Tool {
            name: metadata.tool_name.clone(),
            version: metadata.tool_version.clone(),
        }
    }

    fn build_resolution(package: &PackageView) -> Resolution {
        let duplicates = if package.duplicates.is_empty() {
            None
        } else {
            Some(
                package
                    .duplicates
                    .iter()
                    .map(|d| Self::build_duplicate(&package.name, d))
                    .collect(),
            )
        };

        Resolution {
            source: package.source.clone(),
            name: package.name.clone(),
            version: package.version.clone(),
            path: package.path.clone(),
            origin_path: package.origin_path.clone(),
            depth: package.depth,
            duplicates,
        }
    }

    fn build_duplicate(name: &str, duplicate: &DuplicateView) -> Duplicate {
        Duplicate {
            source: duplicate.source.clone(),
            name: name.to_string(),
            version: duplicate.version.clone(),
            path: duplicate.path.clone(),
            origin_path: duplicate.origin_path.clone(),
            depth: duplicate.depth,
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionFormatter for JsonFormatter {
    fn format(&self, model: &ResolutionReadModel) -> Result<String> {
        let views = model
            .views
            .iter()
            .map(|view| {
                let packages = view
                    .packages
                    .iter()
                    .map(|package| (package.name.clone(), Self::build_resolution(package)))
                    .collect();
                (view.platform.clone(), packages)
            })
            .collect();

        let report = Report {
            project_root: model.metadata.project_root.clone(),
            generated_at: model.metadata.timestamp.clone(),
            tool: Self::build_tool(&model.metadata),
            views,
        };

        let mut output = serde_json::to_string_pretty(&report)?;
        output.push('\n');
        Ok(output)
    }
}
