use crate::application::read_models::{PackageView, PlatformView, ResolutionReadModel};
use crate::ports::outbound::ResolutionFormatter;
use crate::shared::Result;

/// Markdown table header for resolved packages
const TABLE_HEADER: &str = "| Package | Version | Depth | Source | Path |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|---------|---------|-------|--------|------|\n";

/// Markdown table header for duplicate installs
const DUPLICATE_TABLE_HEADER: &str = "| Package | Version | Depth | Path | Status |\n";

/// Markdown table separator line for duplicate installs
const DUPLICATE_TABLE_SEPARATOR: &str = "|---------|---------|-------|------|--------|\n";

/// MarkdownFormatter adapter for human-readable resolution reports
///
/// Renders one package table per platform view, followed by a duplicate
/// section for views that have conflicting installs.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn code_cell(text: &str) -> String {
        format!("`{}`", Self::escape_markdown_table_cell(text))
    }

    fn version_cell(version: &str) -> String {
        if version.is_empty() {
            "N/A".to_string()
        } else {
            Self::escape_markdown_table_cell(version)
        }
    }

    /// Path column; symlinked installs also show where they were found
    fn path_cell(package: &PackageView) -> String {
        if package.is_linked {
            format!(
                "{} → {}",
                Self::code_cell(&package.origin_path),
                Self::code_cell(&package.path)
            )
        } else {
            Self::code_cell(&package.path)
        }
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, model: &ResolutionReadModel) {
        output.push_str("# Autolinking Dependency Resolution\n\n");
        output.push_str(&format!(
            "- Project: {}\n",
            Self::code_cell(&model.metadata.project_root)
        ));
        output.push_str(&format!("- Generated: {}\n", model.metadata.timestamp));
        output.push_str(&format!(
            "- Tool: {} {}\n\n",
            model.metadata.tool_name, model.metadata.tool_version
        ));
    }

    fn render_view(&self, output: &mut String, view: &PlatformView) {
        output.push_str(&format!("## Platform: {}\n\n", view.platform));

        if view.packages.is_empty() {
            output.push_str("No packages resolved.\n\n");
            return;
        }

        output.push_str(&format!(
            "{} package(s) resolved.\n\n",
            view.packages.len()
        ));
        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for package in &view.packages {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&package.name),
                Self::version_cell(&package.version),
                package.depth,
                package.source,
                Self::path_cell(package)
            ));
        }
        output.push('\n');

        self.render_duplicates(output, view);
    }

    fn render_duplicates(&self, output: &mut String, view: &PlatformView) {
        let duplicated: Vec<&PackageView> = view.packages_with_duplicates().collect();
        if duplicated.is_empty() {
            return;
        }

        output.push_str(&format!("### Duplicate installs ({})\n\n", view.platform));
        output.push_str(
            "These packages are installed at more than one location. Only the canonical install is linked.\n\n",
        );
        output.push_str(DUPLICATE_TABLE_HEADER);
        output.push_str(DUPLICATE_TABLE_SEPARATOR);

        for package in duplicated {
            let name = Self::escape_markdown_table_cell(&package.name);
            output.push_str(&format!(
                "| {} | {} | {} | {} | canonical |\n",
                name,
                Self::version_cell(&package.version),
                package.depth,
                Self::code_cell(&package.path)
            ));
            for duplicate in &package.duplicates {
                output.push_str(&format!(
                    "| {} | {} | {} | {} | ignored |\n",
                    name,
                    Self::version_cell(&duplicate.version),
                    duplicate.depth,
                    Self::code_cell(&duplicate.path)
                ));
            }
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionFormatter for MarkdownFormatter {
    fn format(&self, model: &ResolutionReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, model);
        for view in &model.views {
            self.render_view(&mut output, view);
        }

        Ok(output)
    }
}
