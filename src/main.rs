mod cli;

use autolink_resolver::adapters::outbound::console::StderrProgressReporter;
use autolink_resolver::adapters::outbound::filesystem::FileSystemPackageStore;
use autolink_resolver::application::dto::{OutputFormat, ResolveRequest};
use autolink_resolver::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use autolink_resolver::application::linker::{CachedDependenciesLinker, LinkerOptions};
use autolink_resolver::application::read_models::ResolutionReadModelBuilder;
use autolink_resolver::application::use_cases::ResolveDependenciesUseCase;
use autolink_resolver::autolinking::domain::Platform;
use autolink_resolver::autolinking::policies::{DependencyFilter, DependencyPolicy};
use autolink_resolver::autolinking::services::DEFAULT_MAX_DEPTH;
use autolink_resolver::config::{self, ConfigFile};
use autolink_resolver::shared::error::ExitCode;
use autolink_resolver::shared::Result;
use cli::Args;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Effective settings after merging CLI arguments over the config file
#[derive(Debug, PartialEq)]
struct Settings {
    project_path: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    platforms: Vec<Platform>,
    include: Vec<String>,
    linker_options: LinkerOptions,
    fail_on_duplicates: bool,
    dependency_policy: DependencyPolicy,
}

impl Settings {
    /// CLI values win; list flags replace the config list when given at all
    fn merge(args: Args, config: ConfigFile) -> Result<Self> {
        let config_format = config.output_format()?;
        let config_platforms = config.parsed_platforms()?;

        let max_depth = match args.max_depth {
            Some(depth) => usize::try_from(depth)?,
            None => config.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        };

        Ok(Self {
            project_path: args.path.unwrap_or_else(|| PathBuf::from(".")),
            format: args.format.or(config_format).unwrap_or_default(),
            output: args.output,
            platforms: prefer_cli(args.platforms, config_platforms),
            include: prefer_cli(args.include, config.include),
            linker_options: LinkerOptions {
                search_paths: prefer_cli(args.search_paths, config.search_paths),
                exclude: prefer_cli(args.exclude, config.exclude),
                max_depth,
            },
            fail_on_duplicates: args.fail_on_duplicates
                || config.fail_on_duplicates.unwrap_or(false),
            dependency_policy: config.dependency_policy.unwrap_or_default(),
        })
    }
}

fn prefer_cli<T>(cli: Vec<T>, config: Option<Vec<T>>) -> Vec<T> {
    if cli.is_empty() {
        config.unwrap_or_default()
    } else {
        cli
    }
}

/// Loads the explicit config, or discovers one in the project directory
fn load_config(args: &Args) -> Result<ConfigFile> {
    if args.no_config {
        return Ok(ConfigFile::default());
    }

    if let Some(ref path) = args.config {
        let config = config::load_config_from_path(path)?;
        eprintln!("📄 Loaded config from: {}", path.display());
        return Ok(config);
    }

    let project_dir = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    match config::discover_config(&project_dir)? {
        Some(config) => {
            eprintln!(
                "📄 Auto-discovered config file: {}",
                project_dir.join(config::CONFIG_FILENAME).display()
            );
            Ok(config)
        }
        None => Ok(ConfigFile::default()),
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let settings = Settings::merge(args, config)?;

    // Create adapters (Dependency Injection)
    let filter = DependencyFilter::new(&settings.dependency_policy)?;
    let linker = CachedDependenciesLinker::new(
        FileSystemPackageStore::new(),
        filter,
        settings.linker_options.clone(),
    );
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = ResolveDependenciesUseCase::new(linker, progress_reporter);

    let request = ResolveRequest::builder()
        .project_path(settings.project_path.clone())
        .platforms(settings.platforms.iter().copied())
        .include(settings.include.iter().cloned())
        .build()?;

    // Execute use case
    let response = use_case.execute(request).await?;

    // Format output
    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let model = ResolutionReadModelBuilder::build(&response);
    let formatted_output = FormatterFactory::create(settings.format).format(&model)?;

    // Present output
    let presenter = PresenterFactory::create(PresenterType::from_output(settings.output.clone()));
    presenter.present(&formatted_output)?;

    if settings.fail_on_duplicates && response.has_duplicates() {
        return Ok(ExitCode::DuplicatesDetected);
    }
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["autolink-resolver"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_merge_defaults() {
        let settings = Settings::merge(args(&[]), ConfigFile::default()).unwrap();
        assert_eq!(settings.project_path, PathBuf::from("."));
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.platforms.is_empty());
        assert_eq!(settings.linker_options, LinkerOptions::default());
        assert!(!settings.fail_on_duplicates);
        assert_eq!(settings.dependency_policy, DependencyPolicy::default());
    }

    #[test]
    fn test_merge_config_values_apply() {
        let config = ConfigFile {
            format: Some("markdown".to_string()),
            platforms: Some(vec!["android".to_string()]),
            exclude: Some(vec!["expo-dev-client".to_string()]),
            max_depth: Some(5),
            fail_on_duplicates: Some(true),
            ..Default::default()
        };

        let settings = Settings::merge(args(&[]), config).unwrap();
        assert_eq!(settings.format, OutputFormat::Markdown);
        assert_eq!(settings.platforms, vec![Platform::Android]);
        assert_eq!(settings.linker_options.exclude, vec!["expo-dev-client".to_string()]);
        assert_eq!(settings.linker_options.max_depth, 5);
        assert!(settings.fail_on_duplicates);
    }

    #[test]
    fn test_merge_cli_overrides_config() {
        let config = ConfigFile {
            format: Some("markdown".to_string()),
            platforms: Some(vec!["android".to_string()]),
            search_paths: Some(vec![PathBuf::from("../config-packages")]),
            max_depth: Some(5),
            ..Default::default()
        };

        let settings = Settings::merge(
            args(&[
                "-f",
                "json",
                "--platform",
                "ios",
                "-s",
                "../packages",
                "--max-depth",
                "7",
            ]),
            config,
        )
        .unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.platforms, vec![Platform::Ios]);
        assert_eq!(
            settings.linker_options.search_paths,
            vec![PathBuf::from("../packages")]
        );
        assert_eq!(settings.linker_options.max_depth, 7);
    }

    #[test]
    fn test_load_config_no_config_ignores_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(config::CONFIG_FILENAME),
            "format: markdown\n",
        )
        .unwrap();

        let path = temp_dir.path().to_str().unwrap();
        let config = load_config(&args(&["-p", path, "--no-config"])).unwrap();
        assert!(config.format.is_none());

        let discovered = load_config(&args(&["-p", path])).unwrap();
        assert_eq!(discovered.format.as_deref(), Some("markdown"));
    }
}
