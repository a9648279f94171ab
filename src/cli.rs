use autolink_resolver::application::dto::OutputFormat;
use autolink_resolver::autolinking::domain::Platform;
use clap::Parser;
use std::path::PathBuf;

/// Resolve the native modules a React Native / Expo project autolinks
///
/// Values given on the command line take precedence over the config file,
/// which takes precedence over the built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "autolink-resolver")]
#[command(version)]
#[command(
    about = "Resolve autolinkable native modules of a React Native / Expo project",
    long_about = None
)]
pub struct Args {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Output format: json or markdown [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Platform to resolve for; repeat for several views.
    /// Without it a single unfiltered view is produced
    #[arg(long = "platform", value_name = "PLATFORM")]
    pub platforms: Vec<Platform>,

    /// Package names excluded from every view.
    /// Can be specified multiple times: -e expo-dev-client -e expo-updates
    #[arg(short, long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Extra directory whose packages are linked directly
    #[arg(short, long = "search-path", value_name = "DIR")]
    pub search_paths: Vec<PathBuf>,

    /// Only report these package names
    #[arg(short, long = "include", value_name = "NAME")]
    pub include: Vec<String>,

    /// Maximum depth of the recursive node_modules walk [default: 100]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_depth: Option<u64>,

    /// Exit with code 1 when a package is installed in more than one location
    #[arg(long)]
    pub fail_on_duplicates: bool,

    /// Path to a config file (defaults to autolink-resolver.config.yml in the project)
    #[arg(short, long, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long)]
    pub no_config: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
