mod commands;
mod exit_code;
mod input;

use clap::{Parser, Subcommand};
use commands::analyze::{AnalyzeArgs, ThresholdOverrides};
use std::path::PathBuf;

pub use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "graphql-diagnostics")]
#[command(about = "Static performance diagnostics for GraphQL queries", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a diagnostics config file (searched for upwards when omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Only print triggered diagnostics and errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show non-triggered rules and the summary line
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every enabled diagnostic against a query
    Analyze {
        /// Query file to analyze, or `-` to read stdin
        #[arg(value_name = "QUERY_FILE", conflicts_with = "query")]
        query_file: Option<PathBuf>,

        /// Query text to analyze
        #[arg(short, long)]
        query: Option<String>,

        /// Schema SDL file; required for type-aware diagnostics
        #[arg(short, long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// JSON file with the request variables
        #[arg(long, value_name = "FILE", conflicts_with = "variables_json")]
        variables: Option<PathBuf>,

        /// Request variables as a JSON object
        #[arg(long, value_name = "JSON")]
        variables_json: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Depth at which `nestedQuery` triggers
        #[arg(long)]
        max_depth: Option<usize>,

        /// Selected fields per type above which `excessiveFieldsRule` triggers
        #[arg(long)]
        field_threshold: Option<usize>,

        /// Complexity above which `complexity` triggers
        #[arg(long)]
        max_complexity: Option<usize>,

        /// Pagination argument name for `unfilteredLists` (repeatable)
        #[arg(long = "pagination-arg", value_name = "NAME")]
        pagination_args: Vec<String>,
    },

    /// List the available rules
    Rules {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };

    match cli.command {
        Commands::Analyze {
            query_file,
            query,
            schema,
            variables,
            variables_json,
            format,
            max_depth,
            field_threshold,
            max_complexity,
            pagination_args,
        } => commands::analyze::run(
            cli.config,
            AnalyzeArgs {
                query_file,
                query,
                schema,
                variables,
                variables_json,
                overrides: ThresholdOverrides {
                    max_depth,
                    field_threshold,
                    max_complexity,
                    pagination_args,
                },
            },
            format,
            output_opts,
        ),
        Commands::Rules { format } => commands::rules::run(cli.config, format),
    }
}

/// Log to stderr, filtered by `RUST_LOG` and silent by default
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}
