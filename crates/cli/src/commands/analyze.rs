use crate::commands::fail;
use crate::input;
use crate::{ExitCode, OutputFormat, OutputOptions};
use anyhow::Result;
use colored::Colorize;
use graphql_diagnostics::{AnalysisReport, DiagnosticsEngine, RuleResult, SchemaIndex, Variables};
use graphql_diagnostics_config::DiagnosticsConfig;
use std::path::PathBuf;

/// Inputs of one `analyze` invocation
#[derive(Debug, Default)]
pub struct AnalyzeArgs {
    pub query_file: Option<PathBuf>,
    pub query: Option<String>,
    pub schema: Option<PathBuf>,
    pub variables: Option<PathBuf>,
    pub variables_json: Option<String>,
    pub overrides: ThresholdOverrides,
}

/// Threshold flags layered over the config file
#[derive(Debug, Default, Clone)]
pub struct ThresholdOverrides {
    pub max_depth: Option<usize>,
    pub field_threshold: Option<usize>,
    pub max_complexity: Option<usize>,
    pub pagination_args: Vec<String>,
}

impl ThresholdOverrides {
    pub fn apply(&self, config: &mut DiagnosticsConfig) {
        if let Some(max_depth) = self.max_depth {
            config.set_option("nestedQuery", "max_depth", max_depth.into());
        }
        if let Some(threshold) = self.field_threshold {
            config.set_option("excessiveFieldsRule", "threshold", threshold.into());
        }
        if let Some(max) = self.max_complexity {
            config.set_option("complexity", "max_complexity", max.into());
        }
        if !self.pagination_args.is_empty() {
            config.set_option(
                "unfilteredLists",
                "pagination_arguments",
                self.pagination_args.clone().into(),
            );
        }
    }
}

#[tracing::instrument(skip_all, fields(query_file = ?args.query_file, schema = ?args.schema))]
pub fn run(
    config_path: Option<PathBuf>,
    args: AnalyzeArgs,
    format: OutputFormat,
    output_opts: OutputOptions,
) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut config = input::load_diagnostics_config(config_path.as_deref(), &cwd)
        .unwrap_or_else(|e| fail(format, ExitCode::ConfigError, &e));
    args.overrides.apply(&mut config);

    let engine = DiagnosticsEngine::from_config(&config)
        .unwrap_or_else(|e| fail(format, ExitCode::ConfigError, &anyhow::Error::from(e)));

    let query = input::read_query(args.query_file.as_deref(), args.query)
        .unwrap_or_else(|e| fail(format, ExitCode::IoError, &e));

    let variables = load_variables(args.variables, args.variables_json.as_deref(), format);

    let schema: Option<SchemaIndex> = args.schema.map(|path| {
        let sdl = input::read_schema_sdl(&path).unwrap_or_else(|e| fail(format, ExitCode::IoError, &e));
        input::build_schema(&sdl, &path).unwrap_or_else(|e| fail(format, ExitCode::SchemaError, &e))
    });

    let report = engine.analyze_all(&query, &variables, schema.as_ref());
    tracing::info!(
        rules = report.len(),
        triggered = report.triggered_rules().count(),
        "Analysis completed"
    );

    match format {
        OutputFormat::Human => print!("{}", render_human(&report, output_opts)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn load_variables(file: Option<PathBuf>, inline: Option<&str>, format: OutputFormat) -> Variables {
    let json = match (file, inline) {
        (_, Some(json)) => json.to_string(),
        (Some(path), None) => input::read_variables_file(&path)
            .unwrap_or_else(|e| fail(format, ExitCode::IoError, &e)),
        (None, None) => return Variables::new(),
    };

    input::parse_variables(&json).unwrap_or_else(|e| fail(format, ExitCode::ParseError, &e))
}

/// Render a report for the terminal.
///
/// With `show_info` off only triggered rules are listed and the summary is
/// dropped.
pub fn render_human(report: &AnalysisReport, output_opts: OutputOptions) -> String {
    let mut out = String::new();

    for result in report {
        if !result.triggered && !output_opts.show_info {
            continue;
        }
        render_result(&mut out, result);
    }

    if output_opts.show_info {
        let triggered = report.triggered_rules().count();
        let summary = format!("{triggered} of {} rules triggered", report.len());
        if triggered == 0 {
            out.push_str(&format!("\n{}\n", summary.green()));
        } else {
            out.push_str(&format!("\n{}\n", summary.yellow().bold()));
        }
    }

    out
}

fn render_result(out: &mut String, result: &RuleResult) {
    let (marker, key) = if result.triggered {
        ("⚠".yellow().bold(), result.key.yellow().bold())
    } else {
        ("✓".green(), result.key.green())
    };
    out.push_str(&format!("{marker} {key}: {}\n", result.message));

    for (name, value) in &result.details {
        out.push_str(&format!("    {}\n", format!("{name}: {value}").dimmed()));
    }
}
