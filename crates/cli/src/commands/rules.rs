use crate::commands::fail;
use crate::input;
use crate::{ExitCode, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use graphql_diagnostics::registry;
use std::path::PathBuf;

/// List every rule with its description and whether the config enables it.
pub fn run(config_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = input::load_diagnostics_config(config_path.as_deref(), &cwd)
        .unwrap_or_else(|e| fail(format, ExitCode::ConfigError, &e));
    let known = registry::all_rule_keys();
    config
        .validate_rule_names(&known)
        .unwrap_or_else(|e| fail(format, ExitCode::ConfigError, &anyhow::Error::from(e)));

    let rules = registry::default_rules();

    match format {
        OutputFormat::Human => {
            for rule in &rules {
                let status = if config.is_enabled(rule.key()) {
                    "on".green()
                } else {
                    "off".dimmed()
                };
                println!("{:<22} {:<4} {}", rule.key().bold(), status, rule.description());
            }
        }
        OutputFormat::Json => {
            let rules: Vec<_> = rules
                .iter()
                .map(|rule| {
                    serde_json::json!({
                        "key": rule.key(),
                        "description": rule.description(),
                        "enabled": config.is_enabled(rule.key()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }

    Ok(())
}
