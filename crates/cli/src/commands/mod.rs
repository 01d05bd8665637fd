pub mod analyze;
pub mod rules;

use crate::{ExitCode, OutputFormat};
use colored::Colorize;

/// Report a failure on stderr in the selected format and exit.
pub fn fail(format: OutputFormat, code: ExitCode, error: &anyhow::Error) -> ! {
    tracing::error!(%code, error = %format!("{error:#}"), "Command failed");
    match format {
        OutputFormat::Human => {
            eprintln!("{} {}", "✗".red().bold(), format!("{error:#}").red());
        }
        OutputFormat::Json => {
            eprintln!(
                "{}",
                serde_json::json!({ "error": format!("{error:#}"), "kind": code.to_string() })
            );
        }
    }
    code.exit()
}
