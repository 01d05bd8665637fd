//! Loading of the query, schema, variables and config an analysis runs on.

use anyhow::{bail, Context, Result};
use graphql_diagnostics::{SchemaIndex, Variables};
use graphql_diagnostics_config::{find_config, load_config, DiagnosticsConfig};
use std::io::Read;
use std::path::Path;

/// Read the query from `--query`, a file, or stdin when the file is `-`.
pub fn read_query(query_file: Option<&Path>, inline: Option<String>) -> Result<String> {
    if let Some(query) = inline {
        return Ok(query);
    }

    match query_file {
        Some(path) if path == Path::new("-") => {
            let mut query = String::new();
            std::io::stdin()
                .read_to_string(&mut query)
                .context("Failed to read query from stdin")?;
            Ok(query)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query file {}", path.display())),
        None => bail!("No query given; pass a query file, `-` for stdin, or --query"),
    }
}

pub fn read_schema_sdl(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))
}

#[tracing::instrument(skip(sdl))]
pub fn build_schema(sdl: &str, path: &Path) -> Result<SchemaIndex> {
    SchemaIndex::from_sdl(sdl, &path.display().to_string())
        .with_context(|| format!("Failed to load schema {}", path.display()))
}

/// Parse request variables, which must form a JSON object.
pub fn parse_variables(json: &str) -> Result<Variables> {
    let value: serde_json::Value =
        serde_json::from_str(json).context("Variables are not valid JSON")?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(Variables::new()),
        other => bail!("Variables must be a JSON object, got {other}"),
    }
}

pub fn read_variables_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read variables file {}", path.display()))
}

/// Load the config given with `--config`, or the nearest config file found
/// walking up from `start_dir`. No config file means all defaults.
pub fn load_diagnostics_config(
    explicit: Option<&Path>,
    start_dir: &Path,
) -> Result<DiagnosticsConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(start_dir)?,
    };

    let Some(path) = path else {
        tracing::debug!("No config file, using defaults");
        return Ok(DiagnosticsConfig::default());
    };

    load_config(&path).with_context(|| format!("Failed to load config {}", path.display()))
}
