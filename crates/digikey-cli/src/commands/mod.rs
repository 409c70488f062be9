mod inspect;
mod schemas;
mod validate;
mod wire;

use std::fs;
use std::path::Path;

use digikey_core::CatalogConfig;
use serde::Deserialize;
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::Output;

pub struct CommandResult {
    pub output: Output,
    /// `false` when the command ran but found the input invalid.
    pub valid: bool,
}

impl CommandResult {
    pub fn ok(output: Output) -> Self {
        Self {
            output,
            valid: true,
        }
    }

    pub fn invalid(output: Output) -> Self {
        Self {
            output,
            valid: false,
        }
    }
}

pub fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Schemas => schemas::run(),
        Command::Validate(args) => validate::run(args),
        Command::Wire(args) => wire::run(args, &CatalogConfig::from_env()?),
        Command::Inspect(args) => inspect::run(args, &CatalogConfig::from_env()?),
    }
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let content = fs::read_to_string(path)?;
    parse_json(&content).map_err(|source| CliError::InvalidInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses without serde_json's nesting limit; deep taxonomies grow the heap
/// instead of the stack.
fn parse_json(content: &str) -> Result<Value, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}


#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn read_json_reports_the_offending_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write fixture");

        let err = read_json(file.path()).expect_err("must fail");
        assert!(matches!(err, CliError::InvalidInput { ref path, .. } if path == file.path()));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn read_json_accepts_nesting_past_serde_default_limit() {
        let depth = 300;
        let content = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        let value = parse_json(&content).expect("deep input must parse");

        let mut level = 0;
        let mut cursor = &value;
        while let Value::Array(items) = cursor {
            level += 1;
            cursor = &items[0];
        }
        assert_eq!(level, depth);
        assert_eq!(cursor, &Value::from(1));
    }

    #[test]
    fn read_json_rejects_trailing_content() {
        assert!(parse_json("{} {}").is_err());
    }

    #[test]
    fn read_json_missing_file_is_io() {
        let err = read_json(Path::new("/nonexistent/request.json")).expect_err("must fail");
        assert!(matches!(err, CliError::Io(_)));
    }
}
