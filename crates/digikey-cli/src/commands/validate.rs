use digikey_core::get_schema;
use serde_json::{json, Value};

use super::{read_json, CommandResult};
use crate::cli::ValidateArgs;
use crate::error::CliError;
use crate::output::Output;

pub fn run(args: &ValidateArgs) -> Result<CommandResult, CliError> {
    let schema = get_schema(&args.schema)?;
    let input = read_json(&args.file)?;

    let (valid, errors) = match &input {
        Value::Array(_) => match schema.validate_list(&input)? {
            None => (true, Value::Null),
            Some(reports) => (false, serde_json::to_value(reports)?),
        },
        _ => match schema.validate(&input) {
            None => (true, Value::Null),
            Some(report) => (false, serde_json::to_value(report)?),
        },
    };

    let output = Output::Json(json!({
        "schema": schema.name(),
        "valid": valid,
        "errors": errors,
    }));
    Ok(if valid {
        CommandResult::ok(output)
    } else {
        CommandResult::invalid(output)
    })
}
