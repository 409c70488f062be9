use digikey_core::{get_schema, list_schemas};
use serde::Serialize;

use super::CommandResult;
use crate::error::CliError;
use crate::output::Output;

#[derive(Debug, Serialize)]
struct SchemaSummary {
    name: &'static str,
    strict: bool,
    fields: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct SchemaListResponseData {
    schemas: Vec<SchemaSummary>,
}

pub fn run() -> Result<CommandResult, CliError> {
    let schemas = list_schemas()
        .into_iter()
        .map(|name| {
            let schema = get_schema(name)?;
            Ok(SchemaSummary {
                name,
                strict: schema.is_strict(),
                fields: schema.fields().iter().map(|field| field.name()).collect(),
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    let data = SchemaListResponseData { schemas };
    Ok(CommandResult::ok(Output::Json(serde_json::to_value(data)?)))
}
