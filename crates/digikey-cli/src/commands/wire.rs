use digikey_core::domain::requests::keyword_search_request_schema;
use digikey_core::{encode, encode_part_detail, CatalogConfig};

use super::{read_json, CommandResult};
use crate::cli::{RequestKind, WireArgs};
use crate::error::CliError;
use crate::output::Output;

pub fn run(args: &WireArgs, config: &CatalogConfig) -> Result<CommandResult, CliError> {
    let request = read_json(&args.file)?;

    let wire = match args.kind {
        RequestKind::Search => encode(keyword_search_request_schema(), &request)?,
        RequestKind::Part => {
            let style = args.style.unwrap_or(config.part_detail_style);
            encode_part_detail(&request, style)?
        }
    };

    Ok(CommandResult::ok(Output::Json(wire)))
}
