//! CLI argument definitions for digikey.
//!
//! Every command works on captured JSON files; nothing here talks to the
//! network.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `schemas` | List registered schema names |
//! | `validate` | Validate a JSON file against a named schema |
//! | `wire` | Print the wire form of a snake_case request |
//! | `inspect` | Summarize a captured keyword search response |
//!
//! # Examples
//!
//! ```bash
//! digikey validate sort sort.json --pretty
//! digikey wire part.json --kind part --style get
//! digikey inspect response.json --products
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use digikey_core::PartDetailStyle;

#[derive(Debug, Parser)]
#[command(
    name = "digikey",
    author,
    version,
    about = "Offline validation and inspection for Digi-Key catalog payloads"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered schema names.
    Schemas,

    /// Validate a JSON file against a schema.
    ///
    /// An object is validated as one record, an array element by element.
    /// Exits with code 2 when the input is invalid.
    ///
    ///   digikey validate parametric_filter filters.json
    Validate(ValidateArgs),

    /// Print the wire form of a snake_case request file.
    Wire(WireArgs),

    /// Summarize a captured keyword search response.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Schema name, snake_case or CamelCase.
    pub schema: String,

    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct WireArgs {
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = RequestKind::Search)]
    pub kind: RequestKind,

    /// Part-detail wire style (post or get). Defaults to
    /// DIGIKEY_PART_DETAIL_STYLE, then post.
    #[arg(long)]
    pub style: Option<PartDetailStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequestKind {
    Search,
    Part,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    pub file: PathBuf,

    /// Also list every product with its page on `DIGIKEY_SITE_URL`.
    #[arg(long, default_value_t = false)]
    pub products: bool,
}
