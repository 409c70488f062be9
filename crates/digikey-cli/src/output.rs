use std::io::{self, Write};

use serde_json::Value;

use crate::error::CliError;

/// What a command prints on success.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Json(Value),
    Text(String),
}

pub fn render(output: &Output, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_output(&mut handle, output, pretty)
}

pub fn write_output(writer: &mut impl Write, output: &Output, pretty: bool) -> Result<(), CliError> {
    match output {
        Output::Json(value) => {
            let payload = if pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            };
            writeln!(writer, "{payload}")?;
        }
        Output::Text(text) => writeln!(writer, "{text}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn pretty_flag_only_affects_json() {
        let mut compact = Vec::new();
        write_output(&mut compact, &Output::Json(json!({ "a": [1] })), false).expect("must write");
        assert_eq!(String::from_utf8(compact).expect("utf8"), "{\"a\":[1]}\n");

        let mut pretty = Vec::new();
        write_output(&mut pretty, &Output::Json(json!({ "a": 1 })), true).expect("must write");
        assert_eq!(String::from_utf8(pretty).expect("utf8"), "{\n  \"a\": 1\n}\n");

        let mut text = Vec::new();
        write_output(&mut text, &Output::Text(String::from("tree")), true).expect("must write");
        assert_eq!(String::from_utf8(text).expect("utf8"), "tree\n");
    }
}
