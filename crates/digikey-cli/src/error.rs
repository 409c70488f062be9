use std::path::PathBuf;

use digikey_core::{ConfigError, CoreError, SchemaError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid JSON in {}: {source}", .path.display())]
    InvalidInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(
                CoreError::InvalidRequest(_)
                | CoreError::InvalidResponse { .. }
                | CoreError::MissingBranch(_)
                | CoreError::Schema(_),
            )
            | Self::Schema(_) => 2,
            Self::Config(_) | Self::Core(CoreError::Config(_)) => 3,
            Self::InvalidInput { .. } | Self::Serialization(_) => 4,
            Self::Core(_) | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use digikey_core::ErrorReport;

    use super::*;

    #[test]
    fn data_errors_exit_with_two() {
        assert_eq!(
            CliError::from(CoreError::InvalidRequest(ErrorReport::new())).exit_code(),
            2
        );
        assert_eq!(
            CliError::from(SchemaError::SchemaNotFound(String::from("nope"))).exit_code(),
            2
        );
        assert_eq!(
            CliError::from(CoreError::MissingBranch("FilterOptions")).exit_code(),
            2
        );
    }

    #[test]
    fn io_errors_exit_with_ten() {
        let error = CliError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(error.exit_code(), 10);
    }
}
