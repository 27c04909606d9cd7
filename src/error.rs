use std::path::PathBuf;

use roadroute_core::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] roadroute_core::Error),
    #[error("Failed to read config '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Failed to write {what} to '{}': {source}", path.display())]
    FileWrite {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl CliError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::Core(err) => err.kind(),
            CliError::ConfigRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorKind::FileNotFound
            }
            CliError::ConfigRead { .. } => ErrorKind::FileRead,
            CliError::ConfigParse { .. } | CliError::Encode { .. } => ErrorKind::InvalidData,
            CliError::Config(_) => ErrorKind::InvalidArgument,
            CliError::Input(_) => ErrorKind::Input,
            CliError::FileWrite { .. } => ErrorKind::FileWrite,
        }
    }
}
