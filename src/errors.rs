use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GityupError {
    #[error("empty executable arg not allowed")]
    EmptyExecutable,

    #[error("executable '{0}' not found in PATH")]
    ExecutableNotFound(String),

    #[error("failed to determine absolute path of '{path}': {source}")]
    ResolvePath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read root directory {}: {source}", path.display())]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Git operation failed: {0}")]
    Git(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GityupError>;
