use std::path::PathBuf;

/// Base error type for vcs-utils operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error("cannot spawn {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
