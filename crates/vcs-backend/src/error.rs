use std::path::PathBuf;

/// Definitive extraction failures.
///
/// Every variant means "no information for this working copy". Nothing
/// here ever aborts the program or reaches the user's prompt; the
/// dispatcher logs it and moves on. Soft failures (a subprocess that could
/// not be launched, an ambiguous subprocess result) do not appear here at
/// all: backends coerce those to the most conservative field value on the
/// spot.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed metadata in {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("metadata query failed: {0}")]
    Query(String),

    #[error("support for {0} was not compiled in")]
    CapabilityUnavailable(&'static str),

    #[error("{0}")]
    Util(#[from] vcs_utils::UtilError),
}
