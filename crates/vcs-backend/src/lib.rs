//! Shared contract between the vcstat dispatcher and its VCS backends.
//!
//! A backend pairs a cheap applicability probe with a metadata extractor.
//! The dispatcher owns an ordered registry of backends and asks each in
//! turn; the first one whose probe succeeds gets to extract. Everything a
//! backend reports flows through [`VcsInfo`]; everything that goes wrong
//! flows through [`BackendError`], which the dispatcher treats uniformly
//! as "no information here".

mod error;

pub use error::BackendError;

use std::path::Path;

/// Status metadata extracted from one working copy.
///
/// A present branch is always a plain relative path segment (no VCS
/// markers, no trailing slash); a present revision is always a short
/// single-line printable token (an abbreviated commit id or a decimal
/// revision number). Absent fields mean "not determined", not an error.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VcsInfo {
    /// Current branch, when one could be determined.
    pub branch: Option<String>,
    /// Current revision, when one could be determined.
    pub revision: Option<String>,
    /// The working tree has uncommitted modifications. True only when a
    /// working-tree diff explicitly confirmed it.
    pub modified: bool,
    /// Untracked files exist. True only when at least one was explicitly
    /// confirmed.
    pub unknown: bool,
}

/// Which fields the frontend wants populated.
///
/// The dispatcher constructs this from the prompt format string. Fields
/// that are not requested are simply left unset in the result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusOptions {
    pub show_branch: bool,
    pub show_revision: bool,
    pub show_modified: bool,
    pub show_unknown: bool,
}

/// A VCS backend: an applicability probe paired with a metadata extractor.
///
/// Implementations are stateless unit structs, registered once for the
/// lifetime of the process. Selection and ordering among backends belong
/// to the dispatcher.
pub trait Backend {
    /// Short name of the VCS, used in diagnostics and prompt expansion.
    fn name(&self) -> &'static str;

    /// Cheap, side-effect-free check for the backend's on-disk marker in
    /// `dir`.
    fn probe(&self, dir: &Path) -> bool;

    /// Extract status metadata for the working copy at `dir`.
    ///
    /// An error means "no information": partial records are never
    /// surfaced, and the caller is expected to log the error at debug
    /// level and print nothing.
    fn get_info(&self, dir: &Path, opts: &StatusOptions) -> Result<VcsInfo, BackendError>;
}
