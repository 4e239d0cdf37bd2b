//! Centralized-VCS (svn) backend for the vcstat prompt tool.
//!
//! Subversion has left three generations of working-copy metadata on disk:
//! an XML-ish `entries` file (pre-1.4), a custom line-based `entries` file
//! (1.4–1.6), and a SQLite database `wc.db` (1.7 and later). The backend
//! sniffs which generation is present and parses accordingly. Database
//! support is a build-time capability; without it, 1.7+ working copies
//! report a capability failure rather than pretending to be empty.

mod db;
mod entries;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use vcs_backend::{Backend, BackendError, StatusOptions, VcsInfo};
use vcs_utils::fsline::is_dir;

/// Whether working-copy database support was compiled in.
pub const SQLITE_SUPPORT: bool = cfg!(feature = "sqlite");

/// The svn backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvnBackend;

impl Backend for SvnBackend {
    fn name(&self) -> &'static str {
        "svn"
    }

    fn probe(&self, dir: &Path) -> bool {
        is_dir(dir.join(".svn"))
    }

    // Branch and revision are always extracted here; unlike git there is
    // no per-field cost to skip, so the options only matter to the
    // frontend.
    fn get_info(&self, dir: &Path, _opts: &StatusOptions) -> Result<VcsInfo, BackendError> {
        let entries_path = dir.join(".svn").join("entries");
        let file = File::open(&entries_path).map_err(|e| {
            log::debug!(
                "failed to open {}: not an svn working copy",
                entries_path.display()
            );
            BackendError::Read {
                path: entries_path.clone(),
                source: e,
            }
        })?;
        let mut reader = BufReader::new(file);

        // The first line tells the pre-1.7 formats apart.
        let mut first = String::new();
        reader
            .read_line(&mut first)
            .map_err(|e| BackendError::Read {
                path: entries_path.clone(),
                source: e,
            })?;
        if first.is_empty() {
            return Err(BackendError::Malformed {
                path: entries_path,
                reason: "empty file".to_string(),
            });
        }

        let wc_db = dir.join(".svn").join("wc.db");
        if wc_db.is_file() {
            // Working copy created by svn >= 1.7.
            db::read_wc_db(&wc_db)
        } else if first.starts_with(|c: char| c.is_ascii_digit()) {
            // Custom file format (svn 1.4 .. 1.6).
            entries::read_custom(&mut reader, &entries_path)
        } else {
            // XML file format (svn < 1.4).
            entries::read_xml(&mut reader, &entries_path)
        }
    }
}

/// Derive a branch name from a repository-relative checkout path.
///
/// Checking out `/branches` or `/tags` themselves is legal but peculiar:
/// there is no single branch name for such a working copy. Any layout
/// other than the conventional trunk/branches/tags one likewise yields
/// nothing.
pub fn branch_from_repos_path(repos_path: &str) -> Option<String> {
    if repos_path == "trunk" || repos_path.starts_with("trunk/") {
        return Some("trunk".to_string());
    }
    if repos_path == "branches" || repos_path == "tags" {
        log::debug!("no svn branch for peculiar repos_path '{repos_path}'");
        return None;
    }
    if let Some(rest) = repos_path.strip_prefix("branches/") {
        let name = match rest.find('/') {
            Some(idx) => &rest[..idx],
            None => rest,
        };
        return Some(name.to_string());
    }
    log::debug!("no svn branch: unexpected repos_path '{repos_path}'");
    None
}
