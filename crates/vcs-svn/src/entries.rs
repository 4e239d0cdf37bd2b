//! Parsers for the two pre-1.7 generations of the `.svn/entries` file.

use std::io::BufRead;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use vcs_backend::{BackendError, VcsInfo};

use crate::branch_from_repos_path;

/// Custom line-based format (svn 1.4 .. 1.6): fixed-position records.
///
/// Line 5 is the full checkout URL and line 6 the repository root URL,
/// which must be a strict prefix of line 5; the repository-relative part
/// of line 5 names the branch. Line 11 is the revision. The caller has
/// already consumed line 1 while sniffing the format.
pub(crate) fn read_custom(
    reader: &mut impl BufRead,
    path: &Path,
) -> Result<VcsInfo, BackendError> {
    // Lines 2..4 are discardable; line 5 is the checkout URL.
    let url = nth_line(reader, path, 2, 5)?;
    // Line 5 can only be interpreted with the repository root from line 6.
    let root = nth_line(reader, path, 6, 6)?;

    if !url.starts_with(&root) {
        return Err(BackendError::Malformed {
            path: path.to_path_buf(),
            reason: format!("checkout url '{url}' does not start with repository root '{root}'"),
        });
    }
    let rest = &url[root.len()..];
    let repos_path = rest.strip_prefix('/').unwrap_or(rest);

    let mut info = VcsInfo {
        branch: branch_from_repos_path(repos_path),
        ..VcsInfo::default()
    };

    // Lines 7..10 are also uninteresting; line 11 holds the revision.
    let revision = nth_line(reader, path, 7, 11)?;
    log::debug!("read svn revision from {}: '{revision}'", path.display());
    info.revision = Some(revision);
    Ok(info)
}

/// Read lines `from..=to`, returning line `to` with its terminator stripped.
fn nth_line(
    reader: &mut impl BufRead,
    path: &Path,
    from: usize,
    to: usize,
) -> Result<String, BackendError> {
    let mut line = String::new();
    for line_num in from..=to {
        line.clear();
        let n = reader.read_line(&mut line).map_err(|e| BackendError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        if n == 0 {
            return Err(BackendError::Malformed {
                path: path.to_path_buf(),
                reason: format!("early EOF (line {line_num} missing)"),
            });
        }
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

/// Permissive extraction of the quoted value after a `revision=` marker:
/// skip to the first quote, take consecutive digits.
static REVISION_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"revision=[^"]*"([0-9]+)"#).unwrap());

/// XML-ish format (svn < 1.4).
///
/// The first line carrying a `revision=` marker wins; later occurrences
/// are ignored. A marker line whose quoted value does not parse still
/// counts as found, just without a revision. This format records no
/// branch information.
pub(crate) fn read_xml(reader: &mut impl BufRead, path: &Path) -> Result<VcsInfo, BackendError> {
    for line in reader.lines() {
        let line = line.map_err(|e| BackendError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        if !line.contains("revision=") {
            continue;
        }
        let mut info = VcsInfo::default();
        if let Some(captures) = REVISION_VALUE.captures(&line) {
            let revision = captures[1].to_string();
            log::debug!("read svn revision from {}: '{revision}'", path.display());
            info.revision = Some(revision);
        }
        return Ok(info);
    }
    Err(BackendError::Malformed {
        path: path.to_path_buf(),
        reason: "no 'revision=' line found".to_string(),
    })
}
