//! Read-only queries against the svn 1.7+ working-copy database.
//!
//! Only two values are ever wanted: the changed revision and the
//! repository-relative path of the working-copy root row. Both live in the
//! `nodes` table under `wc_id = 1` and an empty `local_relpath`.

use std::path::Path;

use vcs_backend::{BackendError, VcsInfo};

#[cfg(feature = "sqlite")]
pub(crate) fn read_wc_db(db_path: &Path) -> Result<VcsInfo, BackendError> {
    use rusqlite::{Connection, OpenFlags};

    use crate::branch_from_repos_path;

    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| {
        log::debug!(
            "error opening working-copy database {}: {e}",
            db_path.display()
        );
        BackendError::Query(e.to_string())
    })?;

    let revision: i64 = conn
        .query_row(
            "SELECT changed_revision FROM nodes WHERE wc_id = 1 AND local_relpath = ''",
            [],
            |row| row.get(0),
        )
        .map_err(|e| BackendError::Query(e.to_string()))?;

    let repos_path: String = conn
        .query_row(
            "SELECT repos_path FROM nodes WHERE wc_id = 1 AND local_relpath = ''",
            [],
            |row| row.get(0),
        )
        .map_err(|e| BackendError::Query(e.to_string()))?;

    log::debug!("read svn revision {revision} for repos_path '{repos_path}' from wc.db");

    Ok(VcsInfo {
        branch: branch_from_repos_path(&repos_path),
        revision: Some(revision.to_string()),
        ..VcsInfo::default()
    })
}

#[cfg(not(feature = "sqlite"))]
pub(crate) fn read_wc_db(_db_path: &Path) -> Result<VcsInfo, BackendError> {
    // Build-configuration limitation, not a repository problem.
    log::debug!("built without sqlite support; cannot read svn >= 1.7 working copies");
    Err(BackendError::CapabilityUnavailable(
        "svn working-copy database",
    ))
}
