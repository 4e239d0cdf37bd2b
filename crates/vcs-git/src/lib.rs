//! Distributed-VCS (git) backend for the vcstat prompt tool.
//!
//! The `.git` marker in the working directory is either the metadata
//! directory itself or, for linked worktrees and modern submodules, a
//! regular file redirecting to it via a `gitdir: ` line. Branch and
//! revision come straight from the metadata files; modification and
//! untracked-file status require the real `git` binary and are obtained by
//! capturing narrowly-scoped subcommands.

use std::io;
use std::path::{Path, PathBuf};

use vcs_backend::{Backend, BackendError, StatusOptions, VcsInfo};
use vcs_utils::capture::Capture;
use vcs_utils::fsline::{is_dir, is_file, read_first_line};

const GITDIR_REDIRECT_PREFIX: &str = "gitdir: ";
const HEAD_REF_PREFIX: &str = "ref: refs/heads/";
const SHORT_REVISION_LEN: usize = 12;

/// The git backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitBackend;

impl Backend for GitBackend {
    fn name(&self) -> &'static str {
        "git"
    }

    fn probe(&self, dir: &Path) -> bool {
        let marker = dir.join(".git");
        is_dir(&marker) || is_file(&marker)
    }

    fn get_info(&self, dir: &Path, opts: &StatusOptions) -> Result<VcsInfo, BackendError> {
        let git_dir = resolve_git_dir(dir)?;

        let head = match read_first_line(git_dir.join("HEAD")) {
            Ok(line) => line,
            Err(e) => {
                log::debug!("unable to read HEAD, assuming not a usable repository: {e}");
                return Err(e.into());
            }
        };

        let mut info = VcsInfo::default();

        if opts.show_branch || opts.show_revision {
            if let Some(branch) = head.strip_prefix(HEAD_REF_PREFIX) {
                log::debug!("HEAD is a symbolic ref to branch '{branch}'");
                info.branch = Some(branch.to_string());
                if opts.show_revision {
                    // The tip of the branch lives in its loose ref file.
                    // If that cannot be read the revision stays unset.
                    let branch_ref = git_dir.join("refs/heads").join(branch);
                    if let Ok(line) = read_first_line(&branch_ref) {
                        info.revision = Some(short_revision(&line));
                    }
                }
            } else {
                // Not a head ref: treat the line as a raw commit id.
                log::debug!("HEAD does not look like a head ref: unknown branch");
                info.branch = Some("(unknown)".to_string());
                info.revision = Some(short_revision(&head));
            }
        }

        if opts.show_modified {
            // Exit status 1 means the diff found changes. Every other
            // outcome, including failure to launch git, counts as
            // unmodified.
            info.modified = Capture::new("git")
                .args(["diff", "--no-ext-diff", "--quiet", "--exit-code"])
                .working_dir(dir)
                .run()
                .map(|out| out.exited_with(1))
                .unwrap_or(false);
        }

        if opts.show_unknown {
            // Untracked-and-unignored files arrive on stdout, one per
            // line. Launch failure counts as no unknown files.
            info.unknown = Capture::new("git")
                .args(["ls-files", "--others", "--exclude-standard"])
                .working_dir(dir)
                .run()
                .map(|out| !out.stdout.is_empty())
                .unwrap_or(false);
        }

        Ok(info)
    }
}

/// Locate the metadata directory for the working copy at `dir`.
fn resolve_git_dir(dir: &Path) -> Result<PathBuf, BackendError> {
    let marker = dir.join(".git");

    if is_file(&marker) {
        log::debug!(".git is a regular file, assuming a linked worktree or submodule");
        let line = read_first_line(&marker)?;
        let target = line
            .strip_prefix(GITDIR_REDIRECT_PREFIX)
            .ok_or_else(|| BackendError::Malformed {
                path: marker.clone(),
                reason: format!("missing '{GITDIR_REDIRECT_PREFIX}' prefix"),
            })?;
        if target.is_empty() {
            return Err(BackendError::Malformed {
                path: marker,
                reason: format!("blank after '{GITDIR_REDIRECT_PREFIX}'"),
            });
        }
        let target = PathBuf::from(target);
        let git_dir = if target.is_absolute() {
            target
        } else {
            dir.join(target)
        };
        if !is_dir(&git_dir) {
            return Err(BackendError::Malformed {
                path: marker,
                reason: format!("redirect target '{}' is not a directory", git_dir.display()),
            });
        }
        return Ok(git_dir);
    }

    if is_dir(&marker) {
        return Ok(marker);
    }

    Err(BackendError::Read {
        path: marker,
        source: io::Error::from(io::ErrorKind::NotFound),
    })
}

/// Abbreviate a revision line to its leading 12 characters.
fn short_revision(line: &str) -> String {
    line.chars().take(SHORT_REVISION_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_revision_truncates_long_lines() {
        assert_eq!(short_revision("abcdef0123456789"), "abcdef012345");
    }

    #[test]
    fn short_revision_keeps_short_lines_whole() {
        assert_eq!(short_revision("abc123"), "abc123");
        assert_eq!(short_revision(""), "");
    }
}
