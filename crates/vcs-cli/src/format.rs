//! Prompt format strings.
//!
//! `%b` branch, `%r` revision, `%m` modified marker (`+`), `%u`
//! unknown-files marker (`?`), `%n` backend name, `%%` literal percent.
//! Unrecognized specifiers pass through untouched, and absent fields
//! expand to nothing.

use vcs_backend::{StatusOptions, VcsInfo};

/// Derive which fields are worth extracting from the format string.
pub fn options_from_format(format: &str) -> StatusOptions {
    let mut opts = StatusOptions::default();
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        match chars.next() {
            Some('b') => opts.show_branch = true,
            Some('r') => opts.show_revision = true,
            Some('m') => opts.show_modified = true,
            Some('u') => opts.show_unknown = true,
            _ => {}
        }
    }
    opts
}

/// Expand the format string against one backend's extraction result.
pub fn expand_format(format: &str, backend_name: &str, info: &VcsInfo) -> String {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => {
                if let Some(ref branch) = info.branch {
                    out.push_str(branch);
                }
            }
            Some('r') => {
                if let Some(ref revision) = info.revision {
                    out.push_str(revision);
                }
            }
            Some('m') => {
                if info.modified {
                    out.push('+');
                }
            }
            Some('u') => {
                if info.unknown {
                    out.push('?');
                }
            }
            Some('n') => out.push_str(backend_name),
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> VcsInfo {
        VcsInfo {
            branch: Some("main".to_string()),
            revision: Some("deadbeef0011".to_string()),
            modified: true,
            unknown: false,
        }
    }

    #[test]
    fn expands_all_specifiers() {
        let out = expand_format("%n:%b@%r%m%u", "git", &sample_info());

        assert_eq!(out, "git:main@deadbeef0011+");
    }

    #[test]
    fn absent_fields_expand_to_nothing() {
        let out = expand_format("[%b|%r]", "git", &VcsInfo::default());

        assert_eq!(out, "[|]");
    }

    #[test]
    fn markers_appear_only_when_set() {
        let clean = VcsInfo::default();
        let dirty = VcsInfo {
            modified: true,
            unknown: true,
            ..VcsInfo::default()
        };

        assert_eq!(expand_format("%m%u", "git", &clean), "");
        assert_eq!(expand_format("%m%u", "git", &dirty), "+?");
    }

    #[test]
    fn literal_percent_and_unknown_specifiers() {
        let out = expand_format("100%% %x %", "git", &sample_info());

        assert_eq!(out, "100% %x %");
    }

    #[test]
    fn options_track_the_format() {
        let opts = options_from_format("[%b%m] ");

        assert!(opts.show_branch);
        assert!(opts.show_modified);
        assert!(!opts.show_revision);
        assert!(!opts.show_unknown);
    }

    #[test]
    fn escaped_percent_does_not_enable_options() {
        let opts = options_from_format("%%b");

        assert!(!opts.show_branch);
    }
}
