//! End-to-end tests: run the vcstat binary against fixture directories.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Discover the path to the compiled `vcstat` binary.
fn vcstat_bin() -> PathBuf {
    let mut path = std::env::current_exe()
        .unwrap()
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf();
    path.push("vcstat");
    path
}

/// Run vcstat in `dir` with the given arguments, returning (stdout, exit code).
fn vcstat(dir: &Path, args: &[&str]) -> (String, i32) {
    let output = Command::new(vcstat_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("VCSTAT_FORMAT")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        output.status.code().unwrap_or(-1),
    )
}

fn write_git_dir(root: &Path, head: &str, branch_ref: Option<(&str, &str)>) {
    let git_dir = root.join(".git");
    std::fs::create_dir_all(git_dir.join("refs/heads")).unwrap();
    std::fs::write(git_dir.join("HEAD"), head).unwrap();
    if let Some((name, contents)) = branch_ref {
        std::fs::write(git_dir.join("refs/heads").join(name), contents).unwrap();
    }
}

#[test]
fn no_working_copy_prints_nothing_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, code) = vcstat(dir.path(), &[]);

    assert_eq!(stdout, "");
    assert_eq!(code, 0);
}

#[test]
fn named_branch_with_explicit_format() {
    let dir = tempfile::tempdir().unwrap();
    write_git_dir(
        dir.path(),
        "ref: refs/heads/main\n",
        Some(("main", "deadbeef00112233\n")),
    );

    let (stdout, code) = vcstat(dir.path(), &["-f", "%n %b %r"]);

    assert_eq!(stdout, "git main deadbeef0011");
    assert_eq!(code, 0);
}

#[test]
fn detached_head_with_default_format() {
    let dir = tempfile::tempdir().unwrap();
    write_git_dir(dir.path(), "abcdef0123456789\n", None);

    let (stdout, code) = vcstat(dir.path(), &[]);

    assert_eq!(stdout, "[(unknown)] ");
    assert_eq!(code, 0);
}

#[test]
fn broken_metadata_prints_nothing_and_exits_zero() {
    // Probe succeeds (.git exists) but extraction fails (no HEAD).
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();

    let (stdout, code) = vcstat(dir.path(), &[]);

    assert_eq!(stdout, "");
    assert_eq!(code, 0);
}

#[test]
fn svn_custom_format_working_copy() {
    let dir = tempfile::tempdir().unwrap();
    let svn_dir = dir.path().join(".svn");
    std::fs::create_dir_all(&svn_dir).unwrap();
    std::fs::write(
        svn_dir.join("entries"),
        "10\n\ndir\n161\nhttp://svn.example.com/repo/trunk\n\
         http://svn.example.com/repo\n\n\n\n2024-01-01T00:00:00Z\n161\n",
    )
    .unwrap();

    let (stdout, code) = vcstat(dir.path(), &["-f", "%n %b r%r"]);

    assert_eq!(stdout, "svn trunk r161");
    assert_eq!(code, 0);
}

#[test]
fn environment_variable_supplies_the_format() {
    let dir = tempfile::tempdir().unwrap();
    write_git_dir(dir.path(), "ref: refs/heads/wip\n", None);

    let output = Command::new(vcstat_bin())
        .current_dir(dir.path())
        .env("VCSTAT_FORMAT", "<%b>")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "<wip>");
}

#[test]
fn command_line_format_beats_the_environment() {
    let dir = tempfile::tempdir().unwrap();
    write_git_dir(dir.path(), "ref: refs/heads/wip\n", None);

    let output = Command::new(vcstat_bin())
        .args(["-f", "(%b)"])
        .current_dir(dir.path())
        .env("VCSTAT_FORMAT", "<%b>")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "(wip)");
}
