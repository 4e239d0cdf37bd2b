use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::UtilError;
use crate::Result;

/// True when `path` names an existing directory. False on any stat failure.
pub fn is_dir(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

/// True when `path` names an existing regular file. False on any stat failure.
pub fn is_file(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

/// Read the first line of `path`, with the line terminator stripped.
///
/// Errs when the file cannot be opened or contains no data at all. A file
/// whose first line is blank yields an empty string.
pub fn read_first_line(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| UtilError::IoPath {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| UtilError::IoPath {
            path: path.to_path_buf(),
            source: e,
        })?;

    if line.is_empty() {
        return Err(UtilError::IoPath {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "empty file"),
        });
    }

    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn existence_checks() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "plain", "x\n");

        assert!(is_dir(dir.path()));
        assert!(!is_dir(&file));
        assert!(is_file(&file));
        assert!(!is_file(dir.path()));
        assert!(!is_dir(dir.path().join("missing")));
        assert!(!is_file(dir.path().join("missing")));
    }

    #[test]
    fn first_line_strips_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "f", "first line\nsecond line\n");

        assert_eq!(read_first_line(&path).unwrap(), "first line");
    }

    #[test]
    fn first_line_without_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "f", "no terminator");

        assert_eq!(read_first_line(&path).unwrap(), "no terminator");
    }

    #[test]
    fn crlf_terminator() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "f", "windows line\r\n");

        assert_eq!(read_first_line(&path).unwrap(), "windows line");
    }

    #[test]
    fn empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "f", "");

        assert!(read_first_line(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(read_first_line(dir.path().join("missing")).is_err());
    }
}
