//! Filesystem predicates. Each evaluates a single stat or read of one path.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::message;
use crate::outcome::Verdict;

fn does_not_exist(path: &Path) -> String {
    format!("Path \"{}\" does not exist.", path.display())
}

fn exists(path: &Path) -> String {
    format!("Path \"{}\" exists.", path.display())
}

/// Something exists at `path` (following symlinks).
pub fn path_exists(path: impl AsRef<Path>) -> Verdict {
    let path = path.as_ref();
    Verdict::check(fs::metadata(path).is_ok(), || does_not_exist(path))
}

pub fn not_path_exists(path: impl AsRef<Path>) -> Verdict {
    let path = path.as_ref();
    Verdict::check(fs::metadata(path).is_err(), || exists(path))
}

/// A directory exists at `path`.
pub fn dir_exists(path: impl AsRef<Path>) -> Verdict {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Verdict::met(),
        Ok(_) => Verdict::missed(format!("Path \"{}\" is not a directory", path.display())),
        Err(_) => Verdict::missed(does_not_exist(path)),
    }
}

pub fn not_dir_exists(path: impl AsRef<Path>) -> Verdict {
    let path = path.as_ref();
    let is_dir = fs::metadata(path).is_ok_and(|meta| meta.is_dir());
    Verdict::check(!is_dir, || exists(path))
}

/// A file (anything but a directory) exists at `path`.
pub fn file_exists(path: impl AsRef<Path>) -> Verdict {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(meta) if !meta.is_dir() => Verdict::met(),
        Ok(_) => Verdict::missed(format!("Path \"{}\" is a directory", path.display())),
        Err(_) => Verdict::missed(does_not_exist(path)),
    }
}

pub fn not_file_exists(path: impl AsRef<Path>) -> Verdict {
    let path = path.as_ref();
    let is_file = fs::metadata(path).is_ok_and(|meta| !meta.is_dir());
    Verdict::check(!is_file, || exists(path))
}

fn read(path: &Path) -> Result<String, Verdict> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => {
            Verdict::missed(format!("Path \"{}\" does not exist", path.display()))
        }
        _ => Verdict::missed(format!(
            "Path \"{}\" could not be read: {err}",
            path.display()
        )),
    })
}

fn noun(path: &Path) -> String {
    format!("File \"{}\"", path.display())
}

/// The file at `path` contains `text`. A missing or unreadable file is a miss.
pub fn file_contains(path: impl AsRef<Path>, text: &str) -> Verdict {
    let path = path.as_ref();
    match read(path) {
        Ok(content) => Verdict::check(content.contains(text), || {
            message::must_contain(&noun(path), &content, text)
        }),
        Err(miss) => miss,
    }
}

/// The file at `path` does not contain `text`. A missing or unreadable file
/// is a miss too: its content cannot be vouched for.
pub fn not_file_contains(path: impl AsRef<Path>, text: &str) -> Verdict {
    let path = path.as_ref();
    match read(path) {
        Ok(content) => Verdict::check(!content.contains(text), || {
            message::must_not_contain(&noun(path), &content, text)
        }),
        Err(miss) => miss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    #[test]
    fn test_dir_exists() {
        let dir = workspace();
        assert!(dir_exists(dir.path()).is_met());

        let missing = dir.path().join("spoiled");
        assert_eq!(
            dir_exists(&missing).reason(),
            format!("Path \"{}\" does not exist.", missing.display())
        );
    }

    #[test]
    fn test_dir_exists_rejects_files() {
        let dir = workspace();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert_eq!(
            dir_exists(&file).reason(),
            format!("Path \"{}\" is not a directory", file.display())
        );
        assert!(not_dir_exists(&file).is_met());
    }

    #[test]
    fn test_not_dir_exists() {
        let dir = workspace();
        assert_eq!(
            not_dir_exists(dir.path()).reason(),
            format!("Path \"{}\" exists.", dir.path().display())
        );
        assert!(not_dir_exists(dir.path().join("nope")).is_met());
    }

    #[test]
    fn test_file_exists() {
        let dir = workspace();
        let file = dir.path().join("testfile");
        fs::write(&file, "").unwrap();
        assert!(file_exists(&file).is_met());
        assert_eq!(
            file_exists(dir.path()).reason(),
            format!("Path \"{}\" is a directory", dir.path().display())
        );
        assert!(!file_exists(dir.path().join("nope")).is_met());
    }

    #[test]
    fn test_not_file_exists() {
        let dir = workspace();
        let file = dir.path().join("testfile");
        fs::write(&file, "").unwrap();
        assert_eq!(
            not_file_exists(&file).reason(),
            format!("Path \"{}\" exists.", file.display())
        );
        assert!(not_file_exists(dir.path()).is_met());
    }

    #[test]
    fn test_path_exists() {
        let dir = workspace();
        assert!(path_exists(dir.path()).is_met());
        assert!(not_path_exists(dir.path().join("nope")).is_met());
        assert_eq!(
            not_path_exists(dir.path()).reason(),
            format!("Path \"{}\" exists.", dir.path().display())
        );
    }

    #[test]
    fn test_file_contains_missing_file() {
        let dir = workspace();
        let file = dir.path().join("testfile.txt");
        assert_eq!(
            file_contains(&file, "test content").reason(),
            format!("Path \"{}\" does not exist", file.display())
        );
        assert!(!not_file_contains(&file, "test content").is_met());
    }

    #[test]
    fn test_file_contains() {
        let dir = workspace();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "alpha\nbeta\n").unwrap();

        assert!(file_contains(&file, "beta").is_met());
        let reason = file_contains(&file, "gamma").reason();
        assert!(reason.contains("must contain specific text."));
        assert!(reason.contains("  ~ gamma"));

        assert!(not_file_contains(&file, "gamma").is_met());
        assert!(
            not_file_contains(&file, "alpha")
                .reason()
                .contains("must not contain specific text.")
        );
    }
}
