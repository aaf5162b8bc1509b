//! Temporary filesystem fixtures.
//!
//! Fixtures never change the process working directory, which is shared by
//! every test thread. Closures receive the fixture root instead and build
//! paths from it.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::config::Settings;
use crate::errors::{FixtureError, FixtureResult};

/// A live temporary directory, removed on drop unless
/// `VERDICT_KEEP_TEMP` is set.
#[derive(Debug)]
pub struct Fixture {
    root: Option<TempDir>,
    path: PathBuf,
    keep: bool,
}

impl Fixture {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Join a relative path onto the root, rejecting paths that leave it.
    pub fn join(&self, relative: impl AsRef<Path>) -> FixtureResult<PathBuf> {
        let relative = relative.as_ref();
        confined(relative)?;
        Ok(self.path.join(relative))
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };
        if self.keep {
            let kept = root.keep();
            info!(path = %kept.display(), "Keeping fixture directory");
        } else {
            debug!(path = %self.path.display(), "Removing fixture directory");
            drop(root);
        }
    }
}

fn confined(relative: &Path) -> FixtureResult<()> {
    let escapes = relative.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(FixtureError::OutsideRoot(relative.to_path_buf()));
    }
    Ok(())
}

/// Builder for a populated temporary directory.
///
/// Directories are created before files, and a file's parent directories are
/// created as needed.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    dirs: Vec<PathBuf>,
    files: Vec<(PathBuf, String)>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.push(path.into());
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.push((path.into(), contents.into()));
        self
    }

    /// Create the directory and populate it.
    pub fn build(self) -> FixtureResult<Fixture> {
        let settings = Settings::from_env();
        let root = tempfile::Builder::new()
            .prefix("verdict-")
            .tempdir()
            .map_err(FixtureError::TempDir)?;
        let fixture = Fixture {
            path: root.path().to_path_buf(),
            root: Some(root),
            keep: settings.keep_temp,
        };

        for dir in &self.dirs {
            let path = fixture.join(dir)?;
            fs::create_dir_all(&path).map_err(|source| FixtureError::Create {
                path: path.clone(),
                source,
            })?;
        }
        for (file, contents) in &self.files {
            let path = fixture.join(file)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| FixtureError::Create {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, contents).map_err(|source| FixtureError::Create {
                path: path.clone(),
                source,
            })?;
        }

        debug!(
            path = %fixture.path.display(),
            dirs = self.dirs.len(),
            files = self.files.len(),
            "Created fixture directory"
        );
        Ok(fixture)
    }
}

/// Call `f` with a fresh empty temporary directory, removed afterwards.
pub fn temp_dir<R>(f: impl FnOnce(&Path) -> R) -> FixtureResult<R> {
    let fixture = Tree::new().build()?;
    Ok(f(fixture.path()))
}

/// Call `f` with a temporary directory holding `dirs` and then `files`
/// (relative path, contents), removed afterwards.
pub fn temp_tree<R>(
    dirs: &[&str],
    files: &[(&str, &str)],
    f: impl FnOnce(&Path) -> R,
) -> FixtureResult<R> {
    let tree = dirs.iter().fold(Tree::new(), |tree, dir| tree.dir(*dir));
    let tree = files
        .iter()
        .fold(tree, |tree, (path, contents)| tree.file(*path, *contents));
    let fixture = tree.build()?;
    Ok(f(fixture.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env_test_lock;

    #[test]
    fn test_temp_dir_is_created_and_removed() {
        let _lock = env_test_lock();
        let path = temp_dir(|path| {
            assert!(path.is_dir());
            path.to_path_buf()
        })
        .unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_tree_populates_dirs_then_files() {
        let _lock = env_test_lock();
        let seen = temp_tree(
            &["a/b", "empty"],
            &[("a/b/one.txt", "1"), ("top.txt", "top")],
            |root| {
                assert!(root.join("empty").is_dir());
                assert_eq!(fs::read_to_string(root.join("a/b/one.txt")).unwrap(), "1");
                fs::read_to_string(root.join("top.txt")).unwrap()
            },
        )
        .unwrap();
        assert_eq!(seen, "top");
    }

    #[test]
    fn test_file_parents_are_created() {
        let _lock = env_test_lock();
        let fixture = Tree::new().file("deep/nested/file.txt", "x").build().unwrap();
        assert!(fixture.path().join("deep/nested").is_dir());
    }

    #[test]
    fn test_paths_outside_root_are_rejected() {
        let _lock = env_test_lock();
        let err = Tree::new().file("../escape.txt", "x").build().unwrap_err();
        assert!(matches!(err, FixtureError::OutsideRoot(_)));

        let err = Tree::new().dir("/abs").build().unwrap_err();
        assert!(matches!(err, FixtureError::OutsideRoot(_)));
    }

    #[test]
    fn test_join_confines_paths() {
        let _lock = env_test_lock();
        let fixture = Tree::new().build().unwrap();
        assert_eq!(
            fixture.join("x/y").unwrap(),
            fixture.path().join("x/y")
        );
        assert!(fixture.join("x/../../y").is_err());
    }
}
