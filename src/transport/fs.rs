use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::markdown::MARKDOWN_EXTENSION;
use crate::errors::PoolError;

/// Filesystem transport that lists recipe documents under a root.
pub struct FileStream {
    root: PathBuf,
    follow_links: bool,
}

impl FileStream {
    /// Create a stream rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
        }
    }

    /// Configure symlink traversal.
    pub fn with_follow_symlinks(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// All markdown files under the root, sorted by path.
    ///
    /// Unreadable directory entries are skipped; a missing root is an error.
    pub fn markdown_files(&self) -> Result<Vec<PathBuf>, PoolError> {
        if !self.root.is_dir() {
            return Err(PoolError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("asset root '{}' is not a directory", self.root.display()),
            )));
        }
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_markdown_file(path))
            .collect();
        files.sort();
        Ok(files)
    }
}

/// True if the path has a `.md` extension (case-insensitive).
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
        .unwrap_or(false)
}

/// First directory segment of `path` relative to `root`, if any.
pub fn top_level_dir(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parent = rel.parent()?;
    parent
        .iter()
        .next()
        .map(|segment| segment.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_only_markdown_files_in_sorted_order() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("kotlin");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("b.md"), "# B").unwrap();
        std::fs::write(temp.path().join("a.MD"), "# A").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "skip").unwrap();

        let files = FileStream::new(temp.path()).markdown_files().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.MD"));
        assert!(files[1].ends_with("kotlin/b.md"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("absent");
        let err = FileStream::new(&missing).markdown_files().unwrap_err();
        assert!(matches!(err, PoolError::Io(_)));
    }

    #[test]
    fn top_level_dir_uses_first_segment() {
        let root = Path::new("/assets");
        assert_eq!(
            top_level_dir(root, Path::new("/assets/kotlin/flows/debounce.md")),
            Some("kotlin".to_string())
        );
        assert_eq!(top_level_dir(root, Path::new("/assets/readme.md")), None);
        assert_eq!(top_level_dir(root, Path::new("/other/x.md")), None);
    }
}
