use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Files larger than this are skipped outright
const MAX_FILE_SIZE_BYTES: u64 = 1_048_576; // 1 MB

/// Scanner for finding regular files under a scan root
pub struct FileScanner {
    root: PathBuf,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Scan the tree for regular files (.gitignore aware).
    ///
    /// Results are sorted so the output documents are deterministic; the
    /// walk itself guarantees only that every reachable file is visited.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true) // do not chunk hidden files by default
            .require_git(false) // honor .gitignore even without a .git directory
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true);

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if let Ok(meta) = entry.metadata() {
                        if meta.len() > MAX_FILE_SIZE_BYTES {
                            log::debug!(
                                "Skipping large file {} ({} bytes > {})",
                                path.display(),
                                meta.len(),
                                MAX_FILE_SIZE_BYTES
                            );
                            continue;
                        }
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        log::info!("Found {} files under {}", files.len(), self.root.display());
        files
    }
}

#[cfg(test)]
mod tests {
    use super::FileScanner;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_nested_files() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("deep.rs"), b"fn main() {}").unwrap();
        fs::write(temp.path().join("top.md"), b"## x\ny").unwrap();

        let files = FileScanner::new(temp.path()).scan();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|p| p.ends_with("deep.rs")));
        assert!(files.iter().any(|p| p.ends_with("top.md")));
    }

    #[test]
    fn respects_gitignore() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("generated")).unwrap();
        fs::write(temp.path().join("generated").join("out.rs"), b"fn g() {}").unwrap();
        fs::write(temp.path().join("main.rs"), b"fn main() {}").unwrap();
        fs::write(temp.path().join(".gitignore"), b"/generated\n").unwrap();

        let files = FileScanner::new(temp.path()).scan();

        assert!(files.iter().all(|p| !p.to_string_lossy().contains("generated")));
        assert!(files.iter().any(|p| p.ends_with("main.rs")));
    }

    #[test]
    fn skips_oversized_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("huge.md"), vec![b'x'; 2 * 1024 * 1024]).unwrap();
        fs::write(temp.path().join("small.md"), b"## ok\n").unwrap();

        let files = FileScanner::new(temp.path()).scan();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("small.md"));
    }
}
