// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File { contents: Vec<u8>, executable: bool },
    Dir,
}

/// In-memory filesystem for tests.
///
/// Parent directories are created implicitly when a file is added.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.insert(path.as_ref(), content.into(), false);
    }

    /// Add an empty file with the execute bit set.
    pub fn add_executable(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Vec::new(), true);
    }

    fn insert(&self, path: &Path, contents: Vec<u8>, executable: bool) {
        let mut files = self.files.lock().unwrap();
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            files.entry(dir.to_path_buf()).or_insert(MockEntry::Dir);
            parent = dir.parent();
        }
        files.insert(
            path.to_path_buf(),
            MockEntry::File {
                contents,
                executable,
            },
        );
    }

    fn entry(&self, path: &Path) -> Option<MockEntry> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl FileSystem for MockFileSystem {
    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        match self.entry(path) {
            Some(MockEntry::File { contents, .. }) => Ok(Box::new(Cursor::new(contents))),
            Some(MockEntry::Dir) => Err(anyhow!("is a directory: {:?}", path)),
            None => Err(anyhow!("file not found: {:?}", path)),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.entry(path), Some(MockEntry::File { .. }))
    }

    fn is_executable(&self, path: &Path) -> bool {
        matches!(
            self.entry(path),
            Some(MockEntry::File {
                executable: true,
                ..
            })
        )
    }
}
