use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::file_system::src::types::{AbsoluteFsPath, PathManipulation, ReadonlyFileSystem};

/// In-memory file system for tests.
///
/// Clones share the same file tree, so a test can keep a handle and add or
/// remove files after handing the file system to an `Organizer`. Every read is
/// counted, which lets tests check caching.
#[derive(Clone, Debug)]
pub struct MockFileSystem {
    cwd: AbsoluteFsPath,
    files: Arc<Mutex<HashMap<AbsoluteFsPath, String>>>,
    reads: Arc<Mutex<usize>>,
}

impl MockFileSystem {
    pub fn new(cwd: &str) -> Self {
        MockFileSystem {
            cwd: AbsoluteFsPath::new(cwd),
            files: Arc::new(Mutex::new(HashMap::new())),
            reads: Arc::new(Mutex::new(0)),
        }
    }

    pub fn new_posix() -> Self {
        Self::new("/")
    }

    pub fn init_with_files(&self, files: Vec<(&str, &str)>) {
        for (path, content) in files {
            self.write_file(path, content);
        }
    }

    pub fn write_file(&self, path: &str, content: &str) {
        let path = self.resolve(&[path]);
        self.files().insert(path, content.to_string());
    }

    pub fn remove_file(&self, path: &str) {
        let path = self.resolve(&[path]);
        self.files().remove(&path);
    }

    pub fn read_count(&self) -> usize {
        *self.reads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn files(&self) -> MutexGuard<'_, HashMap<AbsoluteFsPath, String>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PathManipulation for MockFileSystem {
    fn pwd(&self) -> AbsoluteFsPath {
        self.cwd.clone()
    }
}

impl ReadonlyFileSystem for MockFileSystem {
    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        self.files().contains_key(path)
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        *self.reads.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        self.files().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("ENOENT: no such file: {}", path),
            )
        })
    }
}
