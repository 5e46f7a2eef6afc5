use crate::file_system::src::types::{AbsoluteFsPath, PathManipulation, ReadonlyFileSystem};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Reads from the real disk. Paths are kept in POSIX form; `std::fs`
/// accepts forward slashes on every platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeJSFileSystem;

impl NodeJSFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl PathManipulation for NodeJSFileSystem {
    fn pwd(&self) -> AbsoluteFsPath {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        AbsoluteFsPath::from_path(cwd)
    }
}

impl ReadonlyFileSystem for NodeJSFileSystem {
    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        path.as_path().exists()
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        fs::read_to_string(path.as_path())
    }
}
