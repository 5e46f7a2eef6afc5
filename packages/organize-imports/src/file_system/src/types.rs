use std::io;
use std::path::Path;

use super::util::{clean_path, normalize_separators};

/// A fully qualified path in the file system, in POSIX form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsoluteFsPath(String);

impl AbsoluteFsPath {
    /// Wrap an already-absolute path, cleaning it into canonical form.
    pub fn new(path: impl AsRef<str>) -> Self {
        AbsoluteFsPath(clean_path(path.as_ref()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::new(normalize_separators(&path.as_ref().to_string_lossy()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl AsRef<str> for AbsoluteFsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for AbsoluteFsPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl std::fmt::Display for AbsoluteFsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An abstraction over the path manipulation aspects of a file-system.
pub trait PathManipulation {
    fn pwd(&self) -> AbsoluteFsPath;

    /// Resolve `paths` right to left until an absolute path is formed,
    /// falling back to [`PathManipulation::pwd`].
    fn resolve(&self, paths: &[&str]) -> AbsoluteFsPath {
        let mut resolved = String::new();
        for path in paths.iter().rev() {
            let path = normalize_separators(path);
            resolved = if resolved.is_empty() {
                path
            } else {
                format!("{}/{}", path, resolved)
            };
            if super::util::is_rooted(&resolved) {
                return AbsoluteFsPath::new(resolved);
            }
        }
        let pwd = self.pwd();
        AbsoluteFsPath::new(format!("{}/{}", pwd.as_str(), resolved))
    }
}

/// An abstraction over the read-only aspects of a file-system.
pub trait ReadonlyFileSystem: PathManipulation {
    fn exists(&self, path: &AbsoluteFsPath) -> bool;
    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String>;
}
