//! FileSystemPort - interface for file system operations
//!
//! This port defines the file system capabilities the history store needs.

use std::path::{Path, PathBuf};

use crate::domain::errors::DomainError;

/// File system operation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// File content is not valid text
    InvalidContent(PathBuf),
    /// IO error
    IoError(String),
}

impl FileSystemError {
    /// Classify an `std::io::Error` raised while touching `path`
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                FileSystemError::PermissionDenied(path.to_path_buf())
            }
            std::io::ErrorKind::InvalidData => FileSystemError::InvalidContent(path.to_path_buf()),
            _ => FileSystemError::IoError(format!("{}: {}", path.display(), err)),
        }
    }
}

impl std::fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileSystemError::NotFound(p) => write!(f, "File not found: {}", p.display()),
            FileSystemError::PermissionDenied(p) => {
                write!(f, "Permission denied: {}", p.display())
            }
            FileSystemError::InvalidContent(p) => {
                write!(f, "Invalid file content: {}", p.display())
            }
            FileSystemError::IoError(s) => write!(f, "IO error: {}", s),
        }
    }
}

impl std::error::Error for FileSystemError {}

impl From<std::io::Error> for FileSystemError {
    fn from(err: std::io::Error) -> Self {
        FileSystemError::IoError(err.to_string())
    }
}

impl From<FileSystemError> for DomainError {
    fn from(err: FileSystemError) -> Self {
        match err {
            FileSystemError::InvalidContent(_) => DomainError::StorageCorrupt(err.to_string()),
            _ => DomainError::StorageIo(err.to_string()),
        }
    }
}

/// Port interface for file system operations
pub trait FileSystemPort: Send + Sync {
    /// Read a file as string
    fn read_string(&self, path: &Path) -> Result<String, FileSystemError>;

    /// Replace a file's content. Readers observe either the old or the
    /// new content, never a partial write.
    fn write_string(&self, path: &Path, content: &str) -> Result<(), FileSystemError>;

    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Delete a file
    fn remove_file(&self, path: &Path) -> Result<(), FileSystemError>;

    /// Create an empty file (and its parent directories) if absent
    fn ensure_file(&self, path: &Path) -> Result<(), FileSystemError>;

    /// Create a directory (and parents)
    fn create_dir(&self, path: &Path) -> Result<(), FileSystemError>;

    /// Get the application data directory
    fn app_data_dir(&self) -> PathBuf;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_is_content_error() {
        let path = Path::new("/data/history.toml");
        let err = FileSystemError::from_io(
            std::io::Error::new(std::io::ErrorKind::InvalidData, "not utf-8"),
            path,
        );

        assert_eq!(err, FileSystemError::InvalidContent(path.to_path_buf()));
        assert!(DomainError::from(err).is_recoverable());
    }

    #[test]
    fn test_io_failures_stay_io_errors() {
        let path = Path::new("/data/history.toml");
        let denied = FileSystemError::from_io(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            path,
        );

        assert!(matches!(DomainError::from(denied), DomainError::StorageIo(_)));
    }
}
