//! FileSystem infrastructure - File system operations

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::application::ports::filesystem_port::{FileSystemError, FileSystemPort};

/// Standard file system implementation
pub struct StdFileSystem {
    app_data_dir: PathBuf,
}

impl StdFileSystem {
    /// Create a new standard file system
    pub fn new() -> Self {
        let app_data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("intercom-history");

        Self { app_data_dir }
    }

    /// Create with a custom data directory
    pub fn with_data_dir(app_data_dir: PathBuf) -> Self {
        Self { app_data_dir }
    }

    /// Sibling path used while a write is in flight
    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }
}

impl Default for StdFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemPort for StdFileSystem {
    fn read_string(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path).map_err(|e| FileSystemError::from_io(e, path))
    }

    fn write_string(&self, path: &Path, content: &str) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| FileSystemError::from_io(e, parent))?;
            }
        }

        // Write next to the target, flush, then rename over it
        let temp_path = Self::temp_path(path);
        let written = (|| {
            let mut file = File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()
        })()
        .map_err(|e| FileSystemError::from_io(e, &temp_path))
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| FileSystemError::from_io(e, path)));

        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }

        written
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove_file(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::remove_file(path).map_err(|e| FileSystemError::from_io(e, path))
    }

    fn ensure_file(&self, path: &Path) -> Result<(), FileSystemError> {
        if path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| FileSystemError::from_io(e, parent))?;
            }
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| FileSystemError::from_io(e, path))?;
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::create_dir_all(path).map_err(|e| FileSystemError::from_io(e, path))
    }

    fn app_data_dir(&self) -> PathBuf {
        self.app_data_dir.clone()
    }
}
