//! In-memory file system, for tests and for hosts without a writable disk

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::application::ports::filesystem_port::{FileSystemError, FileSystemPort};

/// Map-backed file system
#[derive(Default)]
pub struct InMemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryFileSystem {
    /// Create an empty file system
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.lock().insert(path.into(), content.into());
    }

    /// Make every subsequent write and delete fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent read fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_writable(&self, path: &Path) -> Result<(), FileSystemError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FileSystemError::PermissionDenied(path.to_path_buf()));
        }
        Ok(())
    }
}

impl FileSystemPort for InMemoryFileSystem {
    fn read_string(&self, path: &Path) -> Result<String, FileSystemError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(FileSystemError::PermissionDenied(path.to_path_buf()));
        }
        self.files
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
    }

    fn write_string(&self, path: &Path, content: &str) -> Result<(), FileSystemError> {
        self.check_writable(path)?;
        self.files.lock().insert(path.to_path_buf(), content.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    fn remove_file(&self, path: &Path) -> Result<(), FileSystemError> {
        self.check_writable(path)?;
        self.files
            .lock()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
    }

    fn ensure_file(&self, path: &Path) -> Result<(), FileSystemError> {
        let mut files = self.files.lock();
        if !files.contains_key(path) {
            self.check_writable(path)?;
            files.insert(path.to_path_buf(), String::new());
        }
        Ok(())
    }

    fn create_dir(&self, _path: &Path) -> Result<(), FileSystemError> {
        Ok(())
    }

    fn app_data_dir(&self) -> PathBuf {
        PathBuf::from("/memory")
    }
}
