//! Filesystem pass-through operations.
//!
//! Every operation stringifies the path and calls straight into `std::fs`,
//! propagating the OS error unchanged. Nothing here participates in the
//! allocator's invariants.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::FastPath;

impl FastPath {
    /// The path as an OS path, ready for `std::fs`.
    pub fn os_path(&self) -> io::Result<PathBuf> {
        self.to_path_string()
            .map(PathBuf::from)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    /// Whether the path exists on disk.
    pub fn exists(&self) -> bool {
        self.os_path().is_ok_and(|p| p.exists())
    }

    /// Whether the path is a regular file.
    pub fn is_file(&self) -> bool {
        self.os_path().is_ok_and(|p| p.is_file())
    }

    /// Whether the path is a directory.
    pub fn is_dir(&self) -> bool {
        self.os_path().is_ok_and(|p| p.is_dir())
    }

    /// File metadata.
    pub fn metadata(&self) -> io::Result<fs::Metadata> {
        fs::metadata(self.os_path()?)
    }

    /// Read the file as UTF-8 text.
    pub fn read_text(&self) -> io::Result<String> {
        fs::read_to_string(self.os_path()?)
    }

    /// Write text, replacing any existing contents.
    pub fn write_text(&self, contents: &str) -> io::Result<()> {
        fs::write(self.os_path()?, contents)
    }

    /// Read the raw file contents.
    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(self.os_path()?)
    }

    /// Write raw bytes, replacing any existing contents.
    pub fn write_bytes(&self, contents: &[u8]) -> io::Result<()> {
        fs::write(self.os_path()?, contents)
    }

    /// Create the directory. The parent must exist.
    pub fn create_dir(&self) -> io::Result<()> {
        fs::create_dir(self.os_path()?)
    }

    /// Create the directory and any missing ancestors.
    pub fn create_dir_all(&self) -> io::Result<()> {
        fs::create_dir_all(self.os_path()?)
    }

    /// Remove the file.
    pub fn remove_file(&self) -> io::Result<()> {
        fs::remove_file(self.os_path()?)
    }

    /// Remove the empty directory.
    pub fn remove_dir(&self) -> io::Result<()> {
        fs::remove_dir(self.os_path()?)
    }
}
