use std::fs;
use std::io;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
        let path = path.as_ref();
        if !Self::dir_exists(path) {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @writes: Bytes to a file inside a directory, creating the directory
    // @returns: Full path of the written file
    pub fn write_bytes<P: AsRef<Path>>(dir: P, file_name: &str, content: &[u8]) -> io::Result<PathBuf> {
        let dir = dir.as_ref();
        Self::ensure_dir(dir)?;
        let path = dir.join(file_name);
        fs::write(&path, content)?;
        Ok(path)
    }

    // @sanitizes: Text for use inside a file name
    pub fn sanitize_file_component(text: &str) -> String {
        let cleaned: String = text
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        if cleaned.is_empty() {
            "unknown".to_string()
        } else {
            cleaned
        }
    }
}
