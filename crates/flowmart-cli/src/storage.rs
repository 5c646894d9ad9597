//! Bearer token persisted between CLI runs.

use flowmart_api::CredentialStore;
use log::{debug, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Keeps the token in a single file, by default `~/.flowmart/credentials`.
///
/// The [`CredentialStore`] interface cannot fail, so I/O errors are logged
/// and the store behaves as if no token were present.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // Serialises writers within this process
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.path.with_extension("tmp");
        match fs::remove_file(&temp_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
            _ => {}
        }
        let mut file = create_private(&temp_path)?;
        file.write_all(token.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Some(content.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, token: &str) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match self.write(token) {
            Ok(()) => debug!("Stored credential in {}", self.path.display()),
            Err(e) => warn!("Could not write {}: {}", self.path.display(), e),
        }
    }

    fn clear(&self) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove {}: {}", self.path.display(), e),
        }
    }
}

/// Owner-only from the moment it exists.
#[cfg(unix)]
fn create_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new().write(true).create_new(true).open(path)
}
