use std::{
    io::Write,
    path::{Path, PathBuf},
};

use fs_err as fs;
use tracing::{debug, warn};

use crate::error::Error;

/// Lock file guaranteeing that only one recorder instance runs at a time.
///
/// The lock is released by [`release`](Self::release) or on drop. A lock
/// file left behind by a crashed process has to be deleted by the operator;
/// the file contains the PID of the holder to make that call easier.
#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
    released: bool,
}

impl InstanceLock {
    /// Creates the lock file, failing with [`Error::LockHeld`] if it already
    /// exists.
    pub fn try_acquire(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => Error::LockHeld(path.clone()),
                _ => Error::Io(path.clone(), e),
            })?;
        file.write_all(std::process::id().to_string().as_bytes())
            .map_err(|e| Error::Io(path.clone(), e))?;
        debug!("acquired instance lock {:?}", path);
        Ok(Self {
            path,
            released: false,
        })
    }

    pub fn lock_path(&self) -> &Path {
        &self.path
    }

    /// Removes the lock file.
    pub fn release(mut self) -> Result<(), Error> {
        self.released = true;
        debug!("releasing instance lock {:?}", self.path);
        fs::remove_file(&self.path).map_err(|e| Error::Io(self.path.clone(), e))
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!("failed to remove lock file {:?}: {}", self.path, e);
            }
        }
    }
}
