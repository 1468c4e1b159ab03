use crate::error::StoreError;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Exclusive writer for a single storage file.
///
/// Data goes to `<target>.lock` (opened with `create_new`, so a second writer
/// fails with `LockConflict`) and is renamed over `<target>` on commit. An
/// uncommitted lock file is removed on drop, leaving the target untouched.
pub struct Lockfile {
    target: PathBuf,
    lock_path: PathBuf,
    file: Option<fs::File>,
}

impl Lockfile {
    pub fn acquire(target: impl AsRef<Path>) -> Result<Self, StoreError> {
        let target = target.as_ref().to_path_buf();
        let lock_path = lock_path_for(&target);

        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(file) => Ok(Self {
                target,
                lock_path,
                file: Some(file),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(StoreError::LockConflict(lock_path.display().to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<(), StoreError> {
        let file = self.file.as_mut().ok_or_else(|| {
            StoreError::Io(std::io::Error::other(format!(
                "{} already committed",
                self.lock_path.display()
            )))
        })?;
        file.write_all(data)?;
        file.flush()?;
        Ok(())
    }

    /// Sync the written bytes and rename the lock file over the target.
    pub fn commit(mut self) -> Result<(), StoreError> {
        if let Some(file) = self.file.take() {
            file.sync_all()?;
        }
        fs::rename(&self.lock_path, &self.target)?;
        Ok(())
    }
}

impl Drop for Lockfile {
    fn drop(&mut self) {
        if self.file.is_some() {
            let _ = fs::remove_file(&self.lock_path);
        }
    }
}

/// `tasks/3.json` -> `tasks/3.json.lock`
pub fn lock_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    target.with_file_name(name)
}

/// Serialize `value` as JSON and replace `target` with it in one rename.
pub fn write_json(target: &Path, value: &impl Serialize) -> Result<(), StoreError> {
    let json = serde_json::to_vec(value)?;
    write_bytes(target, &json)
}

pub fn write_bytes(target: &Path, data: &[u8]) -> Result<(), StoreError> {
    let mut lock = Lockfile::acquire(target)?;
    lock.write_all(data)?;
    lock.commit()
}
