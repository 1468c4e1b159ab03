use crate::error::StoreError;
use crate::lockfile::{self, Lockfile};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tasktrack_core::id_pool::IdPool;
use tracing::{debug, warn};

/// Reads and writes `tasks/idPool.json`.
pub struct PoolStore {
    path: PathBuf,
}

impl PoolStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the pool, creating an empty pool file if none exists yet.
    pub fn load(&self) -> Result<IdPool, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let pool = IdPool::new();
                self.persist(&pool)?;
                debug!(path = %self.path.display(), "created empty id pool");
                return Ok(pool);
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        let pool = IdPool::from_json(&data)?;
        debug!(ids = pool.len(), "loaded id pool");
        Ok(pool)
    }

    /// Overwrite the pool file with the current set.
    pub fn persist(&self, pool: &IdPool) -> Result<(), StoreError> {
        let lock = self.lock()?;
        self.commit(lock, pool)
    }

    /// Take the pool's lock file without writing anything yet.
    pub fn lock(&self) -> Result<Lockfile, StoreError> {
        Lockfile::acquire(&self.path)
    }

    /// Write `pool` through a lock obtained from [`PoolStore::lock`].
    pub fn commit(&self, mut lock: Lockfile, pool: &IdPool) -> Result<(), StoreError> {
        lock.write_all(pool.to_json()?.as_bytes())?;
        lock.commit()?;
        debug!(ids = pool.len(), "persisted id pool");
        Ok(())
    }

    /// Remove a `idPool.json.lock` left behind by an interrupted run.
    /// Returns `true` if one was found.
    pub fn clear_stale_lock(&self) -> Result<bool, StoreError> {
        let lock_path = lockfile::lock_path_for(&self.path);
        match fs::remove_file(&lock_path) {
            Ok(()) => {
                warn!(path = %lock_path.display(), "removed stale id pool lock");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
