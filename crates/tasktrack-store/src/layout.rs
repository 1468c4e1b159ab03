//! On-disk layout of a storage root and its bootstrap.
//!
//! ```text
//! <root>/                 0755
//!   tasks/                0755
//!     <id>.json           one per task
//!     idPool.json         ids in use
//!   configs/              0755
//!     config.json         storage format marker
//! ```

use crate::error::StoreError;
use crate::lockfile;
use chrono::Utc;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name used under the user's home directory.
pub const DEFAULT_DIR_NAME: &str = ".task-tracker-cli";

/// Environment variable overriding the storage root.
pub const HOME_ENV: &str = "TASKTRACK_HOME";

pub const TASKS_DIR: &str = "tasks";
pub const CONFIGS_DIR: &str = "configs";
pub const ID_POOL_FILE: &str = "idPool.json";
pub const CONFIG_FILE: &str = "config.json";

#[cfg_attr(not(unix), allow(dead_code))]
const DIR_MODE: u32 = 0o755;
const FORMAT_VERSION: u32 = 1;

/// Resolve the storage root: explicit path, then `TASKTRACK_HOME`, then
/// `~/.task-tracker-cli`.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf, StoreError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(value) = std::env::var(HOME_ENV) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .ok_or(StoreError::HomeNotFound)
}

/// Paths inside one storage root.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.root.join(TASKS_DIR)
    }

    pub fn configs_dir(&self) -> PathBuf {
        self.root.join(CONFIGS_DIR)
    }

    pub fn id_pool_path(&self) -> PathBuf {
        self.tasks_dir().join(ID_POOL_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.configs_dir().join(CONFIG_FILE)
    }

    /// Create the root and its subdirectories if missing, then write the
    /// config marker once. Safe to call on an existing root.
    pub fn bootstrap(&self) -> Result<(), StoreError> {
        for dir in [self.root.clone(), self.tasks_dir(), self.configs_dir()] {
            ensure_dir(&dir)?;
        }
        self.ensure_config()
    }

    fn ensure_config(&self) -> Result<(), StoreError> {
        let path = self.config_path();
        if path.exists() {
            return Ok(());
        }
        let config = serde_json::json!({
            "version": FORMAT_VERSION,
            "created_at": Utc::now().to_rfc3339(),
        });
        lockfile::write_bytes(&path, serde_json::to_string_pretty(&config)?.as_bytes())?;
        debug!(path = %path.display(), "wrote storage config");
        Ok(())
    }
}

/// Create a single directory with mode 0755. An existing directory is a no-op;
/// a missing parent or permission problem is an error.
pub fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    match builder.create(path) {
        Ok(()) => {
            debug!(path = %path.display(), "created directory");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(StoreError::Io(io::Error::new(
            e.kind(),
            format!("cannot create {}: {}", path.display(), e),
        ))),
    }
}
