use anyhow::{Context, Result};
use std::path::Path;
use tasktrack_core::id_pool::IdPool;
use tasktrack_store::repository::Repository;

/// State for one invocation: the opened storage root plus the id pool loaded
/// from it. `finish` writes the pool back.
pub struct Session {
    pub repo: Repository,
    pub pool: IdPool,
}

impl Session {
    pub fn open(root: &Path) -> Result<Self> {
        let repo = Repository::open(root)
            .with_context(|| format!("failed to prepare storage at {}", root.display()))?;
        let pool = repo.load_pool().context("failed to load id pool")?;
        Ok(Self { repo, pool })
    }

    pub fn finish(self) -> Result<()> {
        self.repo
            .pool_file
            .persist(&self.pool)
            .context("failed to persist id pool")
    }
}
