use crate::error::StoreError;
use crate::layout::StorageLayout;
use crate::pool_store::PoolStore;
use crate::task_store::TaskStore;
use chrono::Utc;
use std::path::Path;
use tasktrack_core::id::TaskId;
use tasktrack_core::id_pool::IdPool;
use tasktrack_core::task::{Task, TaskStatus};
use tracing::{debug, info, warn};

/// A bootstrapped storage root.
///
/// Combines the per-task record store with the id pool file. The pool itself
/// is not held here: callers load it once, pass it to each operation, and
/// persist it when done.
pub struct Repository {
    layout: StorageLayout,
    pub tasks: TaskStore,
    pub pool_file: PoolStore,
}

/// Outcome of rebuilding the pool from the task files on disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReindexReport {
    pub total: usize,
    pub added: Vec<TaskId>,
    pub dropped: Vec<TaskId>,
}

impl Repository {
    /// Open the storage root at `root`, creating its directories if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let layout = StorageLayout::new(root.as_ref());
        layout.bootstrap()?;
        debug!(root = %layout.root().display(), "storage ready");
        Ok(Self {
            tasks: TaskStore::new(layout.tasks_dir()),
            pool_file: PoolStore::new(layout.id_pool_path()),
            layout,
        })
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn load_pool(&self) -> Result<IdPool, StoreError> {
        self.pool_file.load()
    }

    /// Allocate an id, write the new active task, and record the id.
    ///
    /// The pool lock is taken before the task file is written, so a pool that
    /// cannot be updated leaves no orphan record behind. The pool file is
    /// rewritten as soon as the task file exists.
    pub fn create_task(&self, pool: &mut IdPool, description: &str) -> Result<Task, StoreError> {
        let id = pool.allocate();
        let task = Task::new(id, description, Utc::now())?;
        let lock = self.pool_file.lock()?;
        self.tasks.insert(&task)?;
        pool.insert(id);
        self.pool_file.commit(lock, pool)?;
        info!(id = %id, "created task");
        Ok(task)
    }

    pub fn read_task(&self, id: TaskId) -> Result<Task, StoreError> {
        self.tasks.read(id)
    }

    /// Change a task's status, returning the previous one.
    ///
    /// Marking a task with the status it already has is an error and leaves
    /// the file untouched.
    pub fn mark(&self, id: TaskId, status: TaskStatus) -> Result<(TaskStatus, Task), StoreError> {
        let mut task = self.tasks.read(id)?;
        if task.status == status {
            return Err(StoreError::StatusUnchanged { id, status });
        }
        let previous = task.status;
        task.status = status;
        self.tasks.write(&task)?;
        info!(id = %id, from = %previous, to = %status, "marked task");
        Ok((previous, task))
    }

    /// Every pooled task whose status equals `filter`, in ascending id order.
    ///
    /// A pooled id whose file is missing or unreadable fails the listing.
    pub fn list(&self, pool: &IdPool, filter: TaskStatus) -> Result<Vec<Task>, StoreError> {
        let mut matching = Vec::new();
        for id in pool.iter() {
            let task = self.tasks.read(id)?;
            if task.status == filter {
                matching.push(task);
            }
        }
        debug!(status = %filter, scanned = pool.len(), matched = matching.len(), "listed tasks");
        Ok(matching)
    }

    /// Replace the pool with the ids of the task files actually present and
    /// persist it. A leftover pool lock from an interrupted run is removed.
    pub fn reindex(&self, pool: &mut IdPool) -> Result<ReindexReport, StoreError> {
        self.pool_file.clear_stale_lock()?;
        let on_disk: IdPool = self.tasks.scan_ids()?.into_iter().collect();

        let added: Vec<TaskId> = on_disk.iter().filter(|id| !pool.contains(*id)).collect();
        let dropped: Vec<TaskId> = pool.iter().filter(|id| !on_disk.contains(*id)).collect();
        for id in &dropped {
            warn!(id = %id, "pooled id has no task file");
        }

        *pool = on_disk;
        self.pool_file.persist(pool)?;
        Ok(ReindexReport {
            total: pool.len(),
            added,
            dropped,
        })
    }
}
