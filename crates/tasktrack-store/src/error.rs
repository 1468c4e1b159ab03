use tasktrack_core::id::TaskId;
use tasktrack_core::task::TaskStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Core(#[from] tasktrack_core::error::CoreError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    #[error("task {0} already exists on disk (id pool out of sync, run `reindex`)")]
    TaskExists(TaskId),

    #[error("task file {file}.json holds a record for task {record}")]
    IdMismatch { file: TaskId, record: TaskId },

    #[error("task {id} already has status {status}")]
    StatusUnchanged { id: TaskId, status: TaskStatus },

    #[error("lock file conflict: {0} exists; remove it if no other tasktrack is running, or run `reindex`")]
    LockConflict(String),

    #[error("cannot resolve home directory; set TASKTRACK_HOME or pass --root")]
    HomeNotFound,
}
