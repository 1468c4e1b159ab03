use crate::error::StoreError;
use crate::layout::ID_POOL_FILE;
use crate::lockfile;
use std::fs;
use std::io;
use std::path::PathBuf;
use tasktrack_core::id::TaskId;
use tasktrack_core::task::Task;

/// One JSON file per task: `tasks/<id>.json`.
pub struct TaskStore {
    tasks_dir: PathBuf,
}

impl TaskStore {
    pub fn new(tasks_dir: impl Into<PathBuf>) -> Self {
        Self {
            tasks_dir: tasks_dir.into(),
        }
    }

    fn task_path(&self, id: TaskId) -> PathBuf {
        self.tasks_dir.join(id.file_name())
    }

    pub fn exists(&self, id: TaskId) -> bool {
        self.task_path(id).is_file()
    }

    /// Write a record for an id that has no file yet.
    pub fn insert(&self, task: &Task) -> Result<(), StoreError> {
        if self.exists(task.id) {
            return Err(StoreError::TaskExists(task.id));
        }
        self.write(task)
    }

    /// Replace the whole record for `task.id`.
    pub fn write(&self, task: &Task) -> Result<(), StoreError> {
        lockfile::write_json(&self.task_path(task.id), task)
    }

    pub fn read(&self, id: TaskId) -> Result<Task, StoreError> {
        let data = match fs::read_to_string(self.task_path(id)) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::TaskNotFound(id))
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        let task: Task = serde_json::from_str(&data)?;
        if task.id != id {
            return Err(StoreError::IdMismatch {
                file: id,
                record: task.id,
            });
        }
        Ok(task)
    }

    /// Ids of every `<id>.json` file present, ascending. The pool file, lock
    /// files and anything not named like a task are ignored.
    pub fn scan_ids(&self) -> Result<Vec<TaskId>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.tasks_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name == ID_POOL_FILE {
                continue;
            }
            if let Some(id) = name
                .strip_suffix(".json")
                .and_then(|stem| TaskId::parse(stem).ok())
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}
