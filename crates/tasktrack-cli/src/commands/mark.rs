use anyhow::{Context, Result};
use tasktrack_core::id::TaskId;
use tasktrack_core::task::TaskStatus;
use tracing::warn;

use crate::session::Session;

pub fn run(session: &Session, id: String, status: String, json: bool) -> Result<()> {
    let id = TaskId::parse(&id)?;
    let status: TaskStatus = status.parse()?;

    if !session.pool.contains(id) {
        warn!(id = %id, "task is not in the id pool; run `reindex`");
    }

    let (previous, task) = session
        .repo
        .mark(id, status)
        .with_context(|| format!("cannot mark task {}", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Task {}: {} -> {}", id, previous, task.status);
    }
    Ok(())
}
