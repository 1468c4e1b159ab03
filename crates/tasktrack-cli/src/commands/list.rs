use anyhow::{Context, Result};
use tasktrack_core::task::TaskStatus;

use crate::session::Session;

pub fn run(session: &Session, status: String, json: bool) -> Result<()> {
    let filter: TaskStatus = status.parse()?;
    let tasks = session
        .repo
        .list(&session.pool, filter)
        .context("failed to list tasks")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No {} tasks.", filter);
        return Ok(());
    }

    for task in &tasks {
        println!("{:>4}  {}  ({})", task.id, task.description, task.created_at);
    }
    Ok(())
}
