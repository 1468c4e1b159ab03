use anyhow::{Context, Result};
use tasktrack_core::id::TaskId;

use crate::session::Session;

pub fn run(session: &Session, id: String, json: bool) -> Result<()> {
    let id = TaskId::parse(&id)?;
    let task = session
        .repo
        .read_task(id)
        .with_context(|| format!("cannot show task {}", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
        return Ok(());
    }

    println!("task {}", task.id);
    println!("Status:  {}", task.status);
    println!("Created: {}", task.created_at);
    println!();
    println!("    {}", task.description);
    Ok(())
}
