use anyhow::{Context, Result};

use crate::session::Session;

pub fn run(session: &mut Session, words: Vec<String>, json: bool) -> Result<()> {
    let description = words.join(" ");
    let task = session
        .repo
        .create_task(&mut session.pool, &description)
        .context("failed to create task")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Task {} created", task.id);
    }
    Ok(())
}
