use anyhow::{Context, Result};
use tasktrack_core::id::TaskId;

use crate::session::Session;

pub fn run(session: &mut Session, json: bool) -> Result<()> {
    let report = session
        .repo
        .reindex(&mut session.pool)
        .context("failed to rebuild id pool")?;

    if json {
        let entry = serde_json::json!({
            "total": report.total,
            "added": report.added,
            "dropped": report.dropped,
        });
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    println!("Rebuilding id pool...");
    println!("  tasks:   {}", report.total);
    println!("  added:   {}", join(&report.added));
    println!("  dropped: {}", join(&report.dropped));
    println!("Done.");
    Ok(())
}

fn join(ids: &[TaskId]) -> String {
    if ids.is_empty() {
        return "-".into();
    }
    ids.iter().map(TaskId::to_string).collect::<Vec<_>>().join(", ")
}
