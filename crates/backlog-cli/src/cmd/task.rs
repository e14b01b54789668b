use crate::output::{print_json, print_table};
use anyhow::Context;
use backlog_core::{ledger::TaskRecord, store};
use serde::Serialize;
use std::path::Path;

/// A record with its ledger key inlined, for JSON output.
#[derive(Serialize)]
struct TaskView<'a> {
    id: &'a str,
    #[serde(flatten)]
    record: &'a TaskRecord,
}

impl<'a> From<&'a TaskRecord> for TaskView<'a> {
    fn from(record: &'a TaskRecord) -> Self {
        Self {
            id: &record.id,
            record,
        }
    }
}

pub fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let ledger = store::load_ledger(root).context("failed to load ledger")?;

    if json {
        let tasks: Vec<TaskView> = ledger.iter().map(TaskView::from).collect();
        print_json(&tasks)?;
        return Ok(());
    }

    if ledger.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = ledger
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.status.to_string(),
                t.deps.join(","),
                t.title.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "STATUS", "DEPS", "TITLE"], rows);
    Ok(())
}

pub fn show(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let ledger = store::load_ledger(root).context("failed to load ledger")?;
    let task = ledger.find(id)?;

    if json {
        print_json(&TaskView::from(task))?;
        return Ok(());
    }

    println!("Task: {}", task.id);
    println!("Status:      {}", task.status);
    println!("Title:       {}", task.title);
    if !task.deps.is_empty() {
        println!("Depends:     {}", task.deps.join(", "));
    }
    println!("Complexity:  {}", task.complexity);
    if let Some(note) = &task.note {
        println!("Note:        {note}");
    }
    Ok(())
}
