use crate::compile::Backlog;
use crate::error::{BacklogError, Result};
use crate::io;
use crate::ledger::Ledger;
use crate::paths;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Delete task documents whose id is no longer in the ledger.
    pub prune: bool,
}

/// Outcome of a write. The ledger itself is always complete when a report is
/// returned; only task documents can be partial.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub ledger_path: PathBuf,
    pub written: Vec<PathBuf>,
    pub pruned: Vec<PathBuf>,
    pub failed: Vec<BacklogError>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Persist `backlog` under `<root>/.backlog/`.
///
/// Directory creation and the ledger write are fatal. A task document that
/// cannot be written is recorded in the report and the remaining documents
/// are still written. Pruning runs only once every document is in place.
pub fn write(root: &Path, backlog: &Backlog, opts: &WriteOptions) -> Result<WriteReport> {
    let tasks_dir = paths::tasks_dir(root);
    io::ensure_dir(&tasks_dir)?;

    let ledger_path = paths::ledger_path(root);
    io::atomic_write(&ledger_path, backlog.ledger.to_json()?.as_bytes())?;
    debug!(path = %ledger_path.display(), tasks = backlog.ledger.len(), "wrote ledger");

    let mut report = WriteReport {
        ledger_path,
        ..WriteReport::default()
    };

    for doc in &backlog.documents {
        let path = paths::task_doc_path(root, &doc.id);
        match std::fs::write(&path, doc.content.as_bytes()) {
            Ok(()) => report.written.push(path),
            Err(source) => {
                warn!(path = %path.display(), error = %source, "task document not written");
                report.failed.push(BacklogError::TaskDocument {
                    path: path.display().to_string(),
                    source,
                });
            }
        }
    }

    if opts.prune {
        if report.is_complete() {
            report.pruned = prune_stale(&tasks_dir, &backlog.ledger)?;
        } else {
            warn!(failed = report.failed.len(), "skipping prune after failed task documents");
        }
    }

    Ok(report)
}

/// Remove `*.md` files in `tasks_dir` whose stem is not a ledger id.
fn prune_stale(tasks_dir: &Path, ledger: &Ledger) -> Result<Vec<PathBuf>> {
    let live: HashSet<&str> = ledger.ids().collect();
    let mut pruned = Vec::new();

    for entry in std::fs::read_dir(tasks_dir)? {
        let path = entry?.path();
        if !path.is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(paths::TASK_DOC_EXT)
        {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !live.contains(stem) {
            std::fs::remove_file(&path)?;
            debug!(path = %path.display(), "pruned stale task document");
            pruned.push(path);
        }
    }
    pruned.sort();
    Ok(pruned)
}

/// Read the persisted ledger.
pub fn load_ledger(root: &Path) -> Result<Ledger> {
    let path = paths::ledger_path(root);
    if !path.exists() {
        return Err(BacklogError::NoLedger);
    }
    let data = io::read_text(&path)?;
    Ledger::from_json(&data)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
