use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const BACKLOG_DIR: &str = ".backlog";
pub const TASKS_DIR: &str = ".backlog/tasks";

pub const LEDGER_FILE: &str = ".backlog/tasks.json";
pub const CONFIG_FILE: &str = ".backlog/config.yaml";

pub const TASK_DOC_EXT: &str = "md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn backlog_dir(root: &Path) -> PathBuf {
    root.join(BACKLOG_DIR)
}

pub fn tasks_dir(root: &Path) -> PathBuf {
    root.join(TASKS_DIR)
}

pub fn ledger_path(root: &Path) -> PathBuf {
    root.join(LEDGER_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// `<root>/.backlog/tasks/<id>.md`
pub fn task_doc_path(root: &Path, id: &str) -> PathBuf {
    tasks_dir(root).join(format!("{id}.{TASK_DOC_EXT}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
