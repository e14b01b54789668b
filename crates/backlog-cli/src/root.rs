use backlog_core::paths::BACKLOG_DIR;
use std::path::{Path, PathBuf};

/// Resolve the project root that holds `.backlog/`.
///
/// Priority:
/// 1. `--root` flag / `BACKLOG_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.backlog/`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    discover_from(&cwd)
}

fn discover_from(start: &Path) -> PathBuf {
    find_ancestor_with(start, BACKLOG_DIR)
        .or_else(|| find_ancestor_with(start, ".git"))
        .unwrap_or_else(|| start.to_path_buf())
}

fn find_ancestor_with(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}
