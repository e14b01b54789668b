use crate::output::print_json;
use anyhow::Context;
use backlog_core::{io, sanitize::sanitize};
use std::path::Path;

/// `backlog sanitize <PRD>`: rewrite the PRD in place with normalized headings
/// and bullets.
pub fn run(prd: &Path, json: bool) -> anyhow::Result<()> {
    if !prd.is_file() {
        anyhow::bail!("PRD not found: {}", prd.display());
    }
    let raw = io::read_text(prd).with_context(|| format!("failed to read {}", prd.display()))?;
    let clean = sanitize(&raw);
    let changed = clean != raw;
    io::atomic_write(prd, clean.as_bytes())
        .with_context(|| format!("failed to write {}", prd.display()))?;

    if json {
        print_json(&serde_json::json!({
            "path": prd.display().to_string(),
            "changed": changed,
        }))?;
    } else {
        println!("Sanitised → {}", prd.display());
    }
    Ok(())
}
