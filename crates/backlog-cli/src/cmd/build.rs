use crate::output::print_json;
use anyhow::Context;
use backlog_core::{
    compile::compile,
    config::Config,
    store::{self, WriteOptions},
};
use std::path::Path;

pub struct BuildArgs {
    pub threshold: Option<usize>,
    pub no_split: bool,
    pub prune: bool,
}

/// `backlog build <PRD>`: full rebuild of `.backlog/` from the PRD.
///
/// The PRD is read and compiled before anything under `.backlog/` is touched,
/// so a bad input or an id collision leaves the previous ledger in place.
pub fn run(root: &Path, prd: &Path, args: BuildArgs, json: bool) -> anyhow::Result<()> {
    if args.threshold == Some(0) {
        anyhow::bail!("--threshold must be at least 1");
    }
    if !prd.is_file() {
        anyhow::bail!("PRD not found: {}", prd.display());
    }

    let text = backlog_core::io::read_text(prd)
        .with_context(|| format!("failed to read {}", prd.display()))?;
    let config = Config::load(root).context("failed to load .backlog/config.yaml")?;
    let opts = config.compile_options(args.threshold, args.no_split);

    let backlog = compile(&text, &opts)
        .with_context(|| format!("failed to compile {}", prd.display()))?;

    let write_opts = WriteOptions {
        prune: args.prune || config.prune_stale,
    };
    let report = store::write(root, &backlog, &write_opts).context("failed to write .backlog/")?;

    if !report.is_complete() {
        for err in &report.failed {
            eprintln!("error: {err}");
        }
        anyhow::bail!(
            "{} of {} task documents could not be written; ledger was rebuilt",
            report.failed.len(),
            backlog.documents.len()
        );
    }

    if json {
        let documents: Vec<String> = report
            .written
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        let pruned: Vec<String> = report
            .pruned
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        print_json(&serde_json::json!({
            "tasks": backlog.ledger.len(),
            "ledger": report.ledger_path.display().to_string(),
            "documents": documents,
            "pruned": pruned,
        }))?;
    } else {
        if !report.pruned.is_empty() {
            println!("Pruned {} stale task documents", report.pruned.len());
        }
        println!("Rebuilt backlog ({} tasks)", backlog.ledger.len());
    }
    Ok(())
}
