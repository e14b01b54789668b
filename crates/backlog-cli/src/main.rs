mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "backlog",
    about = "Compile a PRD into a task ledger, splitting oversized tasks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .backlog/ or .git/)
    #[arg(long, global = true, env = "BACKLOG_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log pipeline decisions to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild .backlog/ from a PRD (full rebuild, hand edits are discarded)
    Build {
        /// Path to the PRD markdown file
        prd: PathBuf,

        /// Specs bullets a task may hold before it is split (overrides config.yaml)
        #[arg(long)]
        threshold: Option<usize>,

        /// Emit one task per heading, never splitting
        #[arg(long)]
        no_split: bool,

        /// Delete task documents the PRD no longer produces
        #[arg(long)]
        prune: bool,
    },

    /// Normalize headings and bullets of a PRD in place
    Sanitize {
        /// Path to the PRD markdown file
        prd: PathBuf,
    },

    /// List tasks in the current ledger
    List,

    /// Show a single task from the current ledger
    Show { id: String },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Build {
            prd,
            threshold,
            no_split,
            prune,
        } => cmd::build::run(
            &root,
            &prd,
            cmd::build::BuildArgs {
                threshold,
                no_split,
                prune,
            },
            cli.json,
        ),
        Commands::Sanitize { prd } => cmd::sanitize::run(&prd, cli.json),
        Commands::List => cmd::task::list(&root, cli.json),
        Commands::Show { id } => cmd::task::show(&root, &id, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
