//! PRD heading grammar and block segmentation.
//!
//! A block starts at a heading of the form
//!
//! ```text
//! ## 3 Payment page (depends: 1, 2)
//! ```
//!
//! and owns every line up to the next heading. Lines that do not fully match
//! the grammar are body text, so malformed headings never fail a parse.

use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Heading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub declared_id: String,
    pub title: String,
    pub deps: Vec<String>,
}

static HEADING_RE: OnceLock<Regex> = OnceLock::new();

fn heading_re() -> &'static Regex {
    HEADING_RE.get_or_init(|| {
        Regex::new(
            r"^##\s+(?P<id>\d+(?:\.\d+)*)\s+(?P<title>[^(]+?)(?:\s+\(depends:\s*(?P<deps>[0-9.,\s]+)\))?\s*$",
        )
        .unwrap()
    })
}

/// Match one line against the heading grammar.
pub fn parse_heading(line: &str) -> Option<Heading> {
    let caps = heading_re().captures(line)?;
    let deps = caps
        .name("deps")
        .map(|m| split_deps(m.as_str()))
        .unwrap_or_default();
    Some(Heading {
        declared_id: caps["id"].to_string(),
        title: caps["title"].trim().to_string(),
        deps,
    })
}

/// Comma-separated ids, blanks dropped, first occurrence wins.
fn split_deps(raw: &str) -> Vec<String> {
    let mut deps: Vec<String> = Vec::new();
    for dep in raw.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        if !deps.iter().any(|d| d == dep) {
            deps.push(dep.to_string());
        }
    }
    deps
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Id as written in the document; not unique once blocks are split.
    pub declared_id: String,
    pub title: String,
    pub deps: Vec<String>,
    pub body: Vec<String>,
}

impl Block {
    fn open(heading: Heading) -> Self {
        Self {
            declared_id: heading.declared_id,
            title: heading.title,
            deps: heading.deps,
            body: Vec::new(),
        }
    }
}

/// Segment a document into blocks. Text before the first heading is dropped.
pub fn parse_document(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for line in text.lines() {
        if let Some(heading) = parse_heading(line) {
            if let Some(done) = current.take() {
                blocks.push(done);
            }
            current = Some(Block::open(heading));
        } else if let Some(block) = current.as_mut() {
            block.body.push(line.to_string());
        }
    }
    if let Some(done) = current {
        blocks.push(done);
    }
    blocks
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
