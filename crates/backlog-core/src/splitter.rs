use crate::error::{BacklogError, Result};
use crate::parser::Block;
use crate::specs;

/// Specs bullets a block may hold before it is split.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 6;

/// Header line that opens a sub-task body.
pub const SPECS_HEADER: &str = "Specs";

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// One ordered slice of a split block's bullet lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 1-based position within the split.
    pub part: usize,
    pub bullets: Vec<String>,
}

impl Chunk {
    /// `Specs` followed by the chunk's bullet lines.
    pub fn body(&self) -> Vec<String> {
        std::iter::once(SPECS_HEADER.to_string())
            .chain(self.bullets.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The block is emitted as one task, unchanged.
    Whole,
    /// The block is emitted as one sub-task per chunk, in order.
    Split(Vec<Chunk>),
}

/// Decide how `block` is emitted.
///
/// Only the first Specs section decides whether to split, but the chunks are
/// cut from every bullet line in the body.
pub fn plan(block: &Block, threshold: usize) -> Result<Plan> {
    if threshold == 0 {
        return Err(BacklogError::InvalidThreshold(threshold));
    }
    let count = specs::count_spec_bullets(&block.body);
    if count <= threshold {
        return Ok(Plan::Whole);
    }

    let bullets = specs::bullet_lines(&block.body);
    let chunks = bullets
        .chunks(threshold)
        .enumerate()
        .map(|(i, lines)| Chunk {
            part: i + 1,
            bullets: lines.iter().map(|l| l.to_string()).collect(),
        })
        .collect();
    Ok(Plan::Split(chunks))
}

/// `Checkout flow (part 2)`
pub fn part_title(title: &str, part: usize) -> String {
    format!("{title} (part {part})")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
