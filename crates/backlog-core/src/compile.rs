//! The pure PRD → ledger pipeline.
//!
//! `compile` never touches the filesystem; `store::write` persists its output.

use crate::error::Result;
use crate::ident::IdAssigner;
use crate::ledger::{Ledger, TaskRecord};
use crate::parser::{self, Block};
use crate::splitter::{self, Plan, DEFAULT_SPLIT_THRESHOLD};
use crate::types::TaskStatus;
use tracing::debug;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub split_threshold: usize,
    /// Emit every block as a single task regardless of its Specs size.
    pub no_split: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            no_split: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Rendered markdown for one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDocument {
    pub id: String,
    pub content: String,
}

impl TaskDocument {
    fn render(id: &str, title: &str, body: &[String]) -> Self {
        Self {
            id: id.to_string(),
            content: format!("# Task {id} – {title}\n{}\n", body.join("\n")),
        }
    }
}

/// Everything one run produces: the ledger and one document per record, both
/// in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backlog {
    pub ledger: Ledger,
    pub documents: Vec<TaskDocument>,
}

impl Backlog {
    fn push(&mut self, record: TaskRecord, document: TaskDocument) -> Result<()> {
        self.ledger.insert(record)?;
        self.documents.push(document);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Compile PRD text into a fresh backlog.
pub fn compile(text: &str, opts: &CompileOptions) -> Result<Backlog> {
    let blocks = parser::parse_document(text);
    compile_blocks(&blocks, opts)
}

pub fn compile_blocks(blocks: &[Block], opts: &CompileOptions) -> Result<Backlog> {
    let mut ids = IdAssigner::new();
    let mut backlog = Backlog::default();

    for block in blocks {
        let plan = if opts.no_split {
            Plan::Whole
        } else {
            splitter::plan(block, opts.split_threshold)?
        };

        match plan {
            Plan::Whole => {
                let id = ids.whole()?;
                debug!(id = %id, declared = %block.declared_id, "task");
                let record = TaskRecord::new(&id, &block.title, block.deps.clone());
                let document = TaskDocument::render(&id, &block.title, &block.body);
                backlog.push(record, document)?;
            }
            Plan::Split(chunks) => {
                debug!(
                    declared = %block.declared_id,
                    parts = chunks.len(),
                    "splitting oversized task"
                );
                let mut part_ids = Vec::with_capacity(chunks.len());
                for chunk in &chunks {
                    let id = ids.part(&block.declared_id, chunk.part)?;
                    let title = splitter::part_title(&block.title, chunk.part);
                    let record = TaskRecord::new(&id, &title, block.deps.clone());
                    let document = TaskDocument::render(&id, &title, &chunk.body());
                    backlog.push(record, document)?;
                    part_ids.push(id);
                }
                mark_split(&mut backlog.ledger, &part_ids);
            }
        }
    }

    Ok(backlog)
}

/// The first part stands in for the split parent: `DONE`, with a note naming
/// every part.
fn mark_split(ledger: &mut Ledger, part_ids: &[String]) {
    let Some(first) = part_ids.first() else {
        return;
    };
    if let Some(record) = ledger.get_mut(first) {
        record.status = TaskStatus::Done;
        record.note = Some(format!("split into {}", part_ids.join(", ")));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BacklogError;
    use crate::specs;

    fn specs_block(heading: &str, n: usize) -> String {
        let mut doc = format!("{heading}\nSome context.\n\nSpecs\n");
        for i in 1..=n {
            doc.push_str(&format!("- spec {i}\n"));
        }
        doc.push('\n');
        doc
    }

    #[test]
    fn login_scenario() {
        let doc = format!(
            "# My product\nPreamble text.\n\n{}",
            specs_block("## 1 Login (depends: )", 3)
        );
        let backlog = compile(&doc, &CompileOptions::default()).unwrap();
        assert_eq!(backlog.ledger.len(), 1);
        let task = backlog.ledger.find("1").unwrap();
        assert_eq!(task.title, "Login");
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.deps.is_empty());
        assert_eq!(task.complexity, 1);
        assert!(task.note.is_none());
    }

    #[test]
    fn checkout_scenario() {
        let doc = specs_block("## 7 Checkout flow (depends: 3, 5)", 14);
        let backlog = compile(&doc, &CompileOptions::default()).unwrap();
        let ids: Vec<&str> = backlog.ledger.ids().collect();
        assert_eq!(ids, vec!["7.1", "7.2", "7.3"]);

        let first = backlog.ledger.find("7.1").unwrap();
        assert_eq!(first.status, TaskStatus::Done);
        let note = first.note.as_deref().unwrap();
        assert!(note.contains("7.2") && note.contains("7.3"));

        for id in ["7.2", "7.3"] {
            let task = backlog.ledger.find(id).unwrap();
            assert_eq!(task.status, TaskStatus::Todo);
            assert!(task.note.is_none());
        }
        for task in backlog.ledger.iter() {
            assert_eq!(task.deps, vec!["3", "5"]);
        }
        assert_eq!(
            backlog.ledger.find("7.3").unwrap().title,
            "Checkout flow (part 3)"
        );

        let sizes: Vec<usize> = backlog
            .documents
            .iter()
            .map(|d| {
                let lines: Vec<&str> = d.content.lines().collect();
                specs::count_spec_bullets(&lines)
            })
            .collect();
        assert_eq!(sizes, vec![6, 6, 2]);
    }

    #[test]
    fn no_headings_scenario() {
        let backlog = compile("Just notes\n- a\n- b\n", &CompileOptions::default()).unwrap();
        assert!(backlog.ledger.is_empty());
        assert!(backlog.documents.is_empty());
    }

    #[test]
    fn threshold_boundary() {
        let opts = CompileOptions::default();
        let at = compile(&specs_block("## 1 A", 6), &opts).unwrap();
        assert_eq!(at.ledger.ids().collect::<Vec<_>>(), vec!["1"]);

        let over = compile(&specs_block("## 1 A", 7), &opts).unwrap();
        assert_eq!(over.ledger.ids().collect::<Vec<_>>(), vec!["1.1", "1.2"]);
        assert_eq!(
            over.documents[1].content,
            "# Task 1.2 – A (part 2)\nSpecs\n- spec 7\n"
        );
    }

    #[test]
    fn continued_specs_section_counts_toward_split() {
        let doc = "## 5 Reports\nSpecs\n- a\n- b\n- c\n- d\nSpecs (cont.)\n- e\n- f\n- g\n- h\n";
        let backlog = compile(doc, &CompileOptions::default()).unwrap();
        assert_eq!(backlog.ledger.ids().collect::<Vec<_>>(), vec!["5.1", "5.2"]);
        assert_eq!(
            backlog.documents[1].content,
            "# Task 5.2 – Reports (part 2)\nSpecs\n- g\n- h\n"
        );
    }

    #[test]
    fn coverage_counts_chunks() {
        let doc = [
            specs_block("## 1 Small", 2),
            specs_block("## 2 Big (depends: 1)", 13),
            "## 3 Prose only\nNothing to split.\n".to_string(),
        ]
        .concat();
        let backlog = compile(&doc, &CompileOptions::default()).unwrap();
        // 1 + ceil(13 / 6) + 1
        assert_eq!(backlog.ledger.len(), 5);
        assert_eq!(
            backlog.ledger.ids().collect::<Vec<_>>(),
            vec!["1", "2.1", "2.2", "2.3", "5"]
        );
        assert_eq!(backlog.documents.len(), backlog.ledger.len());
    }

    #[test]
    fn unsplit_document_keeps_full_body() {
        let doc = "## 4 Profile (depends: 1)\nIntro\n\nSpecs\n- a\n";
        let backlog = compile(doc, &CompileOptions::default()).unwrap();
        assert_eq!(
            backlog.documents[0].content,
            "# Task 1 – Profile\nIntro\n\nSpecs\n- a\n"
        );
    }

    #[test]
    fn empty_body_document() {
        let backlog = compile("## 1 Bare", &CompileOptions::default()).unwrap();
        assert_eq!(backlog.documents[0].content, "# Task 1 – Bare\n\n");
    }

    #[test]
    fn no_split_mode_emits_one_task_per_block() {
        let opts = CompileOptions {
            no_split: true,
            ..CompileOptions::default()
        };
        let backlog = compile(&specs_block("## 7 Checkout", 20), &opts).unwrap();
        assert_eq!(backlog.ledger.ids().collect::<Vec<_>>(), vec!["1"]);
    }

    #[test]
    fn custom_threshold() {
        let opts = CompileOptions {
            split_threshold: 2,
            ..CompileOptions::default()
        };
        let backlog = compile(&specs_block("## 3 C", 5), &opts).unwrap();
        assert_eq!(
            backlog.ledger.ids().collect::<Vec<_>>(),
            vec!["3.1", "3.2", "3.3"]
        );
    }

    #[test]
    fn duplicate_split_ids_abort() {
        let doc = [specs_block("## 7 One", 7), specs_block("## 7 Two", 7)].concat();
        let err = compile(&doc, &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, BacklogError::IdCollision(id) if id == "7.1"));
    }

    #[test]
    fn dotted_parent_uses_flat_ids() {
        let doc = specs_block("## 4.1 Refunds", 8);
        let backlog = compile(&doc, &CompileOptions::default()).unwrap();
        assert_eq!(backlog.ledger.ids().collect::<Vec<_>>(), vec!["1", "2"]);
        assert_eq!(
            backlog.ledger.find("1").unwrap().note.as_deref(),
            Some("split into 1, 2")
        );
    }

    #[test]
    fn compile_is_deterministic() {
        let doc = [specs_block("## 1 A", 3), specs_block("## 2 B", 9)].concat();
        let a = compile(&doc, &CompileOptions::default()).unwrap();
        let b = compile(&doc, &CompileOptions::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.ledger.to_json().unwrap(), b.ledger.to_json().unwrap());
    }
}
