use crate::error::{BacklogError, Result};
use std::collections::HashSet;

/// Separator between a parent's declared id and a part number.
pub const PART_SEPARATOR: char = '.';

/// Issues task ids for one compile run.
///
/// The counter advances for every emitted task, split or not. Every issued id
/// is remembered so a duplicate aborts the run instead of overwriting a task.
#[derive(Debug, Default)]
pub struct IdAssigner {
    seq: u32,
    issued: HashSet<String>,
}

impl IdAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for a block emitted as a single task: the next sequence number.
    pub fn whole(&mut self) -> Result<String> {
        self.seq += 1;
        self.claim(self.seq.to_string())
    }

    /// Id for part `n` of a split block: `<declared_id>.<n>`.
    ///
    /// A declared id that already carries a separator falls back to the flat
    /// sequence.
    pub fn part(&mut self, declared_id: &str, n: usize) -> Result<String> {
        self.seq += 1;
        let id = if declared_id.contains(PART_SEPARATOR) {
            self.seq.to_string()
        } else {
            format!("{declared_id}{PART_SEPARATOR}{n}")
        };
        self.claim(id)
    }

    fn claim(&mut self, id: String) -> Result<String> {
        if !self.issued.insert(id.clone()) {
            return Err(BacklogError::IdCollision(id));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_tasks_are_sequential() {
        let mut ids = IdAssigner::new();
        assert_eq!(ids.whole().unwrap(), "1");
        assert_eq!(ids.whole().unwrap(), "2");
        assert_eq!(ids.whole().unwrap(), "3");
    }

    #[test]
    fn parts_are_parent_qualified() {
        let mut ids = IdAssigner::new();
        assert_eq!(ids.part("7", 1).unwrap(), "7.1");
        assert_eq!(ids.part("7", 2).unwrap(), "7.2");
    }

    #[test]
    fn parts_advance_the_sequence() {
        let mut ids = IdAssigner::new();
        assert_eq!(ids.whole().unwrap(), "1");
        ids.part("7", 1).unwrap();
        ids.part("7", 2).unwrap();
        assert_eq!(ids.whole().unwrap(), "4");
    }

    #[test]
    fn dotted_parent_falls_back_to_sequence() {
        let mut ids = IdAssigner::new();
        assert_eq!(ids.whole().unwrap(), "1");
        assert_eq!(ids.part("4.1", 1).unwrap(), "2");
        assert_eq!(ids.part("4.1", 2).unwrap(), "3");
    }

    #[test]
    fn duplicate_parent_collides() {
        let mut ids = IdAssigner::new();
        ids.part("7", 1).unwrap();
        let err = ids.part("7", 1).unwrap_err();
        assert!(matches!(err, BacklogError::IdCollision(id) if id == "7.1"));
    }

    #[test]
    fn mixed_branches_share_one_counter() {
        let mut ids = IdAssigner::new();
        assert_eq!(ids.part("2", 1).unwrap(), "2.1");
        assert_eq!(ids.part("1.5", 1).unwrap(), "2");
        assert_eq!(ids.whole().unwrap(), "3");
    }
}
