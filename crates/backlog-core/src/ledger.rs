use crate::error::{BacklogError, Result};
use crate::types::TaskStatus;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Placeholder estimate carried by every record.
pub const DEFAULT_COMPLEXITY: u32 = 1;

// ---------------------------------------------------------------------------
// TaskRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Ledger key; not repeated inside the serialized record.
    #[serde(skip)]
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub deps: Vec<String>,
    pub complexity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TaskRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>, deps: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::Todo,
            deps,
            complexity: DEFAULT_COMPLEXITY,
            note: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Insertion-ordered `id -> TaskRecord` map. Serializes as a JSON object whose
/// key order is the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<TaskRecord>,
    /// id -> position in `records`.
    index: HashMap<String, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record`. An id already present is an invariant violation.
    pub fn insert(&mut self, record: TaskRecord) -> Result<()> {
        if self.contains(&record.id) {
            return Err(BacklogError::IdCollision(record.id));
        }
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&TaskRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut TaskRecord> {
        let i = *self.index.get(id)?;
        self.records.get_mut(i)
    }

    /// Look up `id`, failing with `TaskNotFound`.
    pub fn find(&self, id: &str) -> Result<&TaskRecord> {
        self.get(id)
            .ok_or_else(|| BacklogError::TaskNotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskRecord> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pretty JSON, two-space indent, trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.id, record)?;
        }
        map.end()
    }
}

struct LedgerVisitor;

impl<'de> Visitor<'de> for LedgerVisitor {
    type Value = Ledger;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of task id to task record")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Ledger, A::Error> {
        let mut ledger = Ledger::new();
        while let Some((id, mut record)) = access.next_entry::<String, TaskRecord>()? {
            record.id = id;
            ledger
                .insert(record)
                .map_err(<A::Error as serde::de::Error>::custom)?;
        }
        Ok(ledger)
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(LedgerVisitor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
