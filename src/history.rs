use crate::models::{RunRecord, RunSummary};

/// Saved runs, unique by id.
///
/// Records are kept in insertion order; listings come back newest first.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<RunRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and leaves the history untouched when the id is already present.
    pub fn insert(&mut self, record: RunRecord) -> bool {
        if self.contains(&record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Bulk load, e.g. from persisted storage. Returns how many records were new.
    pub fn extend_from<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = RunRecord>,
    {
        records
            .into_iter()
            .map(|record| self.insert(record))
            .filter(|inserted| *inserted)
            .count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&RunRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Newest `date` first; equal dates list the later insert first.
    pub fn list(&self) -> Vec<&RunRecord> {
        let mut out: Vec<&RunRecord> = self.records.iter().rev().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }

    pub fn summaries(&self) -> Vec<RunSummary> {
        self.list().into_iter().map(RunSummary::from).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
