//! History ledger for single-mode draws (newest first, append-only)

use std::collections::HashSet;

use ld_core::HistoryRecord;

#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    records: Vec<HistoryRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger restored from storage (already newest first)
    pub fn from_records(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Prepend a completed draw
    pub fn record(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
    }

    pub fn total_draws(&self) -> usize {
        self.records.len()
    }

    pub fn unique_winners(&self) -> usize {
        self.winner_names().len()
    }

    /// Names that have won at least once
    pub fn winner_names(&self) -> HashSet<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
