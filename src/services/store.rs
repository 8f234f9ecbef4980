// src/services/store.rs
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::MonthlyRecord;

/// Labeled entry for the month selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthOption {
    pub index: usize,
    pub label: String,
}

/// Read-only snapshot of the monthly records, loaded once per session.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MonthlyRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<MonthlyRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, index: usize) -> Option<&MonthlyRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    /// Most recent month, or `None` when nothing was loaded.
    pub fn default_index(&self) -> Option<usize> {
        self.records.len().checked_sub(1)
    }

    pub fn index_of(&self, month: &str) -> Option<usize> {
        self.records.iter().position(|r| r.month == month)
    }

    /// Turns a requested selection into a valid index. No request means the
    /// default month; an index past the end is rejected.
    pub fn resolve(&self, requested: Option<usize>) -> Result<Option<usize>> {
        match requested {
            None => Ok(self.default_index()),
            Some(index) => self.check(index).map(Some),
        }
    }

    pub fn check(&self, index: usize) -> Result<usize> {
        if index < self.records.len() {
            Ok(index)
        } else {
            Err(DashboardError::OutOfRangeIndex {
                index,
                len: self.records.len(),
            })
        }
    }

    pub fn resolve_month(&self, month: &str) -> Result<usize> {
        self.index_of(month)
            .ok_or_else(|| DashboardError::UnknownMonth(month.to_string()))
    }

    pub fn clamp(&self, index: usize) -> Option<usize> {
        self.default_index().map(|last| index.min(last))
    }

    pub fn month_options(&self) -> Vec<MonthOption> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, r)| MonthOption {
                index,
                label: r.month.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn record(month: &str) -> MonthlyRecord {
    MonthlyRecord {
        month: month.to_string(),
        bank_balance: 0.0,
        fees_issued: 0.0,
        fees_collected: 0.0,
        expenses_total: 0.0,
        water_m3: 0.0,
        water_eur: 0.0,
        incidents_count: 0,
        incidents_cost: 0.0,
        events: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(n: usize) -> RecordStore {
        RecordStore::new((1..=n).map(|m| record(&format!("2024-{:02}", m))).collect())
    }

    #[test]
    fn default_index_is_last_month() {
        assert_eq!(store(3).default_index(), Some(2));
        assert_eq!(store(0).default_index(), None);
    }

    #[test]
    fn get_outside_range_is_none() {
        let s = store(2);
        assert!(s.get(1).is_some());
        assert!(s.get(2).is_none());
    }

    #[test]
    fn resolve_rejects_out_of_range() {
        let s = store(2);
        assert_eq!(s.resolve(None), Ok(Some(1)));
        assert_eq!(s.resolve(Some(0)), Ok(Some(0)));
        assert_eq!(
            s.resolve(Some(5)),
            Err(DashboardError::OutOfRangeIndex { index: 5, len: 2 })
        );
        assert_eq!(store(0).resolve(None), Ok(None));
    }

    #[test]
    fn check_rejects_any_index_on_empty_store() {
        assert_eq!(store(2).check(1), Ok(1));
        assert_eq!(
            store(0).check(0),
            Err(DashboardError::OutOfRangeIndex { index: 0, len: 0 })
        );
    }

    #[test]
    fn month_labels_resolve_to_positions() {
        let s = store(4);
        assert_eq!(s.resolve_month("2024-03"), Ok(2));
        assert!(matches!(
            s.resolve_month("2030-01"),
            Err(DashboardError::UnknownMonth(_))
        ));
    }

    #[test]
    fn clamp_keeps_selection_inside_range() {
        assert_eq!(store(3).clamp(10), Some(2));
        assert_eq!(store(3).clamp(1), Some(1));
        assert_eq!(store(0).clamp(1), None);
    }
}
