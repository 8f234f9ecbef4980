// src/services/inspect.rs
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;

use crate::models::MonthlyRecord;

/// Things about the input worth a warning. None of them block loading.
#[derive(Debug, Clone, PartialEq)]
pub enum DataWarning {
    DuplicateMonth { month: String, index: usize },
    /// Not `YYYY-MM`, so lexical order may not be chronological.
    UnusualLabel { month: String, index: usize },
    OutOfOrder { month: String, index: usize },
    CollectedExceedsIssued { month: String, issued: f64, collected: f64 },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataWarning::DuplicateMonth { month, index } => {
                write!(f, "month '{}' appears again at position {}", month, index)
            }
            DataWarning::UnusualLabel { month, index } => {
                write!(f, "month '{}' at position {} is not in YYYY-MM form", month, index)
            }
            DataWarning::OutOfOrder { month, index } => {
                write!(f, "month '{}' at position {} sorts before its predecessor", month, index)
            }
            DataWarning::CollectedExceedsIssued { month, issued, collected } => write!(
                f,
                "month '{}' collected {} but only issued {}",
                month, collected, issued
            ),
        }
    }
}

fn is_year_month(label: &str) -> bool {
    label.len() == 7 && NaiveDate::parse_from_str(&format!("{}-01", label), "%Y-%m-%d").is_ok()
}

pub fn inspect(records: &[MonthlyRecord]) -> Vec<DataWarning> {
    let mut warnings = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, r) in records.iter().enumerate() {
        if !seen.insert(r.month.as_str()) {
            warnings.push(DataWarning::DuplicateMonth {
                month: r.month.clone(),
                index,
            });
        }
        if !is_year_month(&r.month) {
            warnings.push(DataWarning::UnusualLabel {
                month: r.month.clone(),
                index,
            });
        }
        if index > 0 && r.month < records[index - 1].month {
            warnings.push(DataWarning::OutOfOrder {
                month: r.month.clone(),
                index,
            });
        }
        if r.fees_collected > r.fees_issued {
            warnings.push(DataWarning::CollectedExceedsIssued {
                month: r.month.clone(),
                issued: r.fees_issued,
                collected: r.fees_collected,
            });
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::record;

    #[test]
    fn labels_outside_year_month_are_flagged() {
        let records = vec![record("Jan 2024"), record("2024-13")];
        let flagged = inspect(&records)
            .iter()
            .filter(|w| matches!(w, DataWarning::UnusualLabel { .. }))
            .count();
        assert_eq!(flagged, 2);
    }

    #[test]
    fn clean_input_has_no_warnings() {
        let records = vec![record("2024-01"), record("2024-02")];
        assert!(inspect(&records).is_empty());
    }

    #[test]
    fn flags_duplicates_order_and_overcollection() {
        let mut over = record("2024-03");
        over.fees_issued = 100.0;
        over.fees_collected = 150.0;
        let records = vec![record("2024-02"), record("2024-01"), record("2024-01"), over];

        let warnings = inspect(&records);
        assert!(warnings.contains(&DataWarning::OutOfOrder { month: "2024-01".into(), index: 1 }));
        assert!(warnings.contains(&DataWarning::DuplicateMonth { month: "2024-01".into(), index: 2 }));
        assert!(!warnings.iter().any(|w| matches!(w, DataWarning::UnusualLabel { .. })));
        assert!(matches!(
            warnings.last(),
            Some(DataWarning::CollectedExceedsIssued { .. })
        ));
    }
}
