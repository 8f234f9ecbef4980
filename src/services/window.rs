// src/services/window.rs
use serde::Serialize;

use crate::models::MonthlyRecord;
use crate::services::metrics::WaterBaseline;
use crate::services::store::RecordStore;

pub const DEFAULT_WINDOW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub kind: SeriesKind,
    pub axis: Axis,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub fn has_water_usage(record: &MonthlyRecord) -> bool {
    record.water_m3 > 0.0
}

/// Up to `size` consecutive months ending at `index`, oldest first.
pub fn trailing_window(store: &RecordStore, index: usize, size: usize) -> &[MonthlyRecord] {
    if size == 0 || index >= store.len() {
        return &[];
    }
    let start = (index + 1).saturating_sub(size);
    &store.records()[start..=index]
}

/// The last `size` months up to `index` for which `predicate` holds,
/// skipping the ones that don't. Oldest first.
pub fn trailing_filtered_window<F>(
    store: &RecordStore,
    index: usize,
    size: usize,
    predicate: F,
) -> Vec<&MonthlyRecord>
where
    F: Fn(&MonthlyRecord) -> bool,
{
    if index >= store.len() {
        return Vec::new();
    }
    let mut picked: Vec<&MonthlyRecord> = store.records()[..=index]
        .iter()
        .rev()
        .filter(|r| predicate(r))
        .take(size)
        .collect();
    picked.reverse();
    picked
}

fn series<I>(label: &str, kind: SeriesKind, axis: Axis, values: I) -> Series
where
    I: Iterator<Item = f64>,
{
    Series {
        label: label.to_string(),
        kind,
        axis,
        values: values.collect(),
    }
}

pub fn finance_chart(window: &[MonthlyRecord]) -> ChartData {
    ChartData {
        labels: window.iter().map(|r| r.month.clone()).collect(),
        series: vec![
            series("Collected", SeriesKind::Bar, Axis::Primary, window.iter().map(|r| r.fees_collected)),
            series("Issued", SeriesKind::Bar, Axis::Primary, window.iter().map(|r| r.fees_issued)),
            series("Expenses", SeriesKind::Bar, Axis::Primary, window.iter().map(|r| r.expenses_total)),
            series("Balance", SeriesKind::Line, Axis::Secondary, window.iter().map(|r| r.bank_balance)),
        ],
    }
}

pub fn water_chart(window: &[&MonthlyRecord], baseline: WaterBaseline) -> ChartData {
    let n = window.len();
    ChartData {
        labels: window.iter().map(|r| r.month.clone()).collect(),
        series: vec![
            series("Consumption (m³)", SeriesKind::Bar, Axis::Primary, window.iter().map(|r| r.water_m3)),
            series(
                "Per-person baseline",
                SeriesKind::Line,
                Axis::Primary,
                std::iter::repeat(baseline.per_person_m3).take(n),
            ),
            series(
                "Reference household",
                SeriesKind::Line,
                Axis::Primary,
                std::iter::repeat(baseline.reference_household_m3).take(n),
            ),
        ],
    }
}
