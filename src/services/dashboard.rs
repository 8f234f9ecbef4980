// src/services/dashboard.rs
use serde::Serialize;

use crate::error::Result;
use crate::models::Event;
use crate::services::loader::Snapshot;
use crate::services::metrics::{current_and_previous, water_baseline, KpiComparison, KpiDelta, WaterBaseline};
use crate::services::store::MonthOption;
use crate::services::tables::{event_rows, DebtorSummary};
use crate::services::window::{
    finance_chart, has_water_usage, trailing_filtered_window, trailing_window, water_chart, ChartData,
    DEFAULT_WINDOW,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardConfig {
    pub window_size: usize,
    pub reference_headcount: u32,
    pub daily_liters_per_person: f64,
    /// Water and incident KPIs plus the water chart.
    pub include_utilities: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            window_size: DEFAULT_WINDOW,
            reference_headcount: 3,
            daily_liters_per_person: 130.0,
            include_utilities: true,
        }
    }
}

impl DashboardConfig {
    pub fn baseline(&self) -> WaterBaseline {
        water_baseline(self.daily_liters_per_person, self.reference_headcount)
    }
}

/// Shared by every request: the loaded snapshot and how to derive views from it.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub snapshot: Snapshot,
    pub config: DashboardConfig,
}

/// Everything derived for one selected month. Rebuilt from scratch on every
/// selection, so two views never share state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selected: Option<usize>,
    pub include_utilities: bool,
    pub months: Vec<MonthOption>,
    pub kpis: KpiComparison,
    pub delta: Option<KpiDelta>,
    pub finance_chart: ChartData,
    pub water_chart: Option<ChartData>,
    pub events: Vec<Event>,
    pub debtors: DebtorSummary,
}

/// Derive the view for `requested` (or the latest month). An index past the
/// end is an error; an empty snapshot gives an empty view.
pub fn build_view(snapshot: &Snapshot, config: &DashboardConfig, requested: Option<usize>) -> Result<DashboardView> {
    let store = &snapshot.store;
    let selected = store.resolve(requested)?;

    let (kpis, finance, water, events) = match selected {
        Some(index) => {
            let finance = finance_chart(trailing_window(store, index, config.window_size));
            let water = config.include_utilities.then(|| {
                let window = trailing_filtered_window(store, index, config.window_size, has_water_usage);
                water_chart(&window, config.baseline())
            });
            let events = store.get(index).map(event_rows).unwrap_or_default();
            (current_and_previous(store, index), finance, water, events)
        }
        None => (
            KpiComparison::default(),
            ChartData::default(),
            config.include_utilities.then(ChartData::default),
            Vec::new(),
        ),
    };

    Ok(DashboardView {
        selected,
        include_utilities: config.include_utilities,
        months: store.month_options(),
        delta: kpis.delta(),
        kpis,
        finance_chart: finance,
        water_chart: water,
        events,
        debtors: snapshot.debtors.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::MonthlyRecord;
    use crate::services::store::{record, RecordStore};
    use crate::services::tables::DebtorState;

    fn snapshot(n: usize) -> Snapshot {
        let records: Vec<MonthlyRecord> = (1..=n)
            .map(|m| MonthlyRecord {
                fees_issued: 1000.0,
                fees_collected: 100.0 * m as f64,
                water_m3: if m % 2 == 0 { 0.0 } else { 20.0 },
                ..record(&format!("2024-{:02}", m))
            })
            .collect();
        Snapshot {
            store: RecordStore::new(records),
            debtors: DebtorState::Unavailable("offline".into()),
        }
    }

    #[test]
    fn default_selection_is_latest_month() {
        let view = build_view(&snapshot(8), &DashboardConfig::default(), None).unwrap();
        assert_eq!(view.selected, Some(7));
        assert_eq!(view.kpis.current.month, "2024-08");
        assert_eq!(view.kpis.previous.as_ref().unwrap().month, "2024-07");
        assert_eq!(view.finance_chart.labels.first().map(String::as_str), Some("2024-03"));
        assert_eq!(view.water_chart.as_ref().unwrap().labels, vec!["2024-01", "2024-03", "2024-05", "2024-07"]);
    }

    #[test]
    fn utilities_can_be_switched_off() {
        let config = DashboardConfig {
            include_utilities: false,
            ..DashboardConfig::default()
        };
        let view = build_view(&snapshot(3), &config, Some(1)).unwrap();
        assert!(view.water_chart.is_none());
        assert_eq!(view.finance_chart.labels, vec!["2024-01", "2024-02"]);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let err = build_view(&snapshot(3), &DashboardConfig::default(), Some(3)).unwrap_err();
        assert_eq!(err, DashboardError::OutOfRangeIndex { index: 3, len: 3 });
    }

    #[test]
    fn empty_snapshot_gives_empty_view() {
        let view = build_view(&snapshot(0), &DashboardConfig::default(), None).unwrap();
        assert_eq!(view.selected, None);
        assert_eq!(view.kpis, KpiComparison::default());
        assert!(view.finance_chart.is_empty());
        assert!(view.events.is_empty());
        assert!(!view.debtors.available);
    }
}
