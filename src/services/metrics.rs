// src/services/metrics.rs
use serde::Serialize;

use crate::models::MonthlyRecord;
use crate::services::store::RecordStore;

/// Headline figures for one month. Never stored, always derived from the raw record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiSet {
    pub month: String,
    pub bank_balance: f64,
    pub fees_issued: f64,
    pub fees_collected: f64,
    pub collection_ratio: f64,
    pub expenses_total: f64,
    pub water_m3: f64,
    pub water_eur: f64,
    pub incidents_count: u32,
    pub incidents_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiComparison {
    pub current: KpiSet,
    pub previous: Option<KpiSet>,
}

/// Current minus previous. The ratio delta is in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiDelta {
    pub bank_balance: f64,
    pub fees_issued: f64,
    pub fees_collected: f64,
    pub collection_ratio: f64,
    pub expenses_total: f64,
}

/// Constant comparison lines for the water chart, in m³ per month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaterBaseline {
    pub per_person_m3: f64,
    pub reference_household_m3: f64,
}

pub const DAYS_PER_MONTH: f64 = 30.0;

pub fn collection_ratio(fees_issued: f64, fees_collected: f64) -> f64 {
    if fees_issued == 0.0 {
        0.0
    } else {
        fees_collected / fees_issued * 100.0
    }
}

impl KpiSet {
    pub fn from_record(record: &MonthlyRecord) -> Self {
        KpiSet {
            month: record.month.clone(),
            bank_balance: record.bank_balance,
            fees_issued: record.fees_issued,
            fees_collected: record.fees_collected,
            collection_ratio: collection_ratio(record.fees_issued, record.fees_collected),
            expenses_total: record.expenses_total,
            water_m3: record.water_m3,
            water_eur: record.water_eur,
            incidents_count: record.incidents_count,
            incidents_cost: record.incidents_cost,
        }
    }
}

impl KpiComparison {
    pub fn delta(&self) -> Option<KpiDelta> {
        let prev = self.previous.as_ref()?;
        let cur = &self.current;
        Some(KpiDelta {
            bank_balance: cur.bank_balance - prev.bank_balance,
            fees_issued: cur.fees_issued - prev.fees_issued,
            fees_collected: cur.fees_collected - prev.fees_collected,
            collection_ratio: cur.collection_ratio - prev.collection_ratio,
            expenses_total: cur.expenses_total - prev.expenses_total,
        })
    }
}

/// KPIs for `index` and for the month before it. An empty store or an
/// index past the end yields an all-zero current set.
pub fn current_and_previous(store: &RecordStore, index: usize) -> KpiComparison {
    let Some(record) = store.get(index) else {
        return KpiComparison::default();
    };
    let previous = index
        .checked_sub(1)
        .and_then(|i| store.get(i))
        .map(KpiSet::from_record);
    KpiComparison {
        current: KpiSet::from_record(record),
        previous,
    }
}

pub fn water_baseline(daily_liters_per_person: f64, reference_headcount: u32) -> WaterBaseline {
    let per_person_m3 = daily_liters_per_person / 1000.0 * DAYS_PER_MONTH;
    WaterBaseline {
        per_person_m3,
        reference_household_m3: per_person_m3 * f64::from(reference_headcount),
    }
}
