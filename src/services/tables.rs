// src/services/tables.rs
use serde::Serialize;

use crate::models::{DebtorDataset, DebtorRecord, Event, MonthlyRecord};

/// Debtor data as the session sees it: loaded, or isolated behind a reason.
#[derive(Debug, Clone, PartialEq)]
pub enum DebtorState {
    Available(DebtorDataset),
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtorSummary {
    pub available: bool,
    pub updated_at: Option<String>,
    pub total_amount_eur: Option<f64>,
    pub debtors: Vec<DebtorRecord>,
    pub reason: Option<String>,
}

/// Events of one month, newest first. Same-day events keep their input order.
pub fn event_rows(record: &MonthlyRecord) -> Vec<Event> {
    let mut events = record.events.clone();
    events.sort_by(|a, b| b.date.cmp(&a.date));
    events
}

// -0.0 and 0.0 must tie.
fn sort_key(amount: f64) -> f64 {
    if amount == 0.0 {
        0.0
    } else {
        amount
    }
}

/// Largest debt first; equal amounts keep their input order.
pub fn debtor_rows(dataset: &DebtorDataset) -> Vec<DebtorRecord> {
    let mut debtors = dataset.debtors.clone();
    debtors.sort_by(|a, b| sort_key(b.amount_eur).total_cmp(&sort_key(a.amount_eur)));
    debtors
}

pub fn debtor_total(dataset: &DebtorDataset) -> f64 {
    dataset
        .total_amount_eur
        .unwrap_or_else(|| dataset.debtors.iter().map(|d| d.amount_eur).sum())
}

impl DebtorState {
    pub fn summary(&self) -> DebtorSummary {
        match self {
            DebtorState::Available(dataset) => DebtorSummary {
                available: true,
                updated_at: Some(dataset.updated_at.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
                total_amount_eur: Some(debtor_total(dataset)),
                debtors: debtor_rows(dataset),
                reason: None,
            },
            DebtorState::Unavailable(reason) => DebtorSummary {
                available: false,
                updated_at: None,
                total_amount_eur: None,
                debtors: Vec::new(),
                reason: Some(reason.clone()),
            },
        }
    }
}
