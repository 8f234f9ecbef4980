// src/services/presenter.rs
use chrono::{DateTime, NaiveDate};
use log::{debug, error};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{DashboardError, Result};
use crate::services::dashboard::DashboardView;
use crate::services::metrics::KpiSet;
use crate::services::store::MonthOption;
use crate::services::window::ChartData;

pub mod slots {
    pub const MONTH: &str = "selected-month";
    pub const BALANCE: &str = "kpi-balance";
    pub const ISSUED: &str = "kpi-issued";
    pub const COLLECTED: &str = "kpi-collected";
    pub const RATIO: &str = "kpi-ratio";
    pub const EXPENSES: &str = "kpi-expenses";
    pub const WATER: &str = "kpi-water";
    pub const INCIDENTS: &str = "kpi-incidents";
    pub const ISSUED_PREV: &str = "kpi-issued-prev";
    pub const COLLECTED_PREV: &str = "kpi-collected-prev";
    pub const RATIO_PREV: &str = "kpi-ratio-prev";
    pub const DEBTORS_UPDATED: &str = "debtors-updated";
    pub const DEBTORS_TOTAL: &str = "debtors-total";

    pub const FINANCE_CHART: &str = "finance";
    pub const WATER_CHART: &str = "water";
    pub const MONTH_LIST: &str = "month-select";
    pub const EVENTS_TABLE: &str = "events";
    pub const DEBTORS_TABLE: &str = "debtors";
}

pub const NO_VALUE: &str = "—";
pub const NO_EVENTS: &str = "No actions recorded";
pub const NO_DEBTORS: &str = "No outstanding debts";
pub const DEBTORS_UNAVAILABLE: &str = "Debtor data unavailable";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableContent {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Shown instead of rows when there are none.
    pub placeholder: Option<String>,
}

impl TableContent {
    fn new(headers: &[&str], rows: Vec<Vec<String>>, empty: &str) -> Self {
        let placeholder = rows.is_empty().then(|| empty.to_string());
        TableContent {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
            placeholder,
        }
    }
}

/// The view-side capabilities the dashboard needs. Any call may fail with
/// `MissingResource` when the named target does not exist.
pub trait Presenter {
    fn set_text(&mut self, slot: &str, text: &str) -> Result<()>;
    fn replace_chart(&mut self, chart: &str, data: &ChartData) -> Result<()>;
    fn populate_options(&mut self, list: &str, options: &[MonthOption]) -> Result<()>;
    fn render_table(&mut self, table: &str, content: &TableContent) -> Result<()>;
}

pub fn format_eur(value: f64) -> String {
    format!("{:.0} €", value)
}

pub fn format_eur_cents(value: f64) -> String {
    format!("{:.2} €", value)
}

pub fn format_pct(value: f64) -> String {
    format!("{:.1} %", value)
}

/// RFC 3339 timestamps are shown to the minute in UTC, plain dates as-is;
/// anything else passes through untouched.
pub fn format_updated_at(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.naive_utc().format("%Y-%m-%d %H:%M").to_string();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn format_water(kpis: &KpiSet) -> String {
    format!("{:.0} m³ / {:.0} €", kpis.water_m3, kpis.water_eur)
}

fn format_incidents(kpis: &KpiSet) -> String {
    format!("{} / {:.0} €", kpis.incidents_count, kpis.incidents_cost)
}

/// Push one view through a presenter. Stops at the first unavailable target.
pub fn render_view<P: Presenter>(view: &DashboardView, presenter: &mut P) -> Result<()> {
    let cur = &view.kpis.current;
    let month = view
        .selected
        .map(|_| cur.month.as_str())
        .unwrap_or(NO_VALUE);

    presenter.populate_options(slots::MONTH_LIST, &view.months)?;
    presenter.set_text(slots::MONTH, month)?;
    presenter.set_text(slots::BALANCE, &format_eur(cur.bank_balance))?;
    presenter.set_text(slots::ISSUED, &format_eur(cur.fees_issued))?;
    presenter.set_text(slots::COLLECTED, &format_eur(cur.fees_collected))?;
    presenter.set_text(slots::RATIO, &format_pct(cur.collection_ratio))?;
    presenter.set_text(slots::EXPENSES, &format_eur(cur.expenses_total))?;

    match &view.kpis.previous {
        Some(prev) => {
            presenter.set_text(slots::ISSUED_PREV, &format_eur(prev.fees_issued))?;
            presenter.set_text(slots::COLLECTED_PREV, &format_eur(prev.fees_collected))?;
            presenter.set_text(slots::RATIO_PREV, &format_pct(prev.collection_ratio))?;
        }
        None => {
            presenter.set_text(slots::ISSUED_PREV, NO_VALUE)?;
            presenter.set_text(slots::COLLECTED_PREV, NO_VALUE)?;
            presenter.set_text(slots::RATIO_PREV, NO_VALUE)?;
        }
    }

    presenter.replace_chart(slots::FINANCE_CHART, &view.finance_chart)?;

    if view.include_utilities {
        presenter.set_text(slots::WATER, &format_water(cur))?;
        presenter.set_text(slots::INCIDENTS, &format_incidents(cur))?;
        if let Some(water) = &view.water_chart {
            presenter.replace_chart(slots::WATER_CHART, water)?;
        }
    }

    let events = view
        .events
        .iter()
        .map(|e| vec![e.date.clone(), e.action.clone()])
        .collect();
    presenter.render_table(slots::EVENTS_TABLE, &TableContent::new(&["Date", "Action"], events, NO_EVENTS))?;

    let debtors = &view.debtors;
    let rows = debtors
        .debtors
        .iter()
        .map(|d| vec![d.code.clone(), format_eur_cents(d.amount_eur), d.start.clone(), d.note.clone()])
        .collect();
    let empty = if debtors.available { NO_DEBTORS } else { DEBTORS_UNAVAILABLE };
    presenter.render_table(
        slots::DEBTORS_TABLE,
        &TableContent::new(&["Unit", "Amount", "Since", "Note"], rows, empty),
    )?;
    presenter.set_text(
        slots::DEBTORS_UPDATED,
        &debtors
            .updated_at
            .as_deref()
            .map(format_updated_at)
            .unwrap_or_else(|| NO_VALUE.to_string()),
    )?;
    presenter.set_text(
        slots::DEBTORS_TOTAL,
        &debtors
            .total_amount_eur
            .map(format_eur_cents)
            .unwrap_or_else(|| NO_VALUE.to_string()),
    )?;

    Ok(())
}

/// Which targets a page provides.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    texts: BTreeSet<String>,
    charts: BTreeSet<String>,
    lists: BTreeSet<String>,
    tables: BTreeSet<String>,
}

impl Layout {
    pub fn standard() -> Self {
        let set = |names: &[&str]| -> BTreeSet<String> { names.iter().map(|n| n.to_string()).collect() };
        Layout {
            texts: set(&[
                slots::MONTH,
                slots::BALANCE,
                slots::ISSUED,
                slots::COLLECTED,
                slots::RATIO,
                slots::EXPENSES,
                slots::WATER,
                slots::INCIDENTS,
                slots::ISSUED_PREV,
                slots::COLLECTED_PREV,
                slots::RATIO_PREV,
                slots::DEBTORS_UPDATED,
                slots::DEBTORS_TOTAL,
            ]),
            charts: set(&[slots::FINANCE_CHART, slots::WATER_CHART]),
            lists: set(&[slots::MONTH_LIST]),
            tables: set(&[slots::EVENTS_TABLE, slots::DEBTORS_TABLE]),
        }
    }

    pub fn without(mut self, name: &str) -> Self {
        self.texts.remove(name);
        self.charts.remove(name);
        self.lists.remove(name);
        self.tables.remove(name);
        self
    }
}

/// Serializable result of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    pub texts: BTreeMap<String, String>,
    pub charts: BTreeMap<String, ChartData>,
    pub lists: BTreeMap<String, Vec<MonthOption>>,
    pub tables: BTreeMap<String, TableContent>,
}

/// Presenter that records into a `Frame` for a JSON client.
pub struct JsonPresenter {
    layout: Layout,
    frame: Frame,
}

fn require(set: &BTreeSet<String>, kind: &'static str, name: &str) -> Result<()> {
    if set.contains(name) {
        Ok(())
    } else {
        Err(DashboardError::MissingResource {
            kind,
            name: name.to_string(),
        })
    }
}

impl JsonPresenter {
    pub fn new(layout: Layout) -> Self {
        JsonPresenter {
            layout,
            frame: Frame::default(),
        }
    }

    pub fn into_frame(self) -> Frame {
        self.frame
    }
}

impl Presenter for JsonPresenter {
    fn set_text(&mut self, slot: &str, text: &str) -> Result<()> {
        require(&self.layout.texts, "text", slot)?;
        self.frame.texts.insert(slot.to_string(), text.to_string());
        Ok(())
    }

    fn replace_chart(&mut self, chart: &str, data: &ChartData) -> Result<()> {
        require(&self.layout.charts, "chart", chart)?;
        self.frame.charts.insert(chart.to_string(), data.clone());
        Ok(())
    }

    fn populate_options(&mut self, list: &str, options: &[MonthOption]) -> Result<()> {
        require(&self.layout.lists, "list", list)?;
        self.frame.lists.insert(list.to_string(), options.to_vec());
        Ok(())
    }

    fn render_table(&mut self, table: &str, content: &TableContent) -> Result<()> {
        require(&self.layout.tables, "table", table)?;
        self.frame.tables.insert(table.to_string(), content.clone());
        Ok(())
    }
}

/// Render a view into a fresh frame. A failed pass yields no frame at all,
/// so a half-rendered month never reaches the client.
pub fn render_frame(view: &DashboardView, layout: Layout) -> Result<Frame> {
    let mut presenter = JsonPresenter::new(layout);
    match render_view(view, &mut presenter) {
        Ok(()) => {
            debug!("Rendered frame for selection {:?}", view.selected);
            Ok(presenter.into_frame())
        }
        Err(e) => {
            error!("Render pass aborted: {}", e);
            Err(e)
        }
    }
}
