// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};

/// One calendar month of community accounts. Input order is chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month: String,
    pub bank_balance: f64,
    pub fees_issued: f64,
    pub fees_collected: f64,
    pub expenses_total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub water_m3: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub water_eur: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incidents_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incidents_cost: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub date: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtorRecord {
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount_eur: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtorDataset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub debtors: Vec<DebtorRecord>,
    #[serde(default)]
    pub total_amount_eur: Option<f64>,
}

// Absent and explicit `null` fields both collapse to the type's zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
