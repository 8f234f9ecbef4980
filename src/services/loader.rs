// src/services/loader.rs
use log::{debug, error, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use crate::error::{DashboardError, LoadError};
use crate::models::{DebtorDataset, MonthlyRecord};
use crate::services::inspect::inspect;
use crate::services::store::RecordStore;
use crate::services::tables::DebtorState;

const USER_AGENT: &str = concat!("community-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Http(String),
    File(PathBuf),
}

impl DataSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Http(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataSource::Http(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Everything a session serves from. Built once and never mutated.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub store: RecordStore,
    pub debtors: DebtorState,
}

pub fn http_client() -> Result<Client, LoadError> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(client)
}

async fn fetch_json<T: DeserializeOwned>(client: &Client, source: &DataSource) -> Result<T, LoadError> {
    let text = match source {
        DataSource::Http(url) => {
            client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?
        }
        DataSource::File(path) => tokio::fs::read_to_string(path).await?,
    };
    debug!("Read {} bytes from {}", text.len(), source);
    Ok(serde_json::from_str(&text)?)
}

/// Fetch the monthly records, logging anything suspicious about their shape.
pub async fn fetch_monthly_records(client: &Client, source: &DataSource) -> Result<Vec<MonthlyRecord>, LoadError> {
    info!("Fetching monthly records from {}", source);
    let records: Vec<MonthlyRecord> = fetch_json(client, source).await?;
    info!("Loaded {} monthly records", records.len());
    for warning in inspect(&records) {
        warn!("Monthly records: {}", warning);
    }
    Ok(records)
}

pub async fn fetch_debtors(client: &Client, source: &DataSource) -> Result<DebtorDataset, LoadError> {
    info!("Fetching debtor list from {}", source);
    let dataset: DebtorDataset = fetch_json(client, source).await?;
    info!("Loaded {} debtors (updated {})", dataset.debtors.len(), dataset.updated_at);
    Ok(dataset)
}

/// Load both datasets concurrently. Only the monthly records are required;
/// a failed debtor load leaves the debtor section unavailable.
pub async fn load_snapshot(
    client: &Client,
    records: &DataSource,
    debtors: &DataSource,
) -> Result<Snapshot, DashboardError> {
    let (records, debtors) = tokio::join!(
        fetch_monthly_records(client, records),
        fetch_debtors(client, debtors)
    );

    let records = records.map_err(|e| {
        error!("Failed to load monthly records: {}", e);
        DashboardError::PrimaryData(e.to_string())
    })?;

    let debtors = match debtors {
        Ok(dataset) => DebtorState::Available(dataset),
        Err(e) => {
            let err = DashboardError::SecondaryDataUnavailable(e.to_string());
            error!("{}; continuing without debtor data", err);
            DebtorState::Unavailable(e.to_string())
        }
    };

    Ok(Snapshot {
        store: RecordStore::new(records),
        debtors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_paths_are_told_apart() {
        assert_eq!(
            DataSource::parse(" https://example.org/data.json "),
            DataSource::Http("https://example.org/data.json".into())
        );
        assert_eq!(
            DataSource::parse("./public/data.json"),
            DataSource::File(PathBuf::from("./public/data.json"))
        );
    }
}
