// src/config.rs
use anyhow::{Context, Result};
use log::warn;
use std::env;
use std::str::FromStr;

use crate::services::dashboard::DashboardConfig;
use crate::services::loader::DataSource;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub records: DataSource,
    pub debtors: DataSource,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(p) => p.parse().context("PORT must be a number")?,
            None => {
                warn!("$PORT not set, defaulting to 3030");
                3030
            }
        };

        let defaults = DashboardConfig::default();
        let dashboard = DashboardConfig {
            window_size: parse_or(&lookup, "DASHBOARD_WINDOW", defaults.window_size)?,
            reference_headcount: parse_or(&lookup, "DASHBOARD_HEADCOUNT", defaults.reference_headcount)?,
            daily_liters_per_person: parse_or(
                &lookup,
                "DASHBOARD_LITERS_PER_DAY",
                defaults.daily_liters_per_person,
            )?,
            include_utilities: parse_or(&lookup, "DASHBOARD_UTILITIES", defaults.include_utilities)?,
        };

        Ok(AppConfig {
            port,
            records: DataSource::parse(&lookup("DASHBOARD_RECORDS").unwrap_or_else(|| "data.json".into())),
            debtors: DataSource::parse(&lookup("DASHBOARD_DEBTORS").unwrap_or_else(|| "debtors.json".into())),
            dashboard,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value '{}'", key, raw)),
        None => Ok(default),
    }
}
