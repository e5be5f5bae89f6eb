//! Monthly maximum temperature series for a county, in Fahrenheit.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cdo::CdoClient,
    geo::{CodeTable, NotFoundError},
};

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Could not retrieve data: {reason}")]
    Fetch { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMax {
    pub date: Option<NaiveDate>,
    pub fahrenheit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTemperatureSeries {
    pub county: String,
    pub label: String,
    pub days: Vec<DailyMax>,
}

impl MonthlyTemperatureSeries {
    /// Fahrenheit values in the order the upstream source reported them.
    pub fn values(&self) -> Vec<f64> {
        self.days.iter().map(|d| d.fahrenheit).collect()
    }

    pub fn title(&self) -> String {
        format!("High temps for {} {}", self.county, self.label)
    }

    /// Day of month against value. Readings without a date use their position.
    pub fn points(&self) -> Vec<(u32, f64)> {
        self.days
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let day = d.date.map(|date| date.day()).unwrap_or(i as u32 + 1);
                (day, d.fahrenheit)
            })
            .collect()
    }

    pub fn max(&self) -> Option<f64> {
        self.values().into_iter().reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.values().into_iter().reduce(f64::min)
    }
}

/// Converts tenths of a degree Celsius to degrees Fahrenheit.
pub fn to_fahrenheit(tenths_celsius: f64) -> f64 {
    (tenths_celsius / 10.0) * 9.0 / 5.0 + 32.0
}

/// Full month name and year, e.g. `March 2024`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

pub struct TemperatureService<'a> {
    table: &'a CodeTable,
    client: CdoClient,
    token: String,
}

impl<'a> TemperatureService<'a> {
    pub fn new(table: &'a CodeTable, client: CdoClient, token: &str) -> Self {
        TemperatureService {
            table,
            client,
            token: token.to_string(),
        }
    }

    pub async fn fetch_series(
        &self,
        state: &str,
        county: &str,
        reference_date: NaiveDate,
    ) -> Result<MonthlyTemperatureSeries, SeriesError> {
        let code = self.table.resolve_code(state, county)?;

        let readings = self
            .client
            .fetch_monthly_max(&self.token, &code, reference_date)
            .await
            .map_err(|e| {
                warn!(error = %e, %state, %county, "could not fetch temperatures");
                SeriesError::Fetch {
                    reason: e.to_string(),
                }
            })?;

        let days = readings
            .iter()
            .map(|r| DailyMax {
                date: r.date,
                fahrenheit: to_fahrenheit(r.value),
            })
            .collect::<Vec<_>>();

        let label = month_label(reference_date);
        info!(%state, %county, fips = %code, %label, days = days.len(), "fetched monthly series");

        Ok(MonthlyTemperatureSeries {
            county: county.to_string(),
            label,
            days,
        })
    }
}

// -- Tests -------------------------------------------------------------------
