//! Shape of the CDO `data` endpoint response.

use chrono::NaiveDate;
use serde::Deserialize;

use super::{ClientError, TemperatureReading};

#[derive(Debug, Deserialize)]
struct DataResponse {
    #[serde(default)]
    results: Option<Vec<Observation>>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    #[serde(default)]
    date: Option<String>,
    value: f64,
}

/// Parses a response body into readings, in the order they were returned.
pub fn parse_results(body: &str) -> Result<Vec<TemperatureReading>, ClientError> {
    let response: DataResponse =
        serde_json::from_str(body).map_err(|e| ClientError::malformed(e.to_string()))?;

    let observations = match response.results {
        Some(results) if !results.is_empty() => results,
        _ => return Err(ClientError::EmptyResult),
    };

    observations
        .into_iter()
        .map(|o| -> Result<TemperatureReading, ClientError> {
            let date = o.date.as_deref().map(parse_date).transpose()?;
            Ok(TemperatureReading {
                date,
                value: o.value,
            })
        })
        .collect()
}

// Dates arrive as `2024-03-01T00:00:00`.
fn parse_date(s: &str) -> Result<NaiveDate, ClientError> {
    s.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .ok_or_else(|| ClientError::malformed(format!("invalid observation date `{}`", s)))
}

// -- Tests -------------------------------------------------------------------
