//! Client for the NOAA NCEI Climate Data Online (CDO) v2 web service.
//!
//! One call fetches one calendar month of daily maximum temperatures (`TMAX`
//! in the `GHCND` dataset) for a county. See the
//! [CDO web services documentation](https://www.ncdc.noaa.gov/cdo-web/webservices/v2).

pub mod month;
pub mod response;

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use thiserror::Error;
use tracing::{debug, warn};

use crate::geo::GeoCode;

pub use month::MonthWindow;
pub use response::parse_results;

pub const DEFAULT_BASE_URL: &str = "https://www.ncei.noaa.gov/cdo-web/api/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DATASET_ID: &str = "GHCND";
const DATATYPE_ID: &str = "TMAX";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No access token supplied")]
    MissingToken,

    #[error("HTTP error {status}")]
    Transport { status: u16 },

    #[error("Request failed: {message}")]
    Service { message: String },

    #[error("Empty JSON object")]
    EmptyResult,

    #[error("Unexpected response: {message}")]
    Malformed { message: String },
}

impl ClientError {
    pub fn service<S: Into<String>>(message: S) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One daily observation, in tenths of a degree Celsius.
pub struct TemperatureReading {
    pub date: Option<NaiveDate>,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct CdoClient {
    http: reqwest::Client,
    base_url: String,
}

impl CdoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::service(e.to_string()))?;

        Ok(CdoClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the daily maximum temperatures for the month containing `reference_date`.
    ///
    /// A single request is made; days the upstream source did not report are
    /// simply absent from the result.
    pub async fn fetch_monthly_max(
        &self,
        token: &str,
        geo_code: &GeoCode,
        reference_date: NaiveDate,
    ) -> Result<Vec<TemperatureReading>, ClientError> {
        if token.trim().is_empty() {
            return Err(ClientError::MissingToken);
        }

        let window = MonthWindow::containing(reference_date);
        let url = format!("{}/data", self.base_url);

        debug!(%url, location = %geo_code, start = %window.first(), end = %window.last(), "requesting daily maximum temperatures");

        let response = self
            .http
            .get(&url)
            .query(&query_params(geo_code, &window))
            .header("token", token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "CDO request failed");
                ClientError::service(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, location = %geo_code, "CDO returned an error status");
            return Err(ClientError::Transport {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::service(e.to_string()))?;

        let readings = parse_results(&body)?;
        debug!(count = readings.len(), days = window.days(), "received observations");

        Ok(readings)
    }
}

fn query_params(geo_code: &GeoCode, window: &MonthWindow) -> Vec<(&'static str, String)> {
    vec![
        ("datasetid", DATASET_ID.to_string()),
        ("datatypeid", DATATYPE_ID.to_string()),
        ("locationid", format!("FIPS:{}", geo_code.fips())),
        ("startdate", window.start_param()),
        ("enddate", window.end_param()),
        ("limit", window.days().to_string()),
    ]
}

// -- Tests -------------------------------------------------------------------
