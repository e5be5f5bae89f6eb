//! Runtime settings gathered from the command line and environment.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use thiserror::Error;
use tracing::debug;

use crate::{
    cdo::{CdoClient, ClientError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
    geo::{CodeTable, DataLoadError},
};

const APP_DIR: &str = "cdo-tmax";
const DATASET_FILE: &str = "counties.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No CDO access token. Pass --token or set CDO_TOKEN (request one at https://www.ncdc.noaa.gov/cdo-web/token)")]
    MissingToken,

    #[error("Timeout must be at least one second")]
    InvalidTimeout,

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub counties: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            counties: None,
        }
    }
}

impl Config {
    pub fn token(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    pub fn client(&self) -> Result<CdoClient, ConfigError> {
        if self.timeout < Duration::from_secs(1) {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(CdoClient::new(&self.base_url, self.timeout)?)
    }

    /// Loads the reference dataset: an explicit path, then the per-user copy, then the bundled one.
    pub fn load_code_table(&self) -> Result<CodeTable, DataLoadError> {
        match self.dataset_path(dirs::data_dir().as_deref()) {
            Some(path) => CodeTable::from_path(&path),
            None => {
                debug!("using bundled reference dataset");
                CodeTable::bundled()
            }
        }
    }

    fn dataset_path(&self, data_dir: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = &self.counties {
            return Some(path.clone());
        }

        data_dir
            .map(|dir| dir.join(APP_DIR).join(DATASET_FILE))
            .filter(|path| path.is_file())
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn should_require_token() {
        let config = Config::default();
        assert!(matches!(config.token(), Err(ConfigError::MissingToken)));

        let config = Config {
            token: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(matches!(config.token(), Err(ConfigError::MissingToken)));
    }

    #[test]
    fn should_trim_token() {
        let config = Config {
            token: Some(" abc \n".to_string()),
            ..Config::default()
        };

        assert_eq!(config.token().unwrap(), "abc");
    }

    #[test]
    fn should_reject_zero_timeout() {
        let config = Config {
            timeout: Duration::from_secs(0),
            ..Config::default()
        };

        assert!(matches!(config.client(), Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn should_prefer_explicit_dataset() {
        let config = Config {
            counties: Some(PathBuf::from("/tmp/mine.csv")),
            ..Config::default()
        };

        assert_eq!(
            config.dataset_path(None),
            Some(PathBuf::from("/tmp/mine.csv"))
        );
    }

    #[test]
    fn should_use_user_dataset_when_present() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();

        assert_eq!(config.dataset_path(Some(dir.path())), None);

        let app_dir = dir.path().join(APP_DIR);
        fs::create_dir_all(&app_dir).unwrap();
        fs::write(app_dir.join(DATASET_FILE), "S,01,000,Alabama\n").unwrap();

        assert_eq!(
            config.dataset_path(Some(dir.path())),
            Some(app_dir.join(DATASET_FILE))
        );
    }

    #[test]
    fn should_fail_fast_on_missing_explicit_dataset() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            counties: Some(dir.path().join("missing.csv")),
            ..Config::default()
        };

        assert!(matches!(
            config.load_code_table(),
            Err(DataLoadError::Io { .. })
        ));
    }
}
