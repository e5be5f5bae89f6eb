//! State and county names mapped to FIPS codes.
//!
//! The reference dataset is a flat list of `S` (state) and `C` (county) rows.
//! Each state row starts a group and the county rows that follow belong to it.

pub mod record;

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

pub use record::Record;

/// Reference dataset compiled into the binary.
const BUNDLED_COUNTIES: &str = include_str!("../../data/counties.csv");

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Could not read reference dataset `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed reference dataset at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("Reference dataset contains no states")]
    Empty,
}

impl DataLoadError {
    pub fn malformed<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotFoundError {
    #[error("Unknown state `{0}`")]
    State(String),

    #[error("Unknown county `{county}` in {state}")]
    County { state: String, county: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Two-digit state and three-digit county FIPS codes.
pub struct GeoCode {
    state: String,
    county: String,
}

impl GeoCode {
    pub fn new(state: &str, county: &str) -> Self {
        GeoCode {
            state: state.to_string(),
            county: county.to_string(),
        }
    }

    /// The 5-character location identifier, e.g. `01001`.
    pub fn fips(&self) -> String {
        format!("{}{}", self.state, self.county)
    }
}

impl fmt::Display for GeoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.state, self.county)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountyEntry {
    pub name: String,
    pub code: GeoCode,
}

#[derive(Debug, Clone, PartialEq)]
struct StateGroup {
    name: String,
    counties: Vec<CountyEntry>,
}

#[derive(Debug, Clone, Default)]
/// Read-only lookup of states to their counties, in dataset order.
pub struct CodeTable {
    states: Vec<StateGroup>,
}

impl CodeTable {
    pub fn from_path(path: &Path) -> Result<Self, DataLoadError> {
        let contents = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::parse(&contents)?;
        debug!(path = %path.display(), states = table.states.len(), "loaded reference dataset");

        Ok(table)
    }

    pub fn bundled() -> Result<Self, DataLoadError> {
        Self::parse(BUNDLED_COUNTIES)
    }

    pub fn parse(contents: &str) -> Result<Self, DataLoadError> {
        let mut states: Vec<StateGroup> = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            let line_number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            match Record::from_line(line, line_number)? {
                Record::State { name } => {
                    if states.iter().any(|s| s.name == name) {
                        return Err(DataLoadError::malformed(
                            line_number,
                            format!("duplicate state `{}`", name),
                        ));
                    }
                    states.push(StateGroup {
                        name,
                        counties: Vec::new(),
                    });
                }
                Record::County {
                    state_fips,
                    county_fips,
                    name,
                } => {
                    let group = states.last_mut().ok_or_else(|| {
                        DataLoadError::malformed(line_number, "county listed before any state")
                    })?;
                    group.counties.push(CountyEntry {
                        name,
                        code: GeoCode::new(&state_fips, &county_fips),
                    });
                }
            }
        }

        if states.is_empty() {
            return Err(DataLoadError::Empty);
        }

        Ok(CodeTable { states })
    }

    /// State names in dataset order.
    pub fn list_states(&self) -> Vec<&str> {
        self.states.iter().map(|s| s.name.as_str()).collect()
    }

    /// County names of `state` in dataset order.
    pub fn list_counties(&self, state: &str) -> Result<Vec<&str>, NotFoundError> {
        let counties = self.counties(state)?;

        Ok(counties.iter().map(|c| c.name.as_str()).collect())
    }

    pub fn counties(&self, state: &str) -> Result<&[CountyEntry], NotFoundError> {
        self.states
            .iter()
            .find(|s| s.name == state)
            .map(|s| s.counties.as_slice())
            .ok_or_else(|| NotFoundError::State(state.to_string()))
    }

    pub fn resolve_code(&self, state: &str, county: &str) -> Result<GeoCode, NotFoundError> {
        self.counties(state)?
            .iter()
            .find(|c| c.name == county)
            .map(|c| c.code.clone())
            .ok_or_else(|| NotFoundError::County {
                state: state.to_string(),
                county: county.to_string(),
            })
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const FIXTURE: &str = "S,01,000,Alabama
C,01,001,Autauga
C,01,003,Baldwin

S,10,000,Delaware
C,10,001,Kent
C,10,003,New Castle
C,10,005,Sussex
S,02,000,Alaska
C,02,013,Aleutians East
";

    fn table() -> CodeTable {
        CodeTable::parse(FIXTURE).unwrap()
    }

    #[test]
    fn should_keep_source_order_of_states() {
        assert_eq!(table().list_states(), vec!["Alabama", "Delaware", "Alaska"]);
    }

    #[test]
    fn should_list_counties_in_source_order() {
        let table = table();

        assert_eq!(
            table.list_counties("Delaware").unwrap(),
            vec!["Kent", "New Castle", "Sussex"]
        );
        assert_eq!(table.list_counties("Alaska").unwrap(), vec!["Aleutians East"]);
    }

    #[test]
    fn should_fail_for_unknown_state() {
        let err = table().list_counties("Atlantis").unwrap_err();

        assert_eq!(err, NotFoundError::State("Atlantis".to_string()));
    }

    #[test]
    fn should_compare_names_by_value() {
        let table = table();
        let state = String::from("Ala") + "bama";

        assert_eq!(table.list_counties(&state).unwrap().len(), 2);
    }

    #[test]
    fn should_resolve_code() {
        let code = table().resolve_code("Alabama", "Autauga").unwrap();

        assert_eq!(code, GeoCode::new("01", "001"));
        assert_eq!(code.fips(), "01001");
        assert_eq!(code.to_string(), "01001");
    }

    #[test]
    fn should_not_fall_back_to_first_county() {
        let err = table().resolve_code("Alabama", "Kent").unwrap_err();

        assert_eq!(
            err,
            NotFoundError::County {
                state: "Alabama".to_string(),
                county: "Kent".to_string(),
            }
        );
    }

    #[test]
    fn should_not_fall_back_to_first_state() {
        let err = table().resolve_code("Nowhere", "Autauga").unwrap_err();

        assert!(matches!(err, NotFoundError::State(_)));
    }

    #[test]
    fn should_resolve_every_bundled_county() {
        let table = CodeTable::bundled().unwrap();

        for state in table.list_states() {
            for entry in table.counties(state).unwrap() {
                let code = table.resolve_code(state, &entry.name).unwrap();
                let fips = code.fips();

                assert_eq!(fips.len(), 5, "{} / {}", state, entry.name);
                assert!(fips.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn should_start_bundled_dataset_with_alabama() {
        let table = CodeTable::bundled().unwrap();

        assert_eq!(table.list_states()[0], "Alabama");
        assert_eq!(table.list_counties("Alabama").unwrap()[0], "Autauga");
        assert_eq!(
            table.resolve_code("Alabama", "Autauga").unwrap().fips(),
            "01001"
        );
    }

    #[test]
    fn should_bundle_every_state() {
        let table = CodeTable::bundled().unwrap();
        let states = table.list_states();

        assert_eq!(states.len(), 51);
        for state in ["Alaska", "California", "District of Columbia", "Texas", "Wyoming"] {
            assert!(states.contains(&state), "{}", state);
        }
        assert_eq!(table.list_counties("Texas").unwrap().len(), 254);
        assert_eq!(
            table.resolve_code("California", "Los Angeles").unwrap().fips(),
            "06037"
        );
        assert_eq!(
            table.resolve_code("Virginia", "Richmond city").unwrap().fips(),
            "51760"
        );
        assert_eq!(
            table.resolve_code("Alaska", "Anchorage").unwrap().fips(),
            "02020"
        );
    }

    #[test]
    fn should_reject_county_before_state() {
        let err = CodeTable::parse("C,01,001,Autauga\nS,01,000,Alabama\n").unwrap_err();

        assert!(matches!(err, DataLoadError::Malformed { line: 1, .. }));
    }

    #[test]
    fn should_reject_duplicate_state() {
        let err = CodeTable::parse("S,01,000,Alabama\nS,01,000,Alabama\n").unwrap_err();

        assert!(matches!(err, DataLoadError::Malformed { line: 2, .. }));
    }

    #[test]
    fn should_reject_empty_dataset() {
        let err = CodeTable::parse("\n\n").unwrap_err();

        assert!(matches!(err, DataLoadError::Empty));
    }

    #[test]
    fn should_report_line_of_malformed_row() {
        let err = CodeTable::parse("S,01,000,Alabama\nC,01,001\n").unwrap_err();

        assert!(matches!(err, DataLoadError::Malformed { line: 2, .. }));
    }

    #[test]
    fn should_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let table = CodeTable::from_path(file.path()).unwrap();

        assert_eq!(table.list_states().len(), 3);
    }

    #[test]
    fn should_fail_for_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("counties.csv");

        let err = CodeTable::from_path(&path).unwrap_err();

        assert!(matches!(err, DataLoadError::Io { .. }));
        assert!(err.to_string().contains("counties.csv"));
    }
}
