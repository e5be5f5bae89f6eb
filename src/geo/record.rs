//! A single row of the county reference dataset.

use super::DataLoadError;

#[derive(Debug, Clone, PartialEq)]
/// State rows open a new group, county rows belong to the last state seen.
pub enum Record {
    State {
        name: String,
    },
    County {
        state_fips: String,
        county_fips: String,
        name: String,
    },
}

impl Record {
    /// Parses `S,<unused>,<unused>,<state>` or `C,<state fips>,<county fips>,<county>`.
    pub fn from_line(line: &str, line_number: usize) -> Result<Self, DataLoadError> {
        // The name is the last field and keeps any embedded commas.
        let fields: Vec<&str> = line.splitn(4, ',').collect();
        if fields.len() != 4 {
            return Err(DataLoadError::malformed(
                line_number,
                format!("expected 4 fields, found {}", fields.len()),
            ));
        }

        let name = fields[3].trim().to_string();
        if name.is_empty() {
            return Err(DataLoadError::malformed(line_number, "missing name"));
        }

        match fields[0].trim() {
            "S" => Ok(Record::State { name }),
            "C" => {
                let state_fips = parse_fips(fields[1], 2, line_number)?;
                let county_fips = parse_fips(fields[2], 3, line_number)?;

                Ok(Record::County {
                    state_fips,
                    county_fips,
                    name,
                })
            }
            tag => Err(DataLoadError::malformed(
                line_number,
                format!("unknown record tag `{}`", tag),
            )),
        }
    }
}

fn parse_fips(field: &str, width: usize, line_number: usize) -> Result<String, DataLoadError> {
    let code = field.trim();
    if code.len() != width || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(DataLoadError::malformed(
            line_number,
            format!("expected a {}-digit FIPS code, found `{}`", width, code),
        ));
    }

    Ok(code.to_string())
}

// -- Tests -------------------------------------------------------------------
