use anyhow::{anyhow, Result};

use crate::{config::Config, geo::NotFoundError};

use super::load_table;

/// Lists county names, optionally prefixed with their FIPS codes.
pub fn counties(config: &Config, state: &str, codes: bool) -> Result<String> {
    let table = load_table(config)?;
    let hint = |e: NotFoundError| anyhow!("{}. Run `cdo-tmax states` to list valid names", e);

    let lines: Vec<String> = if codes {
        table
            .counties(state)
            .map_err(hint)?
            .iter()
            .map(|c| format!("{}  {}", c.code.fips(), c.name))
            .collect()
    } else {
        table
            .list_counties(state)
            .map_err(hint)?
            .into_iter()
            .map(String::from)
            .collect()
    };

    Ok(lines.join("\n"))
}

// -- Tests -------------------------------------------------------------------
