use anyhow::Result;

use crate::config::Config;

use super::load_table;

pub fn states(config: &Config) -> Result<String> {
    let table = load_table(config)?;

    Ok(table.list_states().join("\n"))
}

// -- Tests -------------------------------------------------------------------
