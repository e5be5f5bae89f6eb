pub mod counties;
pub mod fetch;
pub mod states;

use anyhow::{Context, Result};

pub use counties::counties;
pub use fetch::fetch;
pub use states::states;

use crate::{config::Config, geo::CodeTable};

/// Loads the reference dataset. Failure here is fatal.
pub fn load_table(config: &Config) -> Result<CodeTable> {
    config
        .load_code_table()
        .context("Could not load the state/county reference dataset")
}

/// Points at the checked-in dataset so tests never pick up a per-user copy.
#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        counties: Some(
            [env!("CARGO_MANIFEST_DIR"), "data", "counties.csv"]
                .iter()
                .collect(),
        ),
        ..Config::default()
    }
}
