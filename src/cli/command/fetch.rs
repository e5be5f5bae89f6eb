use anyhow::{bail, Result};
use chrono::Local;

use crate::{
    cli::{create_spinner, FetchArgs},
    config::Config,
    geo::NotFoundError,
    series::{month_label, MonthlyTemperatureSeries, SeriesError, TemperatureService},
};

use super::load_table;

const BAR_WIDTH: f64 = 40.0;

pub async fn fetch(config: &Config, args: &FetchArgs) -> Result<String> {
    let token = config.token()?;
    let client = config.client()?;
    let table = load_table(config)?;
    let service = TemperatureService::new(&table, client, token);

    let reference_date = args
        .month
        .or(args.date)
        .unwrap_or_else(|| Local::now().date_naive());

    let bar = create_spinner(format!(
        "Fetching {} {}...",
        args.county,
        month_label(reference_date)
    ));
    let result = service
        .fetch_series(&args.state, &args.county, reference_date)
        .await;
    bar.finish_and_clear();

    let series = match result {
        Ok(series) => series,
        Err(SeriesError::NotFound(e @ NotFoundError::State(_))) => {
            bail!("{}. Run `cdo-tmax states` to list valid names", e)
        }
        Err(SeriesError::NotFound(e)) => bail!(
            "{}. Run `cdo-tmax counties \"{}\"` to list valid names",
            e,
            args.state
        ),
        Err(e) => bail!("There was an error finding data. {}", e),
    };

    if args.json {
        Ok(serde_json::to_string_pretty(&series)?)
    } else {
        Ok(render(&series))
    }
}

/// Renders the series as a title followed by one bar per reported day.
fn render(series: &MonthlyTemperatureSeries) -> String {
    let mut lines = vec![series.title()];

    let (min, max) = match (series.min(), series.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => return lines.join("\n"),
    };
    let range = max - min;

    for (day, value) in series.points() {
        let width = if range > 0.0 {
            1 + ((value - min) / range * (BAR_WIDTH - 1.0)).round() as usize
        } else {
            BAR_WIDTH as usize
        };
        lines.push(format!("{:>2}  {:>6.1}°F  {}", day, value, "#".repeat(width)));
    }

    lines.join("\n")
}

// -- Tests -------------------------------------------------------------------
