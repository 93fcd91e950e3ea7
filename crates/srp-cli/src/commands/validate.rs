//! `srp validate` / `srp validate-csv`.

use anyhow::{Context, Result};
use srp_reconcile::validate_checked;
use srp_roster::{fetch_periods, RaidresApiSource};
use srp_schemas::Period;
use tracing::info;

use super::{load_csv_periods, print_period_counts, print_report, Settings};

/// Fetch `current` plus `previous` (newest first) and validate.
///
/// A period that fails to load is treated as empty; an empty current period
/// is an input error.
pub async fn validate_remote(
    settings: &Settings,
    current: &str,
    previous: &[String],
    json: bool,
) -> Result<()> {
    let source = RaidresApiSource::new(settings.endpoints()).context("build roster source")?;

    let mut ids = Vec::with_capacity(previous.len() + 1);
    ids.push(current.to_string());
    ids.extend(previous.iter().cloned());

    let periods = fetch_periods(&source, &ids).await;
    run(settings, &periods, json)
}

/// Offline variant over exported CSV files (current first).
pub fn validate_csv(settings: &Settings, files: &[String], json: bool) -> Result<()> {
    let periods = load_csv_periods(files)?;
    run(settings, &periods, json)
}

fn run(settings: &Settings, periods: &[Period], json: bool) -> Result<()> {
    let (current, history) = periods.split_first().context("no periods to validate")?;
    let policy = settings.policy();

    let report = validate_checked(&policy, current, history)?;
    info!(
        period_id = %report.period_id,
        history = history.len(),
        ok = report.ok_count,
        warnings = report.warning_count,
        errors = report.error_count,
        "validation complete"
    );

    if !json {
        print_period_counts(periods);
    }
    print_report(&report, settings, json)
}
