//! `srp snapshot`: fetch periods and keep them as CSV exports so they can be
//! re-validated offline with `srp validate-csv`.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use srp_roster::ingest_csv::write_roster_csv;
use srp_roster::{RaidresApiSource, RosterSource};

use super::Settings;

pub async fn snapshot(settings: &Settings, out_dir: &str, ids: &[String]) -> Result<()> {
    let source = RaidresApiSource::new(settings.endpoints()).context("build roster source")?;

    fs::create_dir_all(out_dir).with_context(|| format!("create output dir: {out_dir}"))?;

    for id in ids {
        let period = source
            .fetch_period(id)
            .await
            .with_context(|| format!("fetch period {id}"))?;

        let path = Path::new(out_dir).join(format!("{}.csv", period.period_id));
        let file =
            File::create(&path).with_context(|| format!("create {}", path.display()))?;
        write_roster_csv(&period, BufWriter::new(file))
            .with_context(|| format!("write {}", path.display()))?;

        println!(
            "snapshot_written=true period_id={} participants={} path={}",
            period.period_id,
            period.participants.len(),
            path.display()
        );
    }

    Ok(())
}
