//! `srp trace`: what the validator sees for one participant in each period.

use anyhow::{Context, Result};
use srp_reconcile::trace_participant;

use super::load_csv_periods;

pub fn trace(name: &str, files: &[String], json: bool) -> Result<()> {
    let periods = load_csv_periods(files)?;
    let entries = trace_participant(name, &periods);

    if json {
        let s = serde_json::to_string_pretty(&entries).context("serialize trace")?;
        println!("{s}");
        return Ok(());
    }

    println!("name={name:?}");
    for e in &entries {
        match &e.tracked {
            Some(c) => println!(
                "history period_id={} present={} item={:?} counter={}",
                e.period_id, e.present, c.item_name, c.counter
            ),
            None => println!(
                "history period_id={} present={} item=none",
                e.period_id, e.present
            ),
        }
    }
    Ok(())
}
