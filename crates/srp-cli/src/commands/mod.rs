//! Command handler modules for the `srp` binary.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod snapshot;
pub mod trace;
pub mod validate;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use srp_config::{report_unused_keys, SrpConfig, UnusedKeyPolicy};
use srp_reconcile::ValidationPolicy;
use srp_roster::ingest_csv::parse_roster_csv_file;
use srp_roster::SourceEndpoints;
use srp_schemas::{Period, ValidationReport};
use tracing::warn;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Effective settings for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// `None` when no config file was given.
    pub config_hash: Option<String>,
    pub config: SrpConfig,
}

impl Settings {
    pub fn policy(&self) -> ValidationPolicy {
        let defaults = ValidationPolicy::default();
        let v = &self.config.validation;
        ValidationPolicy {
            recent_window: v.recent_window.unwrap_or(defaults.recent_window),
            ambiguous_counter: v.ambiguous_counter.unwrap_or(defaults.ambiguous_counter),
        }
    }

    pub fn endpoints(&self) -> SourceEndpoints {
        let defaults = SourceEndpoints::default();
        let s = &self.config.source;
        SourceEndpoints {
            event_api: s.event_api.clone().unwrap_or(defaults.event_api),
            raid_data_url: s.raid_data_url.clone().unwrap_or(defaults.raid_data_url),
            page_url: s.page_url.clone().unwrap_or(defaults.page_url),
            timeout: s
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Load layered config (if any), warn about unused keys, then apply
/// environment URL overrides.
pub fn load_settings(config_paths: &[String]) -> Result<Settings> {
    let mut settings = Settings::default();

    if !config_paths.is_empty() {
        let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
        let loaded = srp_config::load_layered_yaml(&path_refs)?;

        let unused = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
        for ptr in &unused.unused_leaf_pointers {
            warn!(key = %ptr, "config key is not read by srp; check spelling");
        }

        settings.config = loaded.settings().context("invalid config")?;
        settings.config_hash = Some(loaded.config_hash);
    }

    settings
        .config
        .apply_env_overrides(|k| std::env::var(k).ok())?;
    Ok(settings)
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

pub fn load_csv_periods(files: &[String]) -> Result<Vec<Period>> {
    files
        .iter()
        .map(|f| {
            parse_roster_csv_file(Path::new(f)).with_context(|| format!("load export: {f}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportEnvelope<'a> {
    generated_at_utc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config_hash: Option<&'a str>,
    report: &'a ValidationReport,
}

pub fn print_period_counts(periods: &[Period]) {
    for p in periods {
        println!(
            "period period_id={} participants={}",
            p.period_id,
            p.participants.len()
        );
    }
}

pub fn print_report(report: &ValidationReport, settings: &Settings, json: bool) -> Result<()> {
    if json {
        let envelope = ReportEnvelope {
            generated_at_utc: chrono::Utc::now().to_rfc3339(),
            config_hash: settings.config_hash.as_deref(),
            report,
        };
        let s = serde_json::to_string_pretty(&envelope).context("serialize report")?;
        println!("{s}");
        return Ok(());
    }

    println!("period_id={}", report.period_id);
    if let Some(h) = &settings.config_hash {
        println!("config_hash={h}");
    }
    for o in &report.outcomes {
        println!(
            "outcome name={:?} item={:?} actual={} expected={} status={} reason={:?}",
            o.participant_name,
            o.item_name,
            o.actual_counter,
            o.expected_counter,
            o.status.as_str(),
            o.reason.as_deref().unwrap_or("")
        );
    }
    println!(
        "summary ok={} warnings={} errors={} total={}",
        report.ok_count, report.warning_count, report.error_count, report.total_participants
    );
    Ok(())
}
