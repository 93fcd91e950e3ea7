//! Typed view of the merged config.
//!
//! Every field is optional: absent keys mean "use the built-in default of the
//! crate that owns the concern" (srp-roster for endpoints, srp-reconcile for
//! validation rules). This crate never restates those defaults.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Environment variables that override `source.*` URLs (applied after YAML).
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SRP_EVENT_API", "event_api"),
    ("SRP_RAID_DATA_URL", "raid_data_url"),
    ("SRP_PAGE_URL", "page_url"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrpConfig {
    pub source: SourceSection,
    pub validation: ValidationSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSection {
    pub event_api: Option<String>,
    pub raid_data_url: Option<String>,
    pub page_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSection {
    pub recent_window: Option<usize>,
    pub ambiguous_counter: Option<u32>,
}

impl SrpConfig {
    pub fn from_json(v: &Value) -> Result<Self> {
        let cfg: SrpConfig =
            serde_json::from_value(v.clone()).context("config does not match expected shape")?;
        cfg.check()?;
        Ok(cfg)
    }

    fn check(&self) -> Result<()> {
        if self.validation.recent_window == Some(0) {
            bail!("validation.recent_window must be >= 1");
        }
        if self.source.timeout_secs == Some(0) {
            bail!("source.timeout_secs must be >= 1");
        }
        for (key, url) in [
            ("source.event_api", &self.source.event_api),
            ("source.raid_data_url", &self.source.raid_data_url),
            ("source.page_url", &self.source.page_url),
        ] {
            if let Some(u) = url {
                if !(u.starts_with("http://") || u.starts_with("https://")) {
                    bail!("{key} must be an http(s) URL, got '{u}'");
                }
            }
        }
        Ok(())
    }

    /// Apply [`ENV_OVERRIDES`] through `lookup` (normally `std::env::var`).
    /// Empty values are ignored. The result goes through the same checks as
    /// YAML values.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, field) in ENV_OVERRIDES {
            let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            let slot = match *field {
                "event_api" => &mut self.source.event_api,
                "raid_data_url" => &mut self.source.raid_data_url,
                _ => &mut self.source.page_url,
            };
            *slot = Some(value.trim().to_string());
        }
        self.check()
            .context("invalid value from SRP_* environment override")
    }
}
