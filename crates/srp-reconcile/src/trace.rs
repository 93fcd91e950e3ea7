//! Per-participant history trace, for diagnosing a single verdict.

use serde::Serialize;
use srp_schemas::{ItemClaim, Period};

use crate::claim::{find_participant, resolve_tracked_claim};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub period_id: String,
    /// `false` when the participant is absent from the period.
    pub present: bool,
    /// Tracked claim, if present with at least one claim.
    pub tracked: Option<ItemClaim>,
}

/// Walk `periods` (newest first) and report what the validator would see for
/// `name` in each one.
pub fn trace_participant(name: &str, periods: &[Period]) -> Vec<HistoryEntry> {
    periods
        .iter()
        .map(|period| {
            let roster = find_participant(period, name);
            HistoryEntry {
                period_id: period.period_id.clone(),
                present: roster.is_some(),
                tracked: roster.and_then(resolve_tracked_claim),
            }
        })
        .collect()
}
