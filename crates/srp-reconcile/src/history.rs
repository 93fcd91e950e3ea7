//! History lookups.
//!
//! Two separate passes over the same history slice:
//!
//! - [`find_in_recent_window`] decides the expected counter.
//! - [`seen_beyond_window`] only picks the reset annotation and never changes
//!   the expected value.

use srp_schemas::Period;

use crate::claim::{find_participant, resolve_tracked_claim};
use crate::PriorClaim;

/// Most recent tracked claim for `name` within the first `window` periods of
/// `history` (newest first).
///
/// A period where the participant appears without any claim is skipped and
/// the search continues with the next one.
pub fn find_in_recent_window(name: &str, history: &[Period], window: usize) -> Option<PriorClaim> {
    history
        .iter()
        .take(window)
        .enumerate()
        .find_map(|(week_index, period)| {
            let roster = find_participant(period, name)?;
            let claim = resolve_tracked_claim(roster)?;
            Some(PriorClaim { week_index, claim })
        })
}

/// Whether `name` holds a tracked claim anywhere past the recent window.
pub fn seen_beyond_window(name: &str, history: &[Period], window: usize) -> bool {
    history
        .iter()
        .skip(window)
        .filter_map(|period| find_participant(period, name))
        .any(|roster| resolve_tracked_claim(roster).is_some())
}
