//! srp-reconcile
//!
//! Cross-period validation of reservation priority counters.
//!
//! Given a current period and its history (newest first), each current
//! participant's tracked claim is compared with what the history says the
//! counter should be:
//! - same item within the recent window -> previous counter + 1
//! - different item, long gap, or never seen -> reset to 0
//! - a reset observed at the ambiguous counter value -> WARNING, not ERROR
//!
//! Deterministic, pure logic. No IO. Inputs are borrowed read-only.

mod claim;
mod engine;
mod history;
mod trace;
mod types;

pub use claim::{find_participant, resolve_tracked_claim, same_item, same_participant};
pub use engine::{classify, expectation_for, validate, validate_checked, validate_with_policy};
pub use history::{find_in_recent_window, seen_beyond_window};
pub use trace::{trace_participant, HistoryEntry};
pub use types::*;
