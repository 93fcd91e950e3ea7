use srp_schemas::{
    ItemClaim, OutcomeStatus, ParticipantRoster, Period, ValidationOutcome, ValidationReport,
};

use crate::claim::{resolve_tracked_claim, same_item};
use crate::history::{find_in_recent_window, seen_beyond_window};
use crate::{EmptyCurrentPeriod, Expectation, ExpectationBasis, ValidationPolicy, NO_ITEM};

/// Expected counter for `name` currently claiming `current_item`.
///
/// Depends only on history; the observed counter never feeds into it.
pub fn expectation_for(
    policy: &ValidationPolicy,
    name: &str,
    current_item: &str,
    history: &[Period],
) -> Expectation {
    match find_in_recent_window(name, history, policy.recent_window) {
        None => {
            let basis = if seen_beyond_window(name, history, policy.recent_window) {
                ExpectationBasis::LongGap
            } else {
                ExpectationBasis::NewParticipant
            };
            Expectation {
                expected_counter: 0,
                basis,
            }
        }
        Some(prior) if same_item(current_item, &prior.claim.item_name) => Expectation {
            expected_counter: prior.claim.counter.saturating_add(1),
            basis: ExpectationBasis::Continued {
                week_index: prior.week_index,
            },
        },
        Some(prior) => Expectation {
            expected_counter: 0,
            basis: ExpectationBasis::ItemChanged {
                previous_item: prior.claim.item_name,
            },
        },
    }
}

/// Status and reason for an observed counter against its expectation.
pub fn classify(
    policy: &ValidationPolicy,
    actual: u32,
    expectation: &Expectation,
) -> (OutcomeStatus, Option<String>) {
    let annotation = expectation.basis.annotation();

    if actual == expectation.expected_counter {
        return (OutcomeStatus::Ok, annotation);
    }

    if expectation.basis.is_reset() && actual == policy.ambiguous_counter {
        let note = annotation.unwrap_or_default();
        return (
            OutcomeStatus::Warning,
            Some(format!("Check for Exalted Status ({note})")),
        );
    }

    let mut reason = format!("Expected {}, got {}", expectation.expected_counter, actual);
    if let Some(note) = annotation {
        reason.push_str(&format!(" ({note})"));
    }
    (OutcomeStatus::Error, Some(reason))
}

fn validate_participant(
    policy: &ValidationPolicy,
    roster: &ParticipantRoster,
    history: &[Period],
) -> ValidationOutcome {
    let Some(ItemClaim { item_name, counter }) = resolve_tracked_claim(roster) else {
        return ValidationOutcome {
            participant_name: roster.participant_name.clone(),
            item_name: NO_ITEM.to_string(),
            actual_counter: 0,
            expected_counter: 0,
            status: OutcomeStatus::Error,
            reason: Some("No items found".to_string()),
        };
    };

    let expectation = expectation_for(policy, &roster.participant_name, &item_name, history);
    let (status, reason) = classify(policy, counter, &expectation);

    ValidationOutcome {
        participant_name: roster.participant_name.clone(),
        item_name,
        actual_counter: counter,
        expected_counter: expectation.expected_counter,
        status,
        reason,
    }
}

/// Validate every participant of `current` against `history` (newest first)
/// under the default policy.
pub fn validate(current: &Period, history: &[Period]) -> ValidationReport {
    validate_with_policy(&ValidationPolicy::default(), current, history)
}

/// Validate with an explicit policy. One outcome per current participant,
/// in current-period order.
pub fn validate_with_policy(
    policy: &ValidationPolicy,
    current: &Period,
    history: &[Period],
) -> ValidationReport {
    let outcomes = current
        .participants
        .iter()
        .map(|roster| validate_participant(policy, roster, history))
        .collect();

    ValidationReport::from_outcomes(current.period_id.clone(), outcomes)
}

/// Like [`validate_with_policy`], but an empty current period is an error
/// instead of a trivially clean report.
pub fn validate_checked(
    policy: &ValidationPolicy,
    current: &Period,
    history: &[Period],
) -> Result<ValidationReport, EmptyCurrentPeriod> {
    if current.is_empty() {
        return Err(EmptyCurrentPeriod {
            period_id: current.period_id.clone(),
        });
    }
    Ok(validate_with_policy(policy, current, history))
}
