//! Scenario: report-level properties over a mixed roster.
//!
//! - one outcome per current participant, counts add up
//! - validating twice gives identical reports
//! - an empty current period is surfaced by `validate_checked`
//! - the trace shows what the validator saw per period

use srp_reconcile::*;
use srp_schemas::{ItemClaim, OutcomeStatus, ParticipantRoster, Period};

fn roster(name: &str, claims: &[(&str, u32)]) -> ParticipantRoster {
    ParticipantRoster::new(
        name,
        claims.iter().map(|(i, v)| ItemClaim::new(*i, *v)).collect(),
    )
}

fn fixture() -> (Period, Vec<Period>) {
    let current = Period::new(
        "SNDQJT",
        vec![
            roster("Gzeus", &[("Crown", 4), ("Boots", 0)]),
            roster("Psst", &[("Ring", 0)]),
            roster("Newbie", &[("Belt", 2)]),
            roster("Broken", &[]),
            roster("Wrong", &[("Cape", 9)]),
        ],
    );
    let history = vec![
        Period::new(
            "2ECMWK",
            vec![
                roster("Gzeus", &[("Crown", 3)]),
                roster("Psst", &[("Amulet", 3)]),
                roster("Wrong", &[("Cape", 1)]),
            ],
        ),
        Period::new("MKJWXC", vec![roster("Gzeus", &[("Crown", 2)])]),
        Period::empty("6TEQQ7"),
    ];
    (current, history)
}

#[test]
fn one_outcome_per_participant_and_counts_add_up() {
    let (current, history) = fixture();
    let r = validate(&current, &history);

    assert_eq!(r.period_id, "SNDQJT");
    assert_eq!(r.outcomes.len(), current.participants.len());
    assert_eq!(r.total_participants, 5);
    assert_eq!(r.ok_count + r.warning_count + r.error_count, r.total_participants);
    assert_eq!(r.ok_count, 2);
    assert_eq!(r.warning_count, 1);
    assert_eq!(r.error_count, 2);

    let names: Vec<&str> = r.outcomes.iter().map(|o| o.participant_name.as_str()).collect();
    assert_eq!(names, ["Gzeus", "Psst", "Newbie", "Broken", "Wrong"]);

    let wrong = r.outcome_for("Wrong").unwrap();
    assert_eq!(wrong.status, OutcomeStatus::Error);
    assert_eq!(wrong.reason.as_deref(), Some("Expected 2, got 9"));
}

#[test]
fn validation_is_idempotent() {
    let (current, history) = fixture();
    let a = validate(&current, &history);
    let b = validate(&current, &history);
    assert_eq!(a, b);
}

#[test]
fn absent_everywhere_always_expects_zero() {
    let (_, history) = fixture();
    for counter in [0, 1, 2, 5] {
        let current = Period::new("NOW", vec![roster("Stranger", &[("Gem", counter)])]);
        let r = validate(&current, &history);
        assert_eq!(r.outcomes[0].expected_counter, 0);
    }
}

#[test]
fn empty_current_period_is_rejected_by_checked_entry_point() {
    let err = validate_checked(&ValidationPolicy::default(), &Period::empty("GONE"), &[])
        .unwrap_err();
    assert_eq!(err.period_id, "GONE");
    assert!(err.to_string().contains("no participants"));

    // The unchecked entry point still returns a (vacuously clean) report.
    let r = validate(&Period::empty("GONE"), &[]);
    assert_eq!(r.total_participants, 0);
    assert!(r.is_clean());
}

#[test]
fn checked_entry_point_matches_unchecked_on_real_input() {
    let (current, history) = fixture();
    let checked = validate_checked(&ValidationPolicy::default(), &current, &history).unwrap();
    assert_eq!(checked, validate(&current, &history));
}

#[test]
fn trace_reports_each_period() {
    let (current, history) = fixture();
    let mut periods = vec![current];
    periods.extend(history);

    let t = trace_participant("gzeus", &periods);
    assert_eq!(t.len(), 4);
    assert_eq!(t[0].tracked, Some(ItemClaim::new("Crown", 4)));
    assert_eq!(t[1].tracked, Some(ItemClaim::new("Crown", 3)));
    assert_eq!(t[2].tracked, Some(ItemClaim::new("Crown", 2)));
    assert!(!t[3].present);
    assert_eq!(t[3].tracked, None);

    let broken = trace_participant("Broken", &periods);
    assert!(broken[0].present);
    assert_eq!(broken[0].tracked, None);
}
