//! Claim resolution and identity matching.

use srp_schemas::{ItemClaim, ParticipantRoster, Period};

/// Pick the claim that carries the priority counter.
///
/// First positive-counter claim wins. A roster with only plain claims is a
/// fresh participant: its first claim with counter 0. No claims -> `None`.
pub fn resolve_tracked_claim(roster: &ParticipantRoster) -> Option<ItemClaim> {
    if let Some(tracked) = roster.claims.iter().find(|c| c.is_tracked()) {
        return Some(tracked.clone());
    }

    roster
        .claims
        .first()
        .map(|first| ItemClaim::new(first.item_name.clone(), 0))
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Participant identity across periods: case-insensitive, whitespace-trimmed.
pub fn same_participant(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Same reward for continuation purposes: case-insensitive, whitespace-trimmed.
pub fn same_item(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Find `name` in one period's roster.
pub fn find_participant<'a>(period: &'a Period, name: &str) -> Option<&'a ParticipantRoster> {
    period
        .participants
        .iter()
        .find(|p| same_participant(&p.participant_name, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(claims: &[(&str, u32)]) -> ParticipantRoster {
        ParticipantRoster::new(
            "Someone",
            claims
                .iter()
                .map(|(n, v)| ItemClaim::new(*n, *v))
                .collect(),
        )
    }

    #[test]
    fn positive_counter_claim_is_tracked_even_if_not_first() {
        let r = roster(&[("Plain Ring", 0), ("Big Sword", 4)]);
        assert_eq!(resolve_tracked_claim(&r), Some(ItemClaim::new("Big Sword", 4)));
    }

    #[test]
    fn first_positive_claim_wins_on_ties() {
        let r = roster(&[("A", 0), ("B", 2), ("C", 5)]);
        assert_eq!(resolve_tracked_claim(&r), Some(ItemClaim::new("B", 2)));
    }

    #[test]
    fn all_plain_claims_resolve_to_first_with_zero() {
        let r = roster(&[("First", 0), ("Second", 0)]);
        assert_eq!(resolve_tracked_claim(&r), Some(ItemClaim::new("First", 0)));
    }

    #[test]
    fn no_claims_resolves_to_none() {
        assert_eq!(resolve_tracked_claim(&roster(&[])), None);
    }

    #[test]
    fn names_match_ignoring_case_and_padding() {
        assert!(same_participant("  Gzeus ", "gZEUS"));
        assert!(!same_participant("Gzeus", "Gzeuss"));
        assert!(same_item("Band of Accuria ", "band of accuria"));
    }

    #[test]
    fn find_participant_uses_normalized_names() {
        let p = Period::new("P", vec![ParticipantRoster::new("Mightymax", vec![])]);
        assert!(find_participant(&p, " mightymax").is_some());
        assert!(find_participant(&p, "Psst").is_none());
    }
}
