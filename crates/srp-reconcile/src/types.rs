use srp_schemas::ItemClaim;

/// Number of history periods searched for a continuation.
pub const DEFAULT_RECENT_WINDOW: usize = 3;

/// Observed counter that a reset case may legitimately carry because of the
/// external reputation-cap rule.
pub const DEFAULT_AMBIGUOUS_COUNTER: u32 = 2;

/// Item name reported for a participant with no claims at all.
pub const NO_ITEM: &str = "N/A";

/// Tunables for the validator. `Default` gives the rules of the priority system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub recent_window: usize,
    pub ambiguous_counter: u32,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            recent_window: DEFAULT_RECENT_WINDOW,
            ambiguous_counter: DEFAULT_AMBIGUOUS_COUNTER,
        }
    }
}

/// The participant's most recent tracked claim inside the recent window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriorClaim {
    /// 0-based index into the history slice (0 = previous period).
    pub week_index: usize,
    pub claim: ItemClaim,
}

/// Why the expected counter has the value it has.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpectationBasis {
    /// Never seen in any history period.
    NewParticipant,
    /// Seen, but only beyond the recent window.
    LongGap,
    /// Same item as the prior tracked claim.
    Continued { week_index: usize },
    /// Prior tracked claim was for a different item.
    ItemChanged { previous_item: String },
}

impl ExpectationBasis {
    /// Reset cases force the expected counter to zero.
    pub fn is_reset(&self) -> bool {
        !matches!(self, ExpectationBasis::Continued { .. })
    }

    /// Human annotation carried into the outcome reason; `None` for a plain
    /// week-over-week continuation.
    pub fn annotation(&self) -> Option<String> {
        match self {
            ExpectationBasis::NewParticipant => Some("New player".to_string()),
            ExpectationBasis::LongGap => Some("4+ week gap".to_string()),
            ExpectationBasis::Continued { week_index: 0 } => None,
            ExpectationBasis::Continued { week_index } => {
                Some(format!("Continued from {} weeks ago", week_index + 1))
            }
            ExpectationBasis::ItemChanged { previous_item } => {
                Some(format!("Item changed from \"{previous_item}\""))
            }
        }
    }
}

/// Expected counter plus the branch that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expectation {
    pub expected_counter: u32,
    pub basis: ExpectationBasis,
}

/// Returned by [`crate::validate_checked`] when the current period has no
/// participants. Usually means retrieval failed for that period; callers must
/// not present it as a clean result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyCurrentPeriod {
    pub period_id: String,
}

impl std::fmt::Display for EmptyCurrentPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "current period '{}' has no participants to validate",
            self.period_id
        )
    }
}

impl std::error::Error for EmptyCurrentPeriod {}
