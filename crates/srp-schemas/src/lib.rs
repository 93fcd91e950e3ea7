//! srp-schemas
//!
//! Value records shared by the roster adapters, the validator and the CLI.
//! Everything here is plain data: immutable once produced, serde-friendly,
//! no behaviour beyond small accessors.

use serde::{Deserialize, Serialize};

/// One reserved reward and the priority counter attached to it.
///
/// `counter == 0` is a plain reservation; `> 0` marks the tracked claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemClaim {
    pub item_name: String,
    pub counter: u32,
}

impl ItemClaim {
    pub fn new(item_name: impl Into<String>, counter: u32) -> Self {
        Self {
            item_name: item_name.into(),
            counter,
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.counter > 0
    }
}

/// One participant's claims within a single period, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRoster {
    pub participant_name: String,
    pub claims: Vec<ItemClaim>,
}

impl ParticipantRoster {
    pub fn new(participant_name: impl Into<String>, claims: Vec<ItemClaim>) -> Self {
        Self {
            participant_name: participant_name.into(),
            claims,
        }
    }
}

/// One full event occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub period_id: String,
    /// Human-facing page for this period, when the source knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub participants: Vec<ParticipantRoster>,
}

impl Period {
    pub fn new(period_id: impl Into<String>, participants: Vec<ParticipantRoster>) -> Self {
        Self {
            period_id: period_id.into(),
            source_url: None,
            participants,
        }
    }

    /// Placeholder for a period whose retrieval failed.
    pub fn empty(period_id: impl Into<String>) -> Self {
        Self::new(period_id, Vec::new())
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutcomeStatus {
    Ok,
    Warning,
    Error,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Ok => "OK",
            OutcomeStatus::Warning => "WARNING",
            OutcomeStatus::Error => "ERROR",
        }
    }
}

/// Verdict for one current-period participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub participant_name: String,
    pub item_name: String,
    pub actual_counter: u32,
    pub expected_counter: u32,
    pub status: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Aggregate over all outcomes of one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub period_id: String,
    pub outcomes: Vec<ValidationOutcome>,
    pub total_participants: usize,
    pub ok_count: usize,
    pub warning_count: usize,
    pub error_count: usize,
}

impl ValidationReport {
    /// Build the aggregate from outcomes; counts are always derived, never supplied.
    pub fn from_outcomes(period_id: impl Into<String>, outcomes: Vec<ValidationOutcome>) -> Self {
        let error_count = outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Error)
            .count();
        let warning_count = outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Warning)
            .count();
        let total_participants = outcomes.len();

        Self {
            period_id: period_id.into(),
            outcomes,
            total_participants,
            ok_count: total_participants - error_count - warning_count,
            warning_count,
            error_count,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warning_count == 0 && self.error_count == 0
    }

    pub fn outcome_for(&self, participant_name: &str) -> Option<&ValidationOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.participant_name == participant_name)
    }
}
