//! Wire shapes of the reservation service and the grouping step that turns
//! them into [`ParticipantRoster`] values.
//!
//! No HTTP here: [`crate::RaidresApiSource`] owns the transport, this module
//! only decodes and groups.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use srp_schemas::{ItemClaim, ParticipantRoster};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors a [`crate::RosterSource`] may return for one period.
#[derive(Debug)]
pub enum RosterError {
    /// Network or transport failure.
    Transport(String),
    /// The service answered with a non-success status.
    Http { status: u16, url: String },
    /// A response payload could not be decoded or violates the data model.
    Decode(String),
    /// The source itself is misconfigured (bad base URL, client build failure).
    Config(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Transport(msg) => write!(f, "transport error: {msg}"),
            RosterError::Http { status, url } => write!(f, "http status={status} url={url}"),
            RosterError::Decode(msg) => write!(f, "decode error: {msg}"),
            RosterError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for RosterError {}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// `GET {event_api}/{event_id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[serde(default)]
    pub reference: Option<String>,
    /// Numeric raid (content) id; keys the item-name lookup.
    pub raid_id: i64,
    #[serde(default)]
    pub reservations: Vec<ApiReservation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReservation {
    pub raid_item_id: i64,
    pub character: ApiCharacter,
    #[serde(default)]
    pub sr_plus: Option<ApiSrPlus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCharacter {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSrPlus {
    /// `null` and absent both mean a plain reservation.
    #[serde(default)]
    pub value: Option<i64>,
}

/// `GET {raid_data_url}/raid_{raid_id}.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidItemsResponse {
    #[serde(default)]
    pub raid_items: Vec<RaidItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RaidItem {
    pub id: i64,
    pub name: String,
}

impl RaidItemsResponse {
    pub fn into_name_map(self) -> HashMap<i64, String> {
        self.raid_items
            .into_iter()
            .map(|item| (item.id, item.name))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Display name for an item id missing from the lookup.
pub fn unknown_item_name(raid_item_id: i64) -> String {
    format!("Unknown Item ({raid_item_id})")
}

/// Group raw reservations by character name.
///
/// Participants keep their first-appearance order and claims keep source
/// order. A negative counter is rejected as a decode error.
pub fn group_reservations(
    reservations: &[ApiReservation],
    item_names: &HashMap<i64, String>,
) -> Result<Vec<ParticipantRoster>, RosterError> {
    let mut out: Vec<ParticipantRoster> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for res in reservations {
        let raw = res.sr_plus.as_ref().and_then(|s| s.value).unwrap_or(0);
        let counter = u32::try_from(raw).map_err(|_| {
            RosterError::Decode(format!(
                "negative or oversized counter {raw} for '{}'",
                res.character.name
            ))
        })?;

        let item_name = item_names
            .get(&res.raid_item_id)
            .cloned()
            .unwrap_or_else(|| unknown_item_name(res.raid_item_id));

        let name = res.character.name.as_str();
        let slot = match index.get(name) {
            Some(&i) => i,
            None => {
                out.push(ParticipantRoster::new(name, Vec::new()));
                index.insert(name, out.len() - 1);
                out.len() - 1
            }
        };
        out[slot].claims.push(ItemClaim::new(item_name, counter));
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
