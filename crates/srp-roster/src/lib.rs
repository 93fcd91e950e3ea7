//! srp-roster
//!
//! Roster retrieval for the validator: the reservation web service and the
//! CSV export format. This crate produces [`Period`] values; it does not
//! validate anything.

pub mod ingest_csv;
pub mod provider;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use srp_schemas::Period;
use tracing::{error, info, warn};

pub use provider::RosterError;
use provider::{group_reservations, EventResponse, RaidItemsResponse};

pub const DEFAULT_EVENT_API: &str = "https://raidres.top/api/events";
pub const DEFAULT_RAID_DATA_URL: &str = "https://raidres.top/raids";
pub const DEFAULT_PAGE_URL: &str = "https://raidres.top/res";

/// Pluggable roster source.
#[async_trait::async_trait]
pub trait RosterSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch_period(&self, event_id: &str) -> Result<Period, RosterError>;
}

/// Base URLs and transport settings for [`RaidresApiSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEndpoints {
    pub event_api: String,
    pub raid_data_url: String,
    pub page_url: String,
    pub timeout: Duration,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            event_api: DEFAULT_EVENT_API.to_string(),
            raid_data_url: DEFAULT_RAID_DATA_URL.to_string(),
            page_url: DEFAULT_PAGE_URL.to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

type ItemNameMap = Arc<HashMap<i64, String>>;

/// Reservation-service backed source.
///
/// Item names are looked up once per raid id and cached for the lifetime of
/// this value (one CLI run).
#[derive(Debug)]
pub struct RaidresApiSource {
    http: reqwest::Client,
    endpoints: SourceEndpoints,
    item_names: Mutex<HashMap<i64, ItemNameMap>>,
}

impl RaidresApiSource {
    pub fn new(endpoints: SourceEndpoints) -> Result<Self, RosterError> {
        let http = reqwest::Client::builder()
            .timeout(endpoints.timeout)
            .build()
            .map_err(|e| RosterError::Config(format!("http client build failed: {e}")))?;

        Ok(Self {
            http,
            endpoints,
            item_names: Mutex::new(HashMap::new()),
        })
    }

    fn event_url(&self, event_id: &str) -> String {
        format!(
            "{}/{}",
            self.endpoints.event_api.trim_end_matches('/'),
            event_id
        )
    }

    fn raid_data_url(&self, raid_id: i64) -> String {
        format!(
            "{}/raid_{}.json",
            self.endpoints.raid_data_url.trim_end_matches('/'),
            raid_id
        )
    }

    pub fn page_url(&self, event_id: &str) -> String {
        format!(
            "{}/{}",
            self.endpoints.page_url.trim_end_matches('/'),
            event_id
        )
    }

    fn cached_item_names(&self, raid_id: i64) -> Option<ItemNameMap> {
        self.item_names
            .lock()
            .ok()
            .and_then(|cache| cache.get(&raid_id).cloned())
    }

    /// Number of raid ids with a cached item-name map.
    pub fn cached_raid_count(&self) -> usize {
        self.item_names.lock().map(|c| c.len()).unwrap_or(0)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, RosterError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RosterError::Transport(format!("GET {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RosterError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| RosterError::Decode(format!("GET {url}: {e}")))
    }

    /// Item-name map for `raid_id`. A failed lookup degrades to an empty map
    /// (every item becomes "Unknown Item (id)") and is not cached.
    async fn item_name_map(&self, raid_id: i64) -> ItemNameMap {
        if let Some(hit) = self.cached_item_names(raid_id) {
            return hit;
        }

        let url = self.raid_data_url(raid_id);
        match self.get_json::<RaidItemsResponse>(&url).await {
            Ok(body) => {
                let map = Arc::new(body.into_name_map());
                if let Ok(mut cache) = self.item_names.lock() {
                    cache.insert(raid_id, Arc::clone(&map));
                }
                map
            }
            Err(e) => {
                warn!(raid_id, error = %e, "item-name lookup failed; ids will be unresolved");
                Arc::new(HashMap::new())
            }
        }
    }
}

#[async_trait::async_trait]
impl RosterSource for RaidresApiSource {
    fn source_name(&self) -> &'static str {
        "raidres"
    }

    async fn fetch_period(&self, event_id: &str) -> Result<Period, RosterError> {
        let event_id = event_id.trim();
        if event_id.is_empty() {
            return Err(RosterError::Config("empty event id".to_string()));
        }

        let event: EventResponse = self.get_json(&self.event_url(event_id)).await?;
        let item_names = self.item_name_map(event.raid_id).await;
        let participants = group_reservations(&event.reservations, &item_names)?;

        info!(
            event_id,
            raid_id = event.raid_id,
            participants = participants.len(),
            reservations = event.reservations.len(),
            "fetched period"
        );

        Ok(Period::new(event_id, participants).with_source_url(self.page_url(event_id)))
    }
}

/// Fetch `event_ids` in order. A period that fails to load is logged and
/// replaced by an empty period with the same id, so one bad id never aborts
/// the batch.
pub async fn fetch_periods(source: &dyn RosterSource, event_ids: &[String]) -> Vec<Period> {
    let mut out = Vec::with_capacity(event_ids.len());
    for event_id in event_ids {
        let event_id = event_id.trim();
        match source.fetch_period(event_id).await {
            Ok(period) => out.push(period),
            Err(e) => {
                error!(
                    source = source.source_name(),
                    event_id,
                    error = %e,
                    "period fetch failed; continuing with empty period"
                );
                out.push(Period::empty(event_id));
            }
        }
    }
    out
}

// -----------------
// Tests (no network)
// -----------------
