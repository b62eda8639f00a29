//! Schedule provider for the HVC Groep waste collection API.
//!
//! HVC serves municipalities in Noord- and Zuid-Holland. Addresses are keyed
//! by postal code and house number and resolve to a BAG building id, which in
//! turn keys the per-address pickup schedule ("afvalstromen").

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use kliko_core::{
    model::{BagId, Credentials, WasteStream},
    ports::{FetchError, ScheduleSource},
};

const DEFAULT_BASE_URL: &str = "https://apps.hvcgroep.nl";

/// One bounded-time attempt per request; the coordinator decides about retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Single entry from `/rest/adressen/{postcode}-{huisnummer}`.
#[derive(Debug, Deserialize)]
struct AddressEntry {
    #[serde(rename = "bagId", default)]
    bag_id: Option<String>,
}

/// Single entry from `/rest/adressen/{bag_id}/afvalstromen`.
#[derive(Debug, Deserialize)]
struct AfvalstroomEntry {
    id: i64,

    #[serde(default)]
    title: String,

    /// Next collection date, null when nothing is scheduled for this stream.
    #[serde(default)]
    ophaaldatum: Option<String>,
}

/// HTTP client for the HVC Groep REST API.
pub struct HvcClient {
    client: Client,
    base_url: Url,
}

impl HvcClient {
    /// Create a client pointed at the production HVC API.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] when the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] when the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::Internal`] for an unparsable
    /// base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("kliko/0.1")
            .build()?;

        // A trailing slash makes Url::join treat the base as a directory.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|err| FetchError::Internal(format!("invalid base URL '{base_url}': {err}")))?;

        Ok(Self { client, base_url })
    }

    fn address_url(&self, credentials: &Credentials) -> Result<Url, FetchError> {
        let path = format!(
            "rest/adressen/{}-{}",
            credentials.postal_code(),
            credentials.house_number()
        );
        self.base_url
            .join(&path)
            .map_err(|err| FetchError::Internal(format!("invalid address URL: {err}")))
    }

    fn streams_url(&self, bag_id: &BagId) -> Result<Url, FetchError> {
        let path = format!("rest/adressen/{bag_id}/afvalstromen");
        self.base_url
            .join(&path)
            .map_err(|err| FetchError::Internal(format!("invalid streams URL: {err}")))
    }
}

#[async_trait]
impl ScheduleSource for HvcClient {
    async fn resolve(&self, credentials: &Credentials) -> Result<BagId, FetchError> {
        let url = self.address_url(credentials)?;
        debug!(%url, "resolving bag id");

        let entries: Vec<AddressEntry> = fetch_json(self.client.get(url)).await?;

        let Some(entry) = entries.first() else {
            return Err(FetchError::AddressNotFound {
                credentials: credentials.clone(),
            });
        };

        match entry.bag_id.as_deref() {
            Some(bag_id) if !bag_id.is_empty() => {
                debug!(bag_id, "found bag id");
                Ok(BagId(bag_id.to_owned()))
            }
            _ => Err(FetchError::MissingBagId),
        }
    }

    async fn waste_streams(&self, bag_id: &BagId) -> Result<Vec<WasteStream>, FetchError> {
        let url = self.streams_url(bag_id)?;
        debug!(%url, "fetching waste streams");

        let entries: Vec<AfvalstroomEntry> = fetch_json(self.client.get(url)).await?;

        Ok(entries
            .into_iter()
            .map(|entry| WasteStream {
                id: entry.id,
                title: entry.title,
                pickup_date: entry.ophaaldatum,
            })
            .collect())
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, FetchError> {
    req.send()
        .await
        .map_err(FetchError::from)?
        .error_for_status()
        .map_err(FetchError::from)?
        .json()
        .await
        .map_err(FetchError::from)
}
