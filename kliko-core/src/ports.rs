//! Traits describing schedule provider capabilities and shared error types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{BagId, Credentials, WasteStream};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to a provider backend.
pub enum FetchError {
    /// Network layer failed: transport error, timeout, or non-success status.
    #[error("network error: {0}")]
    Network(#[from] ReqwestError),
    /// The provider knows no address for the given credentials.
    #[error("no address found for {credentials}")]
    AddressNotFound {
        /// Credentials the lookup was attempted with.
        credentials: Credentials,
    },
    /// The address record came back without a usable bag id.
    #[error("address record has no bag id")]
    MissingBagId,
    /// Internal provider error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[async_trait]
/// A backend that resolves addresses and serves raw pickup schedules.
///
/// One implementation exists per municipal API; the coordinator only ever
/// sees this trait.
pub trait ScheduleSource: Send + Sync {
    /// Resolve credentials to a stable bag id with a single bounded-time
    /// request. No retries; the caller decides whether and when to retry.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on network failure, an empty or malformed
    /// response, or a response missing the identifier field.
    async fn resolve(&self, credentials: &Credentials) -> Result<BagId, FetchError>;

    /// Fetch the raw waste streams for a resolved bag id.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on network failure or a malformed response
    /// body. Per-item oddities are not errors; they are handled downstream
    /// during normalization.
    async fn waste_streams(&self, bag_id: &BagId) -> Result<Vec<WasteStream>, FetchError>;

    /// Connectivity probe with the same failure semantics as [`resolve`],
    /// collapsed to a boolean. Useful before persisting new credentials.
    ///
    /// [`resolve`]: ScheduleSource::resolve
    async fn check_connection(&self, credentials: &Credentials) -> bool {
        self.resolve(credentials).await.is_ok()
    }
}
