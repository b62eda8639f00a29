//! Fetch-and-cache coordinator for a single address.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Local;
use tokio::sync::Mutex;
use tracing::debug;

use crate::model::{BagId, Credentials, WasteSchedule};
use crate::ports::{FetchError, ScheduleSource};

#[derive(thiserror::Error, Debug)]
/// A refresh cycle failed. The previously cached schedule, if any, is
/// untouched either way.
pub enum UpdateError {
    /// The address could not be resolved to a bag id; the coordinator stays
    /// unresolved and retries resolution on the next refresh.
    #[error("address resolution failed: {0}")]
    Resolution(#[source] FetchError),
    /// The schedule fetch failed after the bag id was already known.
    #[error("schedule update failed: {0}")]
    Fetch(#[source] FetchError),
}

/// Owns one `Credentials` + cached bag id + latest schedule snapshot.
///
/// The bag id is resolved lazily on the first refresh and kept for the
/// coordinator's lifetime once obtained. Refreshes are serialized; readers
/// never wait for one and always see the last committed snapshot.
pub struct ScheduleCoordinator {
    source: Arc<dyn ScheduleSource>,
    credentials: Credentials,
    /// Guards the whole refresh cycle and caches the resolved bag id.
    bag_id: Mutex<Option<BagId>>,
    snapshot: RwLock<Option<Arc<WasteSchedule>>>,
}

impl ScheduleCoordinator {
    /// Create a coordinator for one address. No network activity happens
    /// until the first [`refresh`](Self::refresh).
    #[must_use]
    pub fn new(source: Arc<dyn ScheduleSource>, credentials: Credentials) -> Self {
        Self {
            source,
            credentials,
            bag_id: Mutex::new(None),
            snapshot: RwLock::new(None),
        }
    }

    /// Credentials this coordinator was created with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether a bag id has been resolved yet.
    pub async fn is_resolved(&self) -> bool {
        self.bag_id.lock().await.is_some()
    }

    /// Latest successfully fetched schedule, or `None` when no refresh ever
    /// succeeded. Never performs network activity and never waits for a
    /// refresh in flight.
    #[must_use]
    pub fn read(&self) -> Option<Arc<WasteSchedule>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run one refresh cycle: resolve the bag id if still unresolved, fetch
    /// the raw schedule, normalize it against today's local calendar date,
    /// and commit the new snapshot. Overlapping calls queue on an internal
    /// lock so two cycles can never race on the snapshot.
    ///
    /// # Errors
    ///
    /// [`UpdateError::Resolution`] when the bag id lookup fails (nothing is
    /// cached in that case) and [`UpdateError::Fetch`] when the schedule
    /// request fails. The previous snapshot survives both.
    pub async fn refresh(&self) -> Result<Arc<WasteSchedule>, UpdateError> {
        let mut bag_id_slot = self.bag_id.lock().await;

        let bag_id = match bag_id_slot.as_ref() {
            Some(bag_id) => bag_id.clone(),
            None => {
                let bag_id = self
                    .source
                    .resolve(&self.credentials)
                    .await
                    .map_err(UpdateError::Resolution)?;
                debug!(credentials = %self.credentials, %bag_id, "resolved address");
                *bag_id_slot = Some(bag_id.clone());
                bag_id
            }
        };

        let streams = self
            .source
            .waste_streams(&bag_id)
            .await
            .map_err(UpdateError::Fetch)?;

        let today = Local::now().date_naive();
        let schedule = Arc::new(WasteSchedule::build(&streams, today));

        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&schedule));

        Ok(schedule)
    }
}
