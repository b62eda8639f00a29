//! Coordinator state machine tests against a scripted schedule source.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, Local};
use kliko_core::coordinator::{ScheduleCoordinator, UpdateError};
use kliko_core::model::{BagId, Credentials, GarbageType, WasteStream};
use kliko_core::ports::{FetchError, ScheduleSource};

/// In-memory source whose behavior can be flipped between refreshes.
struct ScriptedSource {
    resolve_calls: AtomicUsize,
    fail_resolve: AtomicBool,
    fail_fetch: AtomicBool,
    /// Artificial fetch latency, giving overlapping refreshes a window to race.
    fetch_delay_ms: AtomicU64,
    streams: Mutex<Vec<WasteStream>>,
}

impl ScriptedSource {
    fn new(streams: Vec<WasteStream>) -> Self {
        Self {
            resolve_calls: AtomicUsize::new(0),
            fail_resolve: AtomicBool::new(false),
            fail_fetch: AtomicBool::new(false),
            fetch_delay_ms: AtomicU64::new(0),
            streams: Mutex::new(streams),
        }
    }

    fn set_streams(&self, streams: Vec<WasteStream>) {
        *self.streams.lock().expect("streams lock") = streams;
    }
}

#[async_trait]
impl ScheduleSource for ScriptedSource {
    async fn resolve(&self, _credentials: &Credentials) -> Result<BagId, FetchError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_resolve.load(Ordering::SeqCst) {
            return Err(FetchError::Internal(String::from("scripted failure")));
        }
        Ok(BagId(String::from("0000100000000001")))
    }

    async fn waste_streams(&self, _bag_id: &BagId) -> Result<Vec<WasteStream>, FetchError> {
        let delay = self.fetch_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(FetchError::Internal(String::from("scripted failure")));
        }
        Ok(self.streams.lock().expect("streams lock").clone())
    }
}

fn credentials() -> Credentials {
    Credentials::new("2381XD", "10").expect("valid credentials")
}

fn stream_in_days(id: i64, title: &str, days: u64) -> WasteStream {
    let pickup_date = Local::now().date_naive() + Days::new(days);
    WasteStream {
        id,
        title: title.to_owned(),
        pickup_date: Some(pickup_date.format("%Y-%m-%d").to_string()),
    }
}

#[tokio::test]
async fn refresh_produces_a_readable_snapshot() {
    let source = Arc::new(ScriptedSource::new(vec![
        stream_in_days(5, "GFT", 0),
        stream_in_days(3, "Papier", 1),
        stream_in_days(2, "Restafval", 6),
    ]));
    let coordinator = ScheduleCoordinator::new(Arc::clone(&source) as Arc<dyn ScheduleSource>, credentials());

    assert!(coordinator.read().is_none());

    let schedule = coordinator.refresh().await.expect("refresh succeeds");
    assert_eq!(schedule.pickup_today, vec![GarbageType::Gft]);
    assert_eq!(schedule.pickup_tomorrow, vec![GarbageType::Papier]);

    let info = schedule
        .next_pickup(GarbageType::Restafval)
        .expect("restafval entry");
    assert_eq!(info.days_until, 6);

    let read_back = coordinator.read().expect("snapshot available");
    assert_eq!(*read_back, *schedule);
}

#[tokio::test]
async fn resolution_failure_leaves_the_coordinator_unresolved() {
    let source = Arc::new(ScriptedSource::new(vec![stream_in_days(5, "GFT", 2)]));
    source.fail_resolve.store(true, Ordering::SeqCst);
    let coordinator = ScheduleCoordinator::new(Arc::clone(&source) as Arc<dyn ScheduleSource>, credentials());

    let err = coordinator.refresh().await.expect_err("refresh fails");
    assert!(matches!(err, UpdateError::Resolution(_)));
    assert!(!coordinator.is_resolved().await);
    assert!(coordinator.read().is_none());

    // Resolution is retried on the next refresh once the backend recovers.
    source.fail_resolve.store(false, Ordering::SeqCst);
    coordinator.refresh().await.expect("refresh succeeds");
    assert!(coordinator.is_resolved().await);
    assert_eq!(source.resolve_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn bag_id_is_resolved_exactly_once() {
    let source = Arc::new(ScriptedSource::new(vec![stream_in_days(5, "GFT", 2)]));
    let coordinator = ScheduleCoordinator::new(Arc::clone(&source) as Arc<dyn ScheduleSource>, credentials());

    coordinator.refresh().await.expect("first refresh");
    coordinator.refresh().await.expect("second refresh");
    coordinator.refresh().await.expect("third refresh");

    assert_eq!(source.resolve_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fetch_failure_preserves_the_previous_snapshot() {
    let source = Arc::new(ScriptedSource::new(vec![stream_in_days(5, "GFT", 3)]));
    let coordinator = ScheduleCoordinator::new(Arc::clone(&source) as Arc<dyn ScheduleSource>, credentials());

    let before = coordinator.refresh().await.expect("initial refresh");

    source.fail_fetch.store(true, Ordering::SeqCst);
    let err = coordinator.refresh().await.expect_err("refresh fails");
    assert!(matches!(err, UpdateError::Fetch(_)));

    let after = coordinator.read().expect("old snapshot survives");
    assert_eq!(*after, *before);
    assert!(Arc::ptr_eq(&after, &before));
}

#[tokio::test]
async fn successful_refresh_replaces_the_snapshot_wholesale() {
    let source = Arc::new(ScriptedSource::new(vec![
        stream_in_days(5, "GFT", 2),
        stream_in_days(3, "Papier", 4),
    ]));
    let coordinator = ScheduleCoordinator::new(Arc::clone(&source) as Arc<dyn ScheduleSource>, credentials());

    let first = coordinator.refresh().await.expect("first refresh");
    assert!(first.next_pickup(GarbageType::Papier).is_some());

    // Papier disappears from the feed entirely; the new snapshot must not
    // carry the stale entry over.
    source.set_streams(vec![stream_in_days(5, "GFT", 2)]);
    let second = coordinator.refresh().await.expect("second refresh");

    assert!(second.next_pickup(GarbageType::Gft).is_some());
    assert!(second.next_pickup(GarbageType::Papier).is_none());

    let read_back = coordinator.read().expect("snapshot available");
    assert!(Arc::ptr_eq(&read_back, &second));
}

#[tokio::test]
async fn overlapping_refreshes_queue_instead_of_racing() {
    let source = Arc::new(ScriptedSource::new(vec![
        stream_in_days(5, "GFT", 2),
        stream_in_days(3, "Papier", 4),
    ]));
    source.fetch_delay_ms.store(50, Ordering::SeqCst);
    let coordinator =
        ScheduleCoordinator::new(Arc::clone(&source) as Arc<dyn ScheduleSource>, credentials());

    // Two ticks land while the first fetch is still in flight; they must
    // queue on the refresh lock, resolve once, and both commit wholesale.
    let (first, second) = tokio::join!(coordinator.refresh(), coordinator.refresh());
    let first = first.expect("first refresh");
    let second = second.expect("second refresh");

    assert_eq!(*first, *second);
    assert_eq!(source.resolve_calls.load(Ordering::SeqCst), 1);

    let read_back = coordinator.read().expect("snapshot available");
    assert!(
        Arc::ptr_eq(&read_back, &first) || Arc::ptr_eq(&read_back, &second),
        "read() must return one of the committed snapshots"
    );
}

#[tokio::test]
async fn connection_check_mirrors_resolution_outcome() {
    let source = ScriptedSource::new(Vec::new());
    assert!(source.check_connection(&credentials()).await);

    source.fail_resolve.store(true, Ordering::SeqCst);
    assert!(!source.check_connection(&credentials()).await);
}
