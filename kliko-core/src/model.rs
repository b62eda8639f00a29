//! Domain data structures for credentials, waste categories, and pickup schedules.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default interval between schedule refreshes, in seconds. The caller owns
/// the actual tick scheduling.
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 3600;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Rejected address input.
pub enum CredentialsError {
    /// Postal code is empty after stripping whitespace.
    #[error("postal code must not be empty")]
    EmptyPostalCode,
    /// House number is empty after trimming.
    #[error("house number must not be empty")]
    EmptyHouseNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Normalized postal code and house number identifying a single address.
///
/// One `Credentials` value identifies one coordinator instance; multiple
/// addresses mean multiple independent coordinators.
pub struct Credentials {
    postal_code: String,
    house_number: String,
}

impl Credentials {
    /// Normalize and validate the raw address input. The postal code is
    /// uppercased with all whitespace removed (`"2381 xd"` becomes
    /// `"2381XD"`), the house number is trimmed.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialsError`] when either field is empty after
    /// normalization.
    pub fn new(postal_code: &str, house_number: &str) -> Result<Self, CredentialsError> {
        let postal_code: String = postal_code
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(|ch| ch.to_ascii_uppercase())
            .collect();
        let house_number = house_number.trim();

        if postal_code.is_empty() {
            return Err(CredentialsError::EmptyPostalCode);
        }
        if house_number.is_empty() {
            return Err(CredentialsError::EmptyHouseNumber);
        }

        Ok(Self {
            postal_code,
            house_number: house_number.to_owned(),
        })
    }

    /// Normalized postal code.
    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Trimmed house number, including additions such as “A”.
    #[must_use]
    pub fn house_number(&self) -> &str {
        &self.house_number
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {}", self.postal_code, self.house_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Opaque building identifier from the Dutch BAG registry, resolved once per
/// address and reused for every schedule fetch.
pub struct BagId(pub String);

impl fmt::Display for BagId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Waste categories collected by HVC Groep.
pub enum GarbageType {
    /// Fruit, vegetable, and garden waste (green bin).
    Gft,
    /// Plastic and packaging.
    Plastic,
    /// Paper and cardboard (blue bin).
    Papier,
    /// Residual waste (gray bin).
    Restafval,
    /// Street cleaning rounds.
    Reiniging,
}

impl GarbageType {
    /// All known categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Gft,
        Self::Plastic,
        Self::Papier,
        Self::Restafval,
        Self::Reiniging,
    ];

    /// Map a waste stream id from the HVC API onto a category. Ids outside
    /// the catalog yield `None` and are skipped during normalization.
    #[must_use]
    pub fn from_stream_id(id: i64) -> Option<Self> {
        match id {
            5 => Some(Self::Gft),
            6 => Some(Self::Plastic),
            3 => Some(Self::Papier),
            2 => Some(Self::Restafval),
            59 => Some(Self::Reiniging),
            _ => None,
        }
    }

    /// Waste stream id used by the HVC API for this category.
    #[must_use]
    pub fn stream_id(self) -> i64 {
        match self {
            Self::Gft => 5,
            Self::Plastic => 6,
            Self::Papier => 3,
            Self::Restafval => 2,
            Self::Reiniging => 59,
        }
    }

    /// Stable lowercase key, also used as the sensor identifier.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Gft => "gft",
            Self::Plastic => "plastic",
            Self::Papier => "papier",
            Self::Restafval => "restafval",
            Self::Reiniging => "reiniging",
        }
    }

    /// Material Design icon name for the category.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Gft => "mdi:food-apple-outline",
            Self::Plastic => "mdi:recycle",
            Self::Papier => "mdi:file",
            Self::Restafval => "mdi:delete-empty",
            Self::Reiniging => "mdi:liquid-spot",
        }
    }
}

impl fmt::Display for GarbageType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Raw waste stream entry as returned by a provider, before normalization.
pub struct WasteStream {
    /// Provider-side stream id.
    pub id: i64,
    /// Provider label for the stream, e.g. `"GFT"`.
    pub title: String,
    /// Next collection date as a `YYYY-MM-DD` string, `None` when the
    /// provider has nothing scheduled.
    pub pickup_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Upcoming pickup for one category.
pub struct PickupInfo {
    /// Date of the next pickup.
    pub pickup_date: NaiveDate,
    /// Whole days between the normalization date and the pickup. Display code
    /// recomputes this against the render-time date instead of trusting it.
    pub days_until: i64,
    /// Provider title for the stream.
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Normalized snapshot of one fetch. Replaced wholesale on every successful
/// refresh; a category absent from `garbage` means no upcoming pickup is
/// known, not a pickup in zero days.
pub struct WasteSchedule {
    /// Next pickup per category.
    pub garbage: BTreeMap<GarbageType, PickupInfo>,
    /// Categories collected on the normalization date.
    pub pickup_today: Vec<GarbageType>,
    /// Categories collected the day after the normalization date.
    pub pickup_tomorrow: Vec<GarbageType>,
}

impl WasteSchedule {
    /// Normalize raw waste streams into a schedule snapshot. `today` is taken
    /// once by the caller so every derived field agrees on the same date.
    ///
    /// Per-item problems are skipped and logged, never fatal: a missing
    /// pickup date, a stream id outside the catalog, or a date string that is
    /// not `YYYY-MM-DD`.
    #[must_use]
    pub fn build(streams: &[WasteStream], today: NaiveDate) -> Self {
        let tomorrow = today + Days::new(1);
        let mut schedule = Self::default();

        for stream in streams {
            let Some(date_text) = stream.pickup_date.as_deref() else {
                debug!(id = stream.id, title = %stream.title, "stream has no scheduled pickup");
                continue;
            };

            let Some(garbage_type) = GarbageType::from_stream_id(stream.id) else {
                debug!(id = stream.id, title = %stream.title, "unknown waste stream id");
                continue;
            };

            let pickup_date = match NaiveDate::parse_from_str(date_text, "%Y-%m-%d") {
                Ok(date) => date,
                Err(err) => {
                    warn!(id = stream.id, date = date_text, %err, "invalid pickup date");
                    continue;
                }
            };

            let days_until = pickup_date.signed_duration_since(today).num_days();
            debug!(%garbage_type, %pickup_date, days_until, "scheduled pickup");

            schedule.garbage.insert(
                garbage_type,
                PickupInfo {
                    pickup_date,
                    days_until,
                    title: stream.title.clone(),
                },
            );
        }

        // Membership derives from the committed map, so a duplicate stream id
        // cannot leave the sets inconsistent with its last-wins entry. Map
        // iteration keeps them in display order.
        for (garbage_type, info) in &schedule.garbage {
            if info.pickup_date == today {
                schedule.pickup_today.push(*garbage_type);
            } else if info.pickup_date == tomorrow {
                schedule.pickup_tomorrow.push(*garbage_type);
            }
        }

        schedule
    }

    /// Next known pickup for a category, if the last fetch contained one.
    #[must_use]
    pub fn next_pickup(&self, garbage_type: GarbageType) -> Option<&PickupInfo> {
        self.garbage.get(&garbage_type)
    }

    /// True when the last fetch yielded no usable pickup data at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.garbage.is_empty()
    }
}
