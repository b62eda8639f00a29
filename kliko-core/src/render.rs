//! Stateless projections turning schedule snapshots into display strings.
//!
//! Everything here is pure over `(schedule, render-time date, config)`. The
//! days-until used for today/tomorrow wording and the aggregate membership
//! are recomputed from the stored pickup dates at render time; the snapshot
//! may be hours old relative to a midnight boundary and its stored values
//! would mislabel the day.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::locale::Language;
use crate::model::{GarbageType, WasteSchedule};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-field date format patterns for the three display situations.
pub struct DateFormats {
    /// Pattern for pickups further out than tomorrow.
    pub default: String,
    /// Pattern when the pickup is today.
    pub today: String,
    /// Pattern when the pickup is tomorrow.
    pub tomorrow: String,
}

impl DateFormats {
    /// Default patterns with the today/tomorrow words of the given language,
    /// e.g. `"Vandaag %d-%m-%Y"` for Dutch.
    #[must_use]
    pub fn localized(language: Language) -> Self {
        Self {
            default: String::from("%d-%m-%Y"),
            today: format!("{} %d-%m-%Y", language.today_word()),
            tomorrow: format!("{} %d-%m-%Y", language.tomorrow_word()),
        }
    }
}

impl Default for DateFormats {
    fn default() -> Self {
        Self::localized(Language::Nl)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Rendering inputs shared by every sensor.
pub struct RenderConfig {
    /// Active display language.
    pub language: Language,
    /// Date patterns, either [`DateFormats::localized`] or caller overrides.
    pub formats: DateFormats,
}

impl RenderConfig {
    /// Config with the localized default patterns for `language`.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            language,
            formats: DateFormats::localized(language),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(Language::Nl)
    }
}

fn push_two_digits(out: &mut String, value: i64) {
    if (0..10).contains(&value) {
        out.push('0');
    }
    out.push_str(&value.to_string());
}

/// Expand a strftime-like pattern against the language tables.
///
/// Supported tokens: `%d`/`%e` day (padded/unpadded), `%m` month, `%Y`/`%y`
/// year, `%A`/`%a` weekday name, `%B`/`%b` month name, `%%` literal percent.
/// Unknown tokens pass through unchanged.
#[must_use]
pub fn format_date(pattern: &str, date: NaiveDate, language: Language) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('d') => push_two_digits(&mut out, i64::from(date.day())),
            Some('e') => out.push_str(&date.day().to_string()),
            Some('m') => push_two_digits(&mut out, i64::from(date.month())),
            Some('Y') => out.push_str(&date.year().to_string()),
            Some('y') => push_two_digits(&mut out, i64::from(date.year()).rem_euclid(100)),
            Some('A') => out.push_str(language.weekday_name(date.weekday())),
            Some('a') => out.push_str(language.weekday_abbrev(date.weekday())),
            Some('B') => out.push_str(language.month_name(date.month())),
            Some('b') => out.push_str(language.month_abbrev(date.month())),
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }

    out
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Extra attributes exposed alongside a sensor state.
pub struct SensorAttributes {
    /// Localized today/tomorrow word when the pickup is that close.
    pub day: Option<&'static str>,
    /// Whole days until the next pickup, `None` when unknown.
    pub days_until: Option<i64>,
    /// Material Design icon for category sensors.
    pub icon: Option<&'static str>,
    /// Categories contained in an aggregate sensor.
    pub garbage_types: Vec<GarbageType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Read-only view over a schedule snapshot, one per display entity.
pub enum Sensor {
    /// Next pickup date for a single waste category.
    Garbage(GarbageType),
    /// Categories collected today.
    PickupToday,
    /// Categories collected tomorrow.
    PickupTomorrow,
}

impl Sensor {
    /// Every sensor the schedule exposes, category sensors first.
    pub const ALL: [Self; 7] = [
        Self::Garbage(GarbageType::Gft),
        Self::Garbage(GarbageType::Plastic),
        Self::Garbage(GarbageType::Papier),
        Self::Garbage(GarbageType::Restafval),
        Self::Garbage(GarbageType::Reiniging),
        Self::PickupToday,
        Self::PickupTomorrow,
    ];

    /// Stable identifier for the sensor.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Garbage(garbage_type) => garbage_type.key(),
            Self::PickupToday => "pickup_today",
            Self::PickupTomorrow => "pickup_tomorrow",
        }
    }

    /// Render the display state. `today` is the calendar date at render time.
    ///
    /// Category sensors return `None` while the category has no known
    /// pickup; aggregates always render, using the localized "none"
    /// placeholder when empty.
    #[must_use]
    pub fn state(
        self,
        schedule: &WasteSchedule,
        today: NaiveDate,
        config: &RenderConfig,
    ) -> Option<String> {
        match self {
            Self::Garbage(garbage_type) => {
                let info = schedule.next_pickup(garbage_type)?;
                let days_until = info.pickup_date.signed_duration_since(today).num_days();
                let pattern = match days_until {
                    0 => &config.formats.today,
                    1 => &config.formats.tomorrow,
                    _ => &config.formats.default,
                };
                Some(format_date(pattern, info.pickup_date, config.language))
            }
            Self::PickupToday => Some(join_localized(
                &collected_on(schedule, today),
                config.language,
            )),
            Self::PickupTomorrow => Some(join_localized(
                &collected_on(schedule, today + Days::new(1)),
                config.language,
            )),
        }
    }

    /// Extra attributes matching [`state`](Self::state), recomputed against
    /// the same render-time date.
    #[must_use]
    pub fn attributes(
        self,
        schedule: &WasteSchedule,
        today: NaiveDate,
        config: &RenderConfig,
    ) -> SensorAttributes {
        match self {
            Self::Garbage(garbage_type) => {
                let mut attributes = SensorAttributes {
                    icon: Some(garbage_type.icon()),
                    ..SensorAttributes::default()
                };
                if let Some(info) = schedule.next_pickup(garbage_type) {
                    let days_until = info.pickup_date.signed_duration_since(today).num_days();
                    attributes.days_until = Some(days_until);
                    attributes.day = match days_until {
                        0 => Some(config.language.today_word()),
                        1 => Some(config.language.tomorrow_word()),
                        _ => None,
                    };
                }
                attributes
            }
            Self::PickupToday => SensorAttributes {
                garbage_types: collected_on(schedule, today),
                ..SensorAttributes::default()
            },
            Self::PickupTomorrow => SensorAttributes {
                garbage_types: collected_on(schedule, today + Days::new(1)),
                ..SensorAttributes::default()
            },
        }
    }
}

/// Categories whose stored pickup date equals `date`, in display order.
fn collected_on(schedule: &WasteSchedule, date: NaiveDate) -> Vec<GarbageType> {
    schedule
        .garbage
        .iter()
        .filter(|(_, info)| info.pickup_date == date)
        .map(|(garbage_type, _)| *garbage_type)
        .collect()
}

/// Join localized category names with commas and the language conjunction,
/// e.g. `"Groene bak GFT, Blauwe bak papier en Reiniging"`.
fn join_localized(types: &[GarbageType], language: Language) -> String {
    match types.split_last() {
        None => language.none_word().to_owned(),
        Some((only, rest)) if rest.is_empty() => language.garbage_name(*only).to_owned(),
        Some((last, rest)) => {
            let head: Vec<&str> = rest
                .iter()
                .map(|garbage_type| language.garbage_name(*garbage_type))
                .collect();
            format!(
                "{} {} {}",
                head.join(", "),
                language.conjunction(),
                language.garbage_name(*last)
            )
        }
    }
}
