//! Small fixed translation tables, replacing any system locale database.

use chrono::Weekday;

use crate::model::GarbageType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Languages with built-in translation tables.
pub enum Language {
    /// Dutch, the provider's home locale and the fallback.
    #[default]
    Nl,
    /// English.
    En,
    /// German.
    De,
    /// French.
    Fr,
}

/// One language worth of display strings.
struct Table {
    weekdays: [&'static str; 7],
    weekdays_short: [&'static str; 7],
    months: [&'static str; 12],
    months_short: [&'static str; 12],
    today: &'static str,
    tomorrow: &'static str,
    none: &'static str,
    conjunction: &'static str,
    gft: &'static str,
    plastic: &'static str,
    papier: &'static str,
    restafval: &'static str,
    reiniging: &'static str,
}

static NL: Table = Table {
    weekdays: [
        "maandag",
        "dinsdag",
        "woensdag",
        "donderdag",
        "vrijdag",
        "zaterdag",
        "zondag",
    ],
    weekdays_short: ["ma", "di", "wo", "do", "vr", "za", "zo"],
    months: [
        "januari",
        "februari",
        "maart",
        "april",
        "mei",
        "juni",
        "juli",
        "augustus",
        "september",
        "oktober",
        "november",
        "december",
    ],
    months_short: [
        "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
    ],
    today: "Vandaag",
    tomorrow: "Morgen",
    none: "Geen",
    conjunction: "en",
    gft: "Groene bak GFT",
    plastic: "Plastic en verpakking",
    papier: "Blauwe bak papier",
    restafval: "Grijze bak restafval",
    reiniging: "Reiniging",
};

static EN: Table = Table {
    weekdays: [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ],
    weekdays_short: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    today: "Today",
    tomorrow: "Tomorrow",
    none: "None",
    conjunction: "and",
    gft: "Organic waste",
    plastic: "Plastic and packaging",
    papier: "Paper and cardboard",
    restafval: "Residual waste",
    reiniging: "Street cleaning",
};

static DE: Table = Table {
    weekdays: [
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
        "Sonntag",
    ],
    weekdays_short: ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"],
    months: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    months_short: [
        "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ],
    today: "Heute",
    tomorrow: "Morgen",
    none: "Keine",
    conjunction: "und",
    gft: "Biotonne",
    plastic: "Plastik und Verpackung",
    papier: "Papiertonne",
    restafval: "Restmüll",
    reiniging: "Straßenreinigung",
};

static FR: Table = Table {
    weekdays: [
        "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
    ],
    weekdays_short: ["lun", "mar", "mer", "jeu", "ven", "sam", "dim"],
    months: [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    months_short: [
        "janv", "févr", "mars", "avr", "mai", "juin", "juil", "août", "sept", "oct", "nov", "déc",
    ],
    today: "Aujourd'hui",
    tomorrow: "Demain",
    none: "Aucun",
    conjunction: "et",
    gft: "Déchets organiques",
    plastic: "Plastique et emballages",
    papier: "Papier et carton",
    restafval: "Déchets résiduels",
    reiniging: "Nettoyage des rues",
};

/// Lookup that stays total for the lint-checked path; indexes derived from
/// valid weekdays and months are always in range.
fn nth<const N: usize>(table: &'static [&'static str; N], index: usize) -> &'static str {
    table.get(index).copied().unwrap_or("")
}

impl Language {
    /// Match the primary subtag of a BCP 47 style language tag. Unsupported
    /// tags fall back to Dutch rather than failing.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        match primary.to_ascii_lowercase().as_str() {
            "en" => Self::En,
            "de" => Self::De,
            "fr" => Self::Fr,
            _ => Self::Nl,
        }
    }

    fn table(self) -> &'static Table {
        match self {
            Self::Nl => &NL,
            Self::En => &EN,
            Self::De => &DE,
            Self::Fr => &FR,
        }
    }

    /// Full weekday name, e.g. `"woensdag"`.
    #[must_use]
    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        nth(&self.table().weekdays, weekday.num_days_from_monday() as usize)
    }

    /// Abbreviated weekday name, e.g. `"wo"`.
    #[must_use]
    pub fn weekday_abbrev(self, weekday: Weekday) -> &'static str {
        nth(
            &self.table().weekdays_short,
            weekday.num_days_from_monday() as usize,
        )
    }

    /// Full month name for a one-based month number.
    #[must_use]
    pub fn month_name(self, month: u32) -> &'static str {
        nth(&self.table().months, month.saturating_sub(1) as usize)
    }

    /// Abbreviated month name for a one-based month number.
    #[must_use]
    pub fn month_abbrev(self, month: u32) -> &'static str {
        nth(&self.table().months_short, month.saturating_sub(1) as usize)
    }

    /// Word used when a pickup happens today.
    #[must_use]
    pub fn today_word(self) -> &'static str {
        self.table().today
    }

    /// Word used when a pickup happens tomorrow.
    #[must_use]
    pub fn tomorrow_word(self) -> &'static str {
        self.table().tomorrow
    }

    /// Placeholder for an empty aggregate, e.g. `"Geen"`.
    #[must_use]
    pub fn none_word(self) -> &'static str {
        self.table().none
    }

    /// Conjunction joining the last two items of a list.
    #[must_use]
    pub fn conjunction(self) -> &'static str {
        self.table().conjunction
    }

    /// Localized display name for a waste category.
    #[must_use]
    pub fn garbage_name(self, garbage_type: GarbageType) -> &'static str {
        let table = self.table();
        match garbage_type {
            GarbageType::Gft => table.gft,
            GarbageType::Plastic => table.plastic,
            GarbageType::Papier => table.papier,
            GarbageType::Restafval => table.restafval,
            GarbageType::Reiniging => table.reiniging,
        }
    }
}
