//! Core types, update coordination, and rendering for the kliko waste schedule reader.

/// Fetch-and-cache coordinator owning one address worth of schedule state.
pub mod coordinator;
/// Fixed per-language tables for dates and waste category names.
pub mod locale;
/// Domain models: credentials, waste categories, and normalized schedules.
pub mod model;
/// Traits describing the schedule provider interface.
pub mod ports;
/// Locale-aware projection of schedules into sensor display strings.
pub mod render;

pub use coordinator::*;
pub use locale::*;
pub use model::*;
pub use ports::*;
pub use render::*;
