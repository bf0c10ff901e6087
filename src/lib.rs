//! Finds where a photo was taken: reads the EXIF GPS block, reverse-geocodes
//! it and keeps a newest-first JSON history of every lookup.

pub mod constants;
pub mod coordinate;
pub mod exif_parser;
pub mod geocoding;
pub mod history;
pub mod launcher;
pub mod processing;
pub mod report;
pub mod settings;
pub mod utils;

pub use coordinate::Coordinate;
pub use exif_parser::{extract_gps, Absence, GpsLookup};
pub use geocoding::{GeocodeError, ReverseGeocoder};
pub use history::{HistoryEntry, HistoryError, HistoryStore};
pub use processing::{locate_image, LookupOutcome};
pub use settings::Settings;
