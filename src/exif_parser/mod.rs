pub mod generic;

use exif::{Exif, Tag};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::coordinate::Coordinate;

pub use generic::get_gps_coord;

/// Outcome of reading GPS data from an image.
///
/// Callers that only care whether a location exists use [`GpsLookup::coordinate`];
/// the [`Absence`] reason is kept for logs and tests.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsLookup {
    Found(Coordinate),
    Absent(Absence),
}

/// Why an image produced no coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Absence {
    /// The container has no EXIF block at all
    NoMetadata,
    /// EXIF is present but the GPS fields are missing or unusable
    NoGps,
    /// The file could not be opened or parsed
    Unreadable(String),
}

impl GpsLookup {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            GpsLookup::Found(coord) => Some(*coord),
            GpsLookup::Absent(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, GpsLookup::Found(_))
    }
}

impl fmt::Display for Absence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Absence::NoMetadata => write!(f, "no EXIF metadata"),
            Absence::NoGps => write!(f, "no usable GPS block"),
            Absence::Unreadable(reason) => write!(f, "unreadable image: {}", reason),
        }
    }
}

/// Reads the image's metadata container and extracts its GPS position.
/// Never fails: every problem becomes [`GpsLookup::Absent`].
pub fn extract_gps(path: &Path) -> GpsLookup {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => return absent(path, Absence::Unreadable(e.to_string())),
    };

    let mut buf_reader = BufReader::new(file);
    let mut exif_reader = exif::Reader::new();
    exif_reader.continue_on_error(true); // Tolerate non-standard EXIF structures

    let exif = match exif_reader.read_from_container(&mut buf_reader) {
        Ok(exif) => exif,
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            debug!(path = %path.display(), errors = errors.len(), "using partially parsed EXIF");
            exif
        }
        Err(exif::Error::NotFound(_)) => return absent(path, Absence::NoMetadata),
        Err(e) => return absent(path, Absence::Unreadable(e.to_string())),
    };

    match gps_from_exif(&exif) {
        GpsLookup::Absent(reason) => absent(path, reason),
        found => found,
    }
}

/// Builds the coordinate from an already parsed EXIF block
pub fn gps_from_exif(exif: &Exif) -> GpsLookup {
    let lat = get_gps_coord(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef);
    let lon = get_gps_coord(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef);

    match (lat, lon) {
        (Some(lat), Some(lon)) => match Coordinate::new(lat, lon) {
            Some(coord) => GpsLookup::Found(coord),
            None => GpsLookup::Absent(Absence::NoGps),
        },
        _ => GpsLookup::Absent(Absence::NoGps),
    }
}

fn absent(path: &Path, reason: Absence) -> GpsLookup {
    debug!(path = %path.display(), %reason, "no GPS position");
    GpsLookup::Absent(reason)
}
