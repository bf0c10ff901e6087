use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::MAPS_URL_PREFIX;

/// Signed decimal latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
        if lat_ok && lon_ok {
            Some(Coordinate { lat, lon })
        } else {
            None
        }
    }

    /// Link to the map service centered on this coordinate
    pub fn maps_url(&self) -> String {
        format!("{}{},{}", MAPS_URL_PREFIX, self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lat: {:.6}   Lon: {:.6}", self.lat, self.lon)
    }
}

/// Hemisphere reference stored next to each GPS DMS triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parses the first non-blank character of an EXIF reference value.
    pub fn from_ref(value: &str) -> Option<Self> {
        match value.trim().chars().next()?.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }
}

/// `degrees + minutes/60 + seconds/3600`
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + (minutes / 60.0) + (seconds / 3600.0)
}

/// Converts a DMS triple and applies the hemisphere sign.
/// A missing reference leaves the value positive.
pub fn signed_decimal(dms: [f64; 3], hemisphere: Option<Hemisphere>) -> f64 {
    let decimal = dms_to_decimal(dms[0], dms[1], dms[2]);
    match hemisphere {
        Some(h) => h.sign() * decimal,
        None => decimal,
    }
}
