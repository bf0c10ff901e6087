// Reverse geocoding service
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";
pub const DEFAULT_USER_AGENT: &str = "ImageLocationFinder/1.0 (desktop app)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

// Address used whenever the geocoder gives us nothing usable
pub const UNKNOWN_ADDRESS: &str = "Unknown address";

// Persisted state
pub const DEFAULT_HISTORY_FILE: &str = "history.json";
pub const CONFIG_FILE_NAME: &str = "image_location_finder.ini";
pub const APP_DIR_NAME: &str = "ImageLocationFinder";

// Map service, coordinates are appended as "<lat>,<lon>"
pub const MAPS_URL_PREFIX: &str = "https://www.google.com/maps?q=";

// Only these extensions are accepted for lookups (compared lowercase)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub const NO_GPS_REASON_TEXT: &str = "No GPS data found because:\n\
1) The sender stripped location data before sending, OR\n\
2) The camera\u{2019}s location setting was OFF when the photo was taken.";
