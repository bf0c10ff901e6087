use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::exif_parser::{extract_gps, GpsLookup};
use crate::geocoding::ReverseGeocoder;
use crate::history::{HistoryEntry, HistoryStore};
use crate::utils::is_supported_image;

/// What a single image lookup produced
#[derive(Debug, Clone)]
pub struct LookupOutcome {
    pub gps: GpsLookup,
    pub entry: HistoryEntry,
}

/// Runs one lookup: extract GPS, resolve the address if found, record the result.
///
/// Only an unsupported extension or a failed history write is an error;
/// missing GPS and geocoding failures end up in the recorded entry.
pub async fn locate_image(
    path: &Path,
    geocoder: &ReverseGeocoder,
    store: &HistoryStore,
) -> Result<LookupOutcome> {
    if !is_supported_image(path) {
        anyhow::bail!("{} is not a supported image (jpg, jpeg, png, webp)", path.display());
    }

    if !path.exists() {
        warn!(path = %path.display(), "image does not exist, recording it without GPS");
    }

    let stored_path = absolute_path(path);
    let gps = extract_gps(path);

    let entry = match gps.coordinate() {
        Some(coord) => {
            let address = geocoder.address_for(coord).await;
            HistoryEntry::located(&stored_path, coord, address)
        }
        None => HistoryEntry::unlocated(&stored_path),
    };

    store
        .append(entry.clone())
        .with_context(|| format!("Failed to record lookup for {}", path.display()))?;

    info!(path = %stored_path.display(), found = gps.is_found(), "lookup recorded");
    Ok(LookupOutcome { gps, entry })
}

// History rows should stay openable from any working directory
fn absolute_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
