use std::env;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::coordinate::Coordinate;

/// Hands a URL or file path to the platform's default opener without waiting for it
pub fn open_target(target: &str) -> Result<(), io::Error> {
    let os = env::consts::OS;
    debug!(%target, os, "launching opener");
    match os {
        "macos" => {
            Command::new("open").arg(target).spawn()?;
        }
        "windows" => {
            // The empty string is the window title `start` expects before a quoted target
            Command::new("cmd").args(["/C", "start", "", target]).spawn()?;
        }
        "linux" | "freebsd" | "openbsd" | "netbsd" => {
            Command::new("xdg-open").arg(target).spawn()?;
        }
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("Unsupported OS: {}", os),
            ));
        }
    }
    Ok(())
}

/// Opens the map service at the given coordinate in the default browser
pub fn open_in_maps(coord: Coordinate) -> Result<(), io::Error> {
    open_target(&coord.maps_url())
}

/// Opens an image with the system viewer
pub fn open_file(path: &Path) -> Result<(), io::Error> {
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} no longer exists", path.display()),
        ));
    }
    open_target(&path.to_string_lossy())
}
