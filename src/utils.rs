use std::path::{Path, PathBuf};

use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, SUPPORTED_EXTENSIONS};

/// Returns the cross-platform directory for application data
pub fn get_app_data_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        let home_dir = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let mut path = PathBuf::from(home_dir);
        path.push("Library");
        path.push("Application Support");
        path.push(APP_DIR_NAME);
        path
    } else if cfg!(target_os = "windows") {
        // Use %APPDATA% on Windows
        if let Ok(appdata) = std::env::var("APPDATA") {
            let mut path = PathBuf::from(appdata);
            path.push(APP_DIR_NAME);
            path
        } else {
            PathBuf::from(".").join(APP_DIR_NAME)
        }
    } else if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        let mut path = PathBuf::from(xdg_data_home);
        path.push(APP_DIR_NAME);
        path
    } else {
        // Fallback to ~/.local/share
        let home_dir = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let mut path = PathBuf::from(home_dir);
        path.push(".local");
        path.push("share");
        path.push(APP_DIR_NAME);
        path
    }
}

/// Returns the path to the application configuration file
pub fn get_config_path() -> PathBuf {
    let mut config_dir = get_app_data_dir();
    config_dir.push(CONFIG_FILE_NAME);
    config_dir
}

/// True for the image types accepted for lookups (case-insensitive extension)
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
