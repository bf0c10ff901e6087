use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use serde::Serialize;
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::fs::File;

use crate::constants::{
    DEFAULT_GEOCODER_URL, DEFAULT_HISTORY_FILE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub history_file: String,
    pub geocoder_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub open_map_after_lookup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_file: DEFAULT_HISTORY_FILE.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            open_map_after_lookup: false,
        }
    }
}

impl Settings {
    /// Reads `key = value` lines; a missing file gives the defaults.
    /// Unknown keys and unparsable values are ignored.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut settings = Settings::default();
        if !config_path.exists() {
            return Ok(settings);
        }

        let file = File::open(config_path).context("Failed to open config file")?;
        let reader = BufReader::new(file);
        let mut config_map = HashMap::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from config")?;
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(
                    key.trim().to_string(),
                    value.trim().trim_matches('"').to_string(),
                );
            }
        }

        if let Some(history_file) = config_map.get("history_file") {
            if !history_file.is_empty() {
                settings.history_file = history_file.clone();
            }
        }
        if let Some(url) = config_map.get("geocoder_url") {
            if !url.is_empty() {
                settings.geocoder_url = url.clone();
            }
        }
        if let Some(user_agent) = config_map.get("user_agent") {
            if !user_agent.is_empty() {
                settings.user_agent = user_agent.clone();
            }
        }
        if let Some(timeout_str) = config_map.get("timeout_secs") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                settings.timeout_secs = timeout;
            }
        }
        if let Some(open_str) = config_map.get("open_map_after_lookup") {
            if let Ok(open) = open_str.parse::<bool>() {
                settings.open_map_after_lookup = open;
            }
        }

        Ok(settings)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).context("Creating config directory")?;
            }
        }

        let mut content = String::new();
        content.push_str("# Image Location Finder configuration\n");
        content.push_str(&format!("history_file = \"{}\"\n", self.history_file));
        content.push_str(&format!("geocoder_url = \"{}\"\n", self.geocoder_url));
        content.push_str(&format!("user_agent = \"{}\"\n", self.user_agent));
        content.push_str(&format!("timeout_secs = {}\n", self.timeout_secs));
        content.push_str(&format!("open_map_after_lookup = {}\n", self.open_map_after_lookup));

        std::fs::write(config_path, content).context("Failed to write to config file")?;
        Ok(())
    }

    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.history_file)
    }

    pub fn config_path() -> PathBuf {
        crate::utils::get_config_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.ini")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.history_file, "history.json");
        assert_eq!(settings.timeout_secs, 15);
    }

    #[test]
    fn test_parses_keys_and_ignores_junk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(
            &path,
            "# comment\n\
             history_file = \"/var/lib/ilf/history.json\"\n\
             timeout_secs = soon\n\
             open_map_after_lookup = true\n\
             colour = blue\n\
             this line has no equals sign\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.history_file, "/var/lib/ilf/history.json");
        assert_eq!(settings.timeout_secs, 15);
        assert!(settings.open_map_after_lookup);
        assert_eq!(settings.geocoder_url, DEFAULT_GEOCODER_URL);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub/config.ini");
        let settings = Settings {
            history_file: "h.json".to_string(),
            geocoder_url: "http://127.0.0.1:9/reverse".to_string(),
            user_agent: "tester/0.1".to_string(),
            timeout_secs: 3,
            open_map_after_lookup: true,
        };

        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }
}
