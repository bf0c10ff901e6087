use std::fmt;

use crate::history::HistoryEntry;

pub const EMPTY_HISTORY_TEXT: &str = "No saved items yet. Look up an image to get started.";

/// One history entry prepared for the terminal.
///
/// The map URL is computed from this row's own coordinate when the row is
/// built, so opening it never depends on which row was rendered last.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub number: usize,
    pub name: String,
    pub path: String,
    pub recorded: Option<String>,
    pub details: String,
    pub map_url: Option<String>,
}

impl HistoryRow {
    /// `number` is the 1-based position shown to the user
    pub fn new(number: usize, entry: &HistoryEntry) -> Self {
        HistoryRow {
            number,
            name: entry.name().to_string(),
            path: entry.path().to_string(),
            recorded: entry
                .recorded_at()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            details: details_text(entry),
            map_url: entry.coordinate().map(|c| c.maps_url()),
        }
    }
}

/// Address plus rounded coordinate, or the stored reason
pub fn details_text(entry: &HistoryEntry) -> String {
    match entry {
        HistoryEntry::Success(e) => format!("{}\nLat: {:.6}   Lon: {:.6}", e.address, e.lat, e.lon),
        HistoryEntry::Failure(e) => e.reason.clone(),
    }
}

pub fn rows(entries: &[HistoryEntry]) -> Vec<HistoryRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| HistoryRow::new(i + 1, entry))
        .collect()
}

impl fmt::Display for HistoryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.number, self.name)?;
        if let Some(ref recorded) = self.recorded {
            write!(f, "  ({})", recorded)?;
        }
        writeln!(f)?;
        writeln!(f, "    {}", self.path)?;
        for line in self.details.lines() {
            writeln!(f, "    {}", line)?;
        }
        if let Some(ref url) = self.map_url {
            writeln!(f, "    🗺️  {}", url)?;
        }
        Ok(())
    }
}
