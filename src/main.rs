use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use image_location_finder::history::HistoryEntry;
use image_location_finder::report::{self, HistoryRow, EMPTY_HISTORY_TEXT};
use image_location_finder::{launcher, locate_image, HistoryStore, ReverseGeocoder, Settings};

/// Find where a photo was taken from its EXIF GPS data
#[derive(Parser)]
#[command(name = "image-location-finder", version, about)]
struct Cli {
    /// Config file (defaults to the per-user application data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// History file, overrides the config
    #[arg(long, global = true)]
    history: Option<PathBuf>,
    /// Log debug details to stderr
    #[arg(short, long, global = true, action)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up images and record the results
    #[command(visible_alias = "upload")]
    Locate {
        /// Image files (.jpg, .jpeg, .png, .webp)
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Open each found location in the map service
        #[arg(long, action)]
        open: bool,
    },
    /// List past lookups, newest first
    History {
        /// Print the stored JSON instead of the listing
        #[arg(long, action)]
        json: bool,
    },
    /// Open a history entry's location in the map service
    OpenMap {
        /// Entry number as shown by `history`
        number: usize,
    },
    /// Open a history entry's image with the system viewer
    OpenImage {
        /// Entry number as shown by `history`
        number: usize,
    },
    /// Show or write the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Write the effective settings to the config file
    Init,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_locate(
    images: &[PathBuf],
    open: bool,
    settings: &Settings,
    store: &HistoryStore,
) -> Result<()> {
    let geocoder = ReverseGeocoder::new(settings)?;
    let mut failed = 0usize;

    for image in images {
        match locate_image(image, &geocoder, store).await {
            Ok(outcome) => {
                print_lookup(&outcome.entry);
                if open {
                    if let Some(coord) = outcome.entry.coordinate() {
                        if let Err(e) = launcher::open_in_maps(coord) {
                            warn!(error = %e, "could not open the map");
                        }
                    }
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("❌ {:#}", e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} images could not be processed", failed, images.len());
    }
    Ok(())
}

fn print_lookup(entry: &HistoryEntry) {
    match entry {
        HistoryEntry::Success(e) => println!("✅ Saved: {}", e.name),
        HistoryEntry::Failure(e) => println!("⚠️  Saved (no GPS): {}", e.name),
    }
    for line in report::details_text(entry).lines() {
        println!("   {}", line);
    }
}

fn run_history(store: &HistoryStore, json: bool) -> Result<()> {
    let entries = store.load();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", EMPTY_HISTORY_TEXT);
        return Ok(());
    }
    for row in report::rows(&entries) {
        println!("{}", row);
    }
    Ok(())
}

fn row_at(store: &HistoryStore, number: usize) -> Result<HistoryRow> {
    let entries = store.load();
    let entry = number
        .checked_sub(1)
        .and_then(|i| entries.get(i))
        .with_context(|| format!("No history entry #{} ({} saved)", number, entries.len()))?;
    Ok(HistoryRow::new(number, entry))
}

fn run_open_map(store: &HistoryStore, number: usize) -> Result<()> {
    let row = row_at(store, number)?;
    let url = row
        .map_url
        .with_context(|| format!("Entry #{} ({}) has no GPS position", number, row.name))?;
    launcher::open_target(&url).context("Failed to open the browser")?;
    println!("🗺️  Opened {}", url);
    Ok(())
}

fn run_open_image(store: &HistoryStore, number: usize) -> Result<()> {
    let row = row_at(store, number)?;
    launcher::open_file(Path::new(&row.path)).context("Failed to open the image")?;
    Ok(())
}

fn run_config(action: ConfigAction, settings: &Settings, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("# {}", config_path.display());
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        ConfigAction::Init => {
            settings.save_to(config_path)?;
            println!("✅ Configuration written to {}", config_path.display());
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let mut settings = Settings::load_from(&config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;
    if let Some(ref history) = cli.history {
        settings.history_file = history.to_string_lossy().to_string();
    }

    // Constructed once and passed to every command that touches the file
    let store = HistoryStore::new(settings.history_path());

    match cli.command {
        Command::Locate { images, open } => {
            let open = open || settings.open_map_after_lookup;
            run_locate(&images, open, &settings, &store).await
        }
        Command::History { json } => run_history(&store, json),
        Command::OpenMap { number } => run_open_map(&store, number),
        Command::OpenImage { number } => run_open_image(&store, number),
        Command::Config { action } => run_config(action, &settings, &config_path),
    }
}
