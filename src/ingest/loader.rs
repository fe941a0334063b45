// src/ingest/loader.rs
//
// File loading policy (mirrors what the dashboard expects): the Daft
// export is required and its absence is fatal; the MyHome export and
// both scrape-timestamp files are optional and degrade silently.

use super::models::{NormalizedListing, Source};
use super::normalize::parse_source;
use crate::errors::LoadError;
use chrono::{DateTime, NaiveDateTime};
use std::fs;
use std::path::Path;

const DAFT_CSV: &str = "daft_listings.csv";
const MYHOME_CSV: &str = "myhome_listings.csv";
const DAFT_TIMESTAMP: &str = "daft_scrape_timestamp.txt";
const MYHOME_TIMESTAMP: &str = "myhome_scrape_timestamp.txt";

/// Raw "last refreshed" stamps written by the scrapers, one per source.
#[derive(Debug, Clone, Default)]
pub struct ScrapeTimestamps {
    pub daft: Option<String>,
    pub myhome: Option<String>,
}

impl ScrapeTimestamps {
    pub fn for_source(&self, source: Source) -> Option<&str> {
        match source {
            Source::Daft => self.daft.as_deref(),
            Source::MyHome => self.myhome.as_deref(),
        }
    }

    /// Human form, e.g. "05 Mar 2026 14:30". The scrapers write
    /// `datetime.now().isoformat()` so the stamp usually has no zone;
    /// anything unparseable is shown verbatim.
    pub fn display(&self, source: Source) -> Option<String> {
        self.for_source(source).map(format_timestamp)
    }
}

fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d %b %Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d %b %Y %H:%M").to_string();
    }
    raw.to_string()
}

/// Everything loaded off disk, normalized and ready for a snapshot build.
#[derive(Debug)]
pub struct MarketData {
    pub listings: Vec<NormalizedListing>,
    pub timestamps: ScrapeTimestamps,
}

fn read_timestamp(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Loads both exports from `dir`. Daft is the primary source; a missing
/// or unreadable file is a `LoadError` and the pipeline does not run.
/// MyHome failing only costs us its records.
pub fn load_market_data(dir: &Path) -> Result<MarketData, LoadError> {
    let daft_path = dir.join(DAFT_CSV);
    let daft_text = fs::read_to_string(&daft_path)
        .map_err(|e| LoadError::PrimarySource(format!("{}: {e}", daft_path.display())))?;
    let mut listings = parse_source(&daft_text, Source::Daft);

    let myhome_path = dir.join(MYHOME_CSV);
    match fs::read_to_string(&myhome_path) {
        Ok(text) => listings.extend(parse_source(&text, Source::MyHome)),
        Err(e) => eprintln!(
            "⚠️ MyHome export unavailable ({}): continuing with Daft only",
            e
        ),
    }

    Ok(MarketData {
        listings,
        timestamps: ScrapeTimestamps {
            daft: read_timestamp(&dir.join(DAFT_TIMESTAMP)),
            myhome: read_timestamp(&dir.join(MYHOME_TIMESTAMP)),
        },
    })
}
