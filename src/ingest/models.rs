// src/ingest/models.rs

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// One raw CSV record, keyed by the header names of whichever export it
/// came from. Lookups for absent columns read as empty strings.
#[derive(Debug, Clone)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Row { fields }
    }

    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Which export a listing came from. The two portals publish different
/// column sets, so some normalization rules are source-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Daft,
    MyHome,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Daft => write!(f, "Daft"),
            Source::MyHome => write!(f, "MyHome"),
        }
    }
}

/// A listing row flattened onto the common shape both sources share,
/// with the cheap derived fields already attached. This is the record
/// the statistics and scoring layers consume; nothing here depends on
/// any other listing.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedListing {
    pub listing_id: String,
    pub source: Source,
    pub url: String,
    pub address: String,
    /// Display price exactly as published ("€495,000", "POA", ...).
    pub price_display: String,
    pub property_type: String,
    /// BER grade as published ("A2", "C", ...). Only the first letter is
    /// semantically meaningful downstream.
    pub ber: Option<String>,

    /// Parsed price in euro; 0 means unparseable, which excludes the row
    /// from the working set.
    pub price: i64,
    pub beds: i64,
    pub size_sqm: f64,
    pub days_on_market: i64,
    pub lat: f64,
    pub lng: f64,

    pub price_per_sqm: i64,
    pub area: String,
    pub in_preferred_area: bool,
    pub heating_cost: i64,
    pub heating_saving: i64,
    pub beds_display: String,
}

impl NormalizedListing {
    pub fn ber_letter(&self) -> Option<char> {
        self.ber.as_deref().and_then(|b| b.chars().next())
    }
}

#[cfg(test)]
impl NormalizedListing {
    /// Baseline record for unit tests; individual tests override the
    /// fields they care about.
    pub(crate) fn stub() -> Self {
        NormalizedListing {
            listing_id: "1".to_string(),
            source: Source::Daft,
            url: "https://example.com/1".to_string(),
            address: "1 Test St, Testville, Co. Dublin".to_string(),
            price_display: "€400,000".to_string(),
            property_type: String::new(),
            ber: None,
            price: 400_000,
            beds: 3,
            size_sqm: 0.0,
            days_on_market: 0,
            lat: 0.0,
            lng: 0.0,
            price_per_sqm: 0,
            area: "Testville".to_string(),
            in_preferred_area: false,
            heating_cost: 2200,
            heating_saving: -200,
            beds_display: "3 bed".to_string(),
        }
    }
}
