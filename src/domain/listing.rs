// src/domain/listing.rs

use crate::ingest::NormalizedListing;
use serde::Serialize;

/// Desirability bracket; thresholds live in `scoring`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Hot,
    Warm,
    Cool,
}

/// An area's price bracket relative to the citywide distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Affordable,
    Midrange,
    Premium,
}

/// One weighted factor of the desirability score. The description keeps
/// the raw context (area averages, heating cost, type string) so the
/// presentation layer can explain the number without recomputing it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreFactor {
    pub key: &'static str,
    pub value: i64,
    pub weight: u32,
    pub label: &'static str,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Desirability {
    pub score: i64,
    pub level: Level,
    /// Ordered: demand, value, ber, type.
    pub breakdown: Vec<ScoreFactor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BadgeKind {
    #[serde(rename = "ftb")]
    Starter,
    #[serde(rename = "negotiate")]
    Negotiable,
    #[serde(rename = "gem")]
    BelowMarket,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Badge {
    #[serde(rename = "type")]
    pub kind: BadgeKind,
    pub label: &'static str,
}

impl Badge {
    pub fn starter() -> Self {
        Badge { kind: BadgeKind::Starter, label: "Starter home" }
    }

    pub fn negotiable() -> Self {
        Badge { kind: BadgeKind::Negotiable, label: "Negotiable" }
    }

    pub fn below_market() -> Self {
        Badge { kind: BadgeKind::BelowMarket, label: "Below market" }
    }
}

/// A fully scored listing. Immutable once the snapshot that owns it is
/// built; filters and sorts only ever produce new views over these.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    #[serde(flatten)]
    pub facts: NormalizedListing,
    pub desirability: Desirability,
    pub badges: Vec<Badge>,
    /// Percentile rank of this listing's price-per-sqm in the citywide
    /// distribution (0 = cheapest end, 100 = dearest).
    pub pps_percentile: i64,
}

impl Listing {
    pub fn has_badge(&self, kind: BadgeKind) -> bool {
        self.badges.iter().any(|b| b.kind == kind)
    }
}
