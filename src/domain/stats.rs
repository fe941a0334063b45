// src/domain/stats.rs
//
// Per-area and citywide market statistics. Everything here is rebuilt
// wholesale from the current working set on every pass; nothing updates
// incrementally.

use super::listing::{Level, Listing, Tier};
use crate::ingest::{NormalizedListing, Source};
use serde::Serialize;
use std::collections::BTreeMap;

/// Median days-on-market assumed when no listing reports its age.
pub const DEFAULT_MEDIAN_DAYS: i64 = 60;

/// Citywide figures computed once per pass and shared by every
/// per-listing lookup. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalStats {
    /// Upper median of all positive days-on-market values.
    pub median_days: i64,
    /// Ascending positive price-per-sqm values, the percentile table.
    pub sorted_pps: Vec<i64>,
    /// 25th/75th percentile of all listing prices; the tier cut points.
    pub price_p25: i64,
    pub price_p75: i64,
}

impl GlobalStats {
    pub fn compute(listings: &[NormalizedListing]) -> Self {
        let mut days: Vec<i64> = listings
            .iter()
            .map(|l| l.days_on_market)
            .filter(|&d| d > 0)
            .collect();
        days.sort_unstable();
        // floor(n/2) is the upper middle for even counts. Deliberate: the
        // dashboard has always used the upper median, not the average of
        // the two middle values.
        let median_days = days
            .get(days.len() / 2)
            .copied()
            .unwrap_or(DEFAULT_MEDIAN_DAYS);

        let mut sorted_pps: Vec<i64> = listings
            .iter()
            .map(|l| l.price_per_sqm)
            .filter(|&p| p > 0)
            .collect();
        sorted_pps.sort_unstable();

        let mut prices: Vec<i64> = listings.iter().map(|l| l.price).collect();
        prices.sort_unstable();

        GlobalStats {
            median_days,
            sorted_pps,
            price_p25: element_at_fraction(&prices, 0.25),
            price_p75: element_at_fraction(&prices, 0.75),
        }
    }
}

fn element_at_fraction(sorted: &[i64], fraction: f64) -> i64 {
    sorted
        .get((sorted.len() as f64 * fraction).floor() as usize)
        .copied()
        .unwrap_or(0)
}

/// Percentile rank of `value` in the ascending `sorted` table: the share
/// of entries strictly below it, as an integer 0-100. Monotone
/// non-decreasing in `value`. Unknown values and empty tables rank at
/// the midpoint.
pub fn calc_percentile(value: i64, sorted: &[i64]) -> i64 {
    if value <= 0 || sorted.is_empty() {
        return 50;
    }
    let below = sorted.iter().take_while(|&&v| v < value).count();
    (below as f64 / sorted.len() as f64 * 100.0).round() as i64
}

/// Market statistics for one area label.
#[derive(Debug, Clone, Serialize)]
pub struct AreaStats {
    pub count: usize,
    /// Positive days-on-market samples contributing to this area.
    pub days: Vec<i64>,
    /// Positive price-per-sqm samples.
    pub pps: Vec<i64>,
    /// Every working-set price in this area.
    pub prices: Vec<i64>,
    /// Property-type frequency.
    pub types: BTreeMap<String, usize>,
    pub avg_days: f64,
    pub avg_pps: f64,
    pub avg_price: f64,
    pub min_price: i64,
    pub max_price: i64,
    /// 0-100, inverse of time-on-market: selling at exactly the citywide
    /// median pace scores 50.
    pub demand_score: f64,
    pub tier: Tier,
}

impl AreaStats {
    fn empty() -> Self {
        AreaStats {
            count: 0,
            days: Vec::new(),
            pps: Vec::new(),
            prices: Vec::new(),
            types: BTreeMap::new(),
            avg_days: 0.0,
            avg_pps: 0.0,
            avg_price: 0.0,
            min_price: 0,
            max_price: 0,
            demand_score: 0.0,
            tier: Tier::Midrange,
        }
    }

    fn finalize(&mut self, global: &GlobalStats) {
        self.avg_days = if self.days.is_empty() {
            // No sample for this area; assume it moves at the city's pace.
            global.median_days as f64
        } else {
            mean(&self.days)
        };
        self.avg_pps = if self.pps.is_empty() { 0.0 } else { mean(&self.pps) };
        self.avg_price = mean(&self.prices);
        self.min_price = self.prices.iter().copied().min().unwrap_or(0);
        self.max_price = self.prices.iter().copied().max().unwrap_or(0);
        self.demand_score =
            (100.0 - self.avg_days / global.median_days as f64 * 50.0).clamp(0.0, 100.0);
        // Tier is relative to the citywide quartiles, never to the area's
        // own price distribution.
        self.tier = if self.avg_price < global.price_p25 as f64 {
            Tier::Affordable
        } else if self.avg_price > global.price_p75 as f64 {
            Tier::Premium
        } else {
            Tier::Midrange
        };
    }
}

fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

/// Groups the working set by area and computes each group's statistics.
pub fn build_area_stats(
    listings: &[NormalizedListing],
    global: &GlobalStats,
) -> BTreeMap<String, AreaStats> {
    let mut stats: BTreeMap<String, AreaStats> = BTreeMap::new();
    for l in listings {
        let s = stats.entry(l.area.clone()).or_insert_with(AreaStats::empty);
        s.count += 1;
        if l.days_on_market > 0 {
            s.days.push(l.days_on_market);
        }
        if l.price_per_sqm > 0 {
            s.pps.push(l.price_per_sqm);
        }
        s.prices.push(l.price);
        *s.types.entry(l.property_type.clone()).or_insert(0) += 1;
    }
    for s in stats.values_mut() {
        s.finalize(global);
    }
    stats
}

/// Headline figures for an arbitrary view of listings (the full set or a
/// filtered one). Zeroed when the view is empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub total: usize,
    pub daft_count: usize,
    pub myhome_count: usize,
    pub hot_count: usize,
    /// Listed 90+ days.
    pub negotiable_count: usize,
    pub avg_price: i64,
    pub median_price: i64,
    pub min_price: i64,
    pub max_price: i64,
    pub avg_pps: i64,
    pub avg_days: i64,
}

pub fn summarize(listings: &[&Listing]) -> Summary {
    let mut summary = Summary {
        total: listings.len(),
        ..Summary::default()
    };

    let mut prices: Vec<i64> = listings.iter().map(|l| l.facts.price).collect();
    prices.sort_unstable();
    let pps: Vec<i64> = listings
        .iter()
        .map(|l| l.facts.price_per_sqm)
        .filter(|&p| p > 0)
        .collect();
    let days: Vec<i64> = listings
        .iter()
        .map(|l| l.facts.days_on_market)
        .filter(|&d| d > 0)
        .collect();

    summary.daft_count = listings.iter().filter(|l| l.facts.source == Source::Daft).count();
    summary.myhome_count = listings
        .iter()
        .filter(|l| l.facts.source == Source::MyHome)
        .count();
    summary.hot_count = listings
        .iter()
        .filter(|l| l.desirability.level == Level::Hot)
        .count();
    summary.negotiable_count = listings
        .iter()
        .filter(|l| l.facts.days_on_market >= 90)
        .count();

    if !prices.is_empty() {
        summary.avg_price = mean(&prices).round() as i64;
        summary.median_price = prices[prices.len() / 2];
        summary.min_price = prices[0];
        summary.max_price = prices[prices.len() - 1];
    }
    if !pps.is_empty() {
        summary.avg_pps = mean(&pps).round() as i64;
    }
    if !days.is_empty() {
        summary.avg_days = mean(&days).round() as i64;
    }
    summary
}
