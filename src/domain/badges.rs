// src/domain/badges.rs

use super::listing::{Badge, Tier};
use super::stats::AreaStats;
use crate::ingest::NormalizedListing;

/// Applies the badge rules to one listing. The three predicates are
/// independent, so a listing carries zero to three badges, always in
/// starter / negotiable / below-market order.
pub fn calc_badges(facts: &NormalizedListing, area: Option<&AreaStats>) -> Vec<Badge> {
    let mut badges = Vec::new();

    // Under 500k, 3+ beds, good BER, decent size - the starter-home sweet
    // spot.
    let good_ber = matches!(facts.ber_letter(), Some('A' | 'B' | 'C'));
    if facts.price <= 500_000 && facts.beds >= 3 && good_ber && facts.size_sqm >= 80.0 {
        badges.push(Badge::starter());
    }

    // On the market long enough that the vendor is probably listening.
    if facts.days_on_market >= 90 {
        badges.push(Badge::negotiable());
    }

    // Large property priced well under its area's average, outside the
    // premium areas where a discount is still no bargain.
    if let Some(a) = area {
        if facts.size_sqm >= 100.0
            && a.avg_pps > 0.0
            && (facts.price_per_sqm as f64) < a.avg_pps * 0.85
            && a.tier != Tier::Premium
        {
            badges.push(Badge::below_market());
        }
    }

    badges
}
