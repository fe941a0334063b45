// src/domain/query.rs
//
// The query surface over a scored snapshot. Filtering and sorting are
// stateless transforms producing fresh views; the underlying listing
// collection is never touched.

use super::listing::{BadgeKind, Level, Listing};
use crate::ingest::Source;

/// Grade ordering for the max-BER filter, best to worst.
const BER_ORDER: [char; 7] = ['A', 'B', 'C', 'D', 'E', 'F', 'G'];

fn ber_rank(letter: char) -> Option<usize> {
    BER_ORDER.iter().position(|&l| l == letter)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesirabilityFilter {
    /// Hot listings only.
    Hot,
    /// Anything that is not cool.
    WarmOrBetter,
}

/// User-selected filter criteria; `None`/`false` fields are inactive.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub source: Option<Source>,
    pub preferred_only: bool,
    /// Case-insensitive substring matched against address or area.
    pub location: Option<String>,
    pub max_price: Option<i64>,
    pub min_beds: Option<i64>,
    /// Substring match against the raw property type.
    pub property_type: Option<String>,
    /// Keep listings rated this grade or better. Listings without a BER
    /// fail the filter; an unrecognized first letter passes it.
    pub max_ber: Option<char>,
    pub desirability: Option<DesirabilityFilter>,
}

fn matches(listing: &Listing, spec: &FilterSpec) -> bool {
    let facts = &listing.facts;

    if let Some(source) = spec.source {
        if facts.source != source {
            return false;
        }
    }
    if spec.preferred_only && !facts.in_preferred_area {
        return false;
    }
    if let Some(loc) = &spec.location {
        let loc = loc.to_lowercase();
        if !facts.address.to_lowercase().contains(&loc)
            && !facts.area.to_lowercase().contains(&loc)
        {
            return false;
        }
    }
    if let Some(max_price) = spec.max_price {
        if facts.price > max_price {
            return false;
        }
    }
    if let Some(min_beds) = spec.min_beds {
        if facts.beds < min_beds {
            return false;
        }
    }
    if let Some(wanted) = &spec.property_type {
        if !facts.property_type.contains(wanted.as_str()) {
            return false;
        }
    }
    if let Some(max_ber) = spec.max_ber {
        let Some(letter) = facts.ber_letter() else {
            return false;
        };
        if let (Some(rank), Some(max_rank)) = (ber_rank(letter), ber_rank(max_ber)) {
            if rank > max_rank {
                return false;
            }
        }
    }
    match spec.desirability {
        Some(DesirabilityFilter::Hot) if listing.desirability.level != Level::Hot => {
            return false;
        }
        Some(DesirabilityFilter::WarmOrBetter) if listing.desirability.level == Level::Cool => {
            return false;
        }
        _ => {}
    }
    true
}

/// Applies the filter, preserving input order.
pub fn filter<'a>(listings: &'a [Listing], spec: &FilterSpec) -> Vec<&'a Listing> {
    listings.iter().filter(|l| matches(l, spec)).collect()
}

/// Predefined quick filters for the table view; they narrow an already
/// filtered view without touching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuickFilter {
    #[default]
    All,
    /// Desirability score 70+.
    Top,
    /// Carries the starter-home badge.
    Starter,
    /// Listed 90+ days.
    Negotiable,
}

pub fn table_view<'a>(
    filtered: &[&'a Listing],
    quick: QuickFilter,
    search: &str,
) -> Vec<&'a Listing> {
    let search = search.to_lowercase();
    filtered
        .iter()
        .copied()
        .filter(|l| match quick {
            QuickFilter::All => true,
            QuickFilter::Top => l.desirability.score >= 70,
            QuickFilter::Starter => l.has_badge(BadgeKind::Starter),
            QuickFilter::Negotiable => l.facts.days_on_market >= 90,
        })
        .filter(|l| search.is_empty() || l.facts.address.to_lowercase().contains(&search))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Score,
    Price,
    PricePerSqm,
    Beds,
    Size,
    Days,
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Stable sort: equal keys keep their input order in both directions, so
/// repeated sorts can never shuffle ties.
pub fn sort<'a>(listings: &[&'a Listing], key: SortKey, dir: SortDir) -> Vec<&'a Listing> {
    let mut sorted = listings.to_vec();
    sorted.sort_by(|a, b| {
        let ord = match key {
            SortKey::Score => a.desirability.score.cmp(&b.desirability.score),
            SortKey::Price => a.facts.price.cmp(&b.facts.price),
            SortKey::PricePerSqm => a.facts.price_per_sqm.cmp(&b.facts.price_per_sqm),
            SortKey::Beds => a.facts.beds.cmp(&b.facts.beds),
            SortKey::Size => a.facts.size_sqm.total_cmp(&b.facts.size_sqm),
            SortKey::Days => a.facts.days_on_market.cmp(&b.facts.days_on_market),
            SortKey::Address => a.facts.address.cmp(&b.facts.address),
        };
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
    sorted
}
