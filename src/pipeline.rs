// src/pipeline.rs
//
// The whole scoring pass in one place: normalized rows in, an immutable
// snapshot out. There is no partial or incremental rebuild; callers that
// want fresh statistics build a fresh snapshot.

use crate::domain::badges::calc_badges;
use crate::domain::listing::Listing;
use crate::domain::scoring::calc_desirability;
use crate::domain::stats::{build_area_stats, calc_percentile, AreaStats, GlobalStats};
use crate::ingest::NormalizedListing;
use serde::Serialize;
use std::collections::BTreeMap;

/// One fully consistent pass over the market: every listing scored
/// against the same area and global statistics. Read-only once built.
#[derive(Debug, Serialize)]
pub struct MarketSnapshot {
    pub listings: Vec<Listing>,
    pub area_stats: BTreeMap<String, AreaStats>,
    pub global: GlobalStats,
}

impl MarketSnapshot {
    /// Builds the snapshot: drop zero-price rows (the unparsed-price
    /// business rule, not an error), compute global then per-area
    /// statistics, then score and badge every survivor.
    pub fn build(raw: Vec<NormalizedListing>) -> Self {
        let working: Vec<NormalizedListing> =
            raw.into_iter().filter(|l| l.price > 0).collect();

        let global = GlobalStats::compute(&working);
        let area_stats = build_area_stats(&working, &global);

        let listings = working
            .into_iter()
            .map(|facts| {
                let area = area_stats.get(&facts.area);
                let desirability = calc_desirability(&facts, area);
                let badges = calc_badges(&facts, area);
                let pps_percentile = calc_percentile(facts.price_per_sqm, &global.sorted_pps);
                Listing {
                    facts,
                    desirability,
                    badges,
                    pps_percentile,
                }
            })
            .collect();

        MarketSnapshot {
            listings,
            area_stats,
            global,
        }
    }

    /// Areas with the highest demand scores, requiring at least three
    /// days-on-market samples so one quick sale cannot crown an area.
    pub fn hottest_areas(&self, limit: usize) -> Vec<(&str, f64)> {
        let mut areas: Vec<(&str, f64)> = self
            .area_stats
            .iter()
            .filter(|(_, s)| s.days.len() >= 3)
            .map(|(name, s)| (name.as_str(), s.demand_score))
            .collect();
        areas.sort_by(|a, b| b.1.total_cmp(&a.1));
        areas.truncate(limit);
        areas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::{BadgeKind, Level, Tier};
    use crate::domain::query::{self, SortDir, SortKey};
    use crate::ingest::Source;

    fn row(
        id: &str,
        address: &str,
        price: i64,
        beds: i64,
        size: f64,
        days: i64,
        ber: Option<&str>,
        ptype: &str,
    ) -> NormalizedListing {
        let mut l = NormalizedListing::stub();
        l.listing_id = id.to_string();
        l.source = Source::Daft;
        l.address = address.to_string();
        l.area = crate::domain::geo::extract_area(address);
        l.price = price;
        l.beds = beds;
        l.size_sqm = size;
        l.days_on_market = days;
        l.ber = ber.map(str::to_string);
        l.property_type = ptype.to_string();
        l.price_per_sqm = if size > 0.0 {
            (price as f64 / size).round() as i64
        } else {
            0
        };
        l
    }

    #[test]
    fn test_zero_price_rows_never_enter_the_working_set() {
        let snap = MarketSnapshot::build(vec![
            row("1", "1 A St, Lucan, Co. Dublin", 400_000, 3, 100.0, 30, None, ""),
            row("2", "2 A St, Lucan, Co. Dublin", 0, 3, 100.0, 30, None, ""),
        ]);
        assert_eq!(snap.listings.len(), 1);
        assert!(snap.listings.iter().all(|l| l.facts.price > 0));
        assert_eq!(snap.area_stats["Lucan"].count, 1);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let snap = MarketSnapshot::build(vec![
            row("1", "1 A St, Lucan, Co. Dublin", 300_000, 2, 0.0, 0, None, ""),
            row("2", "2 B St, Dalkey, Co. Dublin", 900_000, 5, 200.0, 400, Some("G"), "Detached"),
            row("3", "3 C St, Bray, Co. Wicklow", 450_000, 3, 90.0, 5, Some("A2"), "Semi-D"),
        ]);
        for l in &snap.listings {
            let score = l.desirability.score;
            assert!((0..=100).contains(&score), "score {score} out of range");
            let expected = if score >= 70 {
                Level::Hot
            } else if score >= 50 {
                Level::Warm
            } else {
                Level::Cool
            };
            assert_eq!(l.desirability.level, expected);
        }
    }

    // The end-to-end scenario: two same-area listings, one of them a big,
    // efficient, sharply priced starter home.
    #[test]
    fn test_well_priced_starter_home_end_to_end() {
        let area_addr = |n: &str| format!("{n}, Sallynoggin, Co. Dublin");
        // Peers establishing the area average around €5,000/m².
        let mut rows = vec![
            row("p1", &area_addr("1 Pearse Rd"), 500_000, 3, 100.0, 40, Some("D1"), "Terrace"),
            row("p2", &area_addr("2 Pearse Rd"), 550_000, 3, 110.0, 50, Some("D2"), "Terrace"),
            row("p3", &area_addr("3 Pearse Rd"), 525_000, 3, 105.0, 45, Some("C3"), "Terrace"),
        ];
        // The candidate: €4,000/m² (80% of the peers), BER A, 4 beds,
        // 120 m², fresh on the market.
        rows.push(row(
            "hero",
            &area_addr("4 Pearse Rd"),
            480_000,
            4,
            120.0,
            10,
            Some("A2"),
            "Semi-D",
        ));
        // A second area so the hero's area is not automatically premium.
        for i in 0..6 {
            rows.push(row(
                &format!("x{i}"),
                "9 Far Rd, Mullingar, Co. Westmeath",
                900_000,
                4,
                120.0,
                30,
                None,
                "Detached",
            ));
        }

        let snap = MarketSnapshot::build(rows);
        let hero = snap
            .listings
            .iter()
            .find(|l| l.facts.listing_id == "hero")
            .unwrap();

        assert!(hero.has_badge(BadgeKind::Starter));
        if snap.area_stats["Sallynoggin"].tier != Tier::Premium {
            assert!(hero.has_badge(BadgeKind::BelowMarket));
        }
        assert!(matches!(hero.desirability.level, Level::Hot | Level::Warm));

        // Cheapest per square metre of its area under an ascending sort.
        let view: Vec<&Listing> = snap
            .listings
            .iter()
            .filter(|l| l.facts.area == "Sallynoggin")
            .collect();
        let sorted = query::sort(&view, SortKey::PricePerSqm, SortDir::Asc);
        assert_eq!(sorted[0].facts.listing_id, "hero");
    }

    #[test]
    fn test_hottest_areas_need_three_samples() {
        let mut rows = Vec::new();
        for i in 0..3 {
            rows.push(row(&format!("f{i}"), "1 A St, Lucan, Co. Dublin", 400_000, 3, 0.0, 10, None, ""));
        }
        rows.push(row("s1", "2 B St, Dalkey, Co. Dublin", 400_000, 3, 0.0, 200, None, ""));
        let snap = MarketSnapshot::build(rows);

        let hottest = snap.hottest_areas(3);
        // Dalkey has a single sample and must not appear at all.
        assert_eq!(hottest.len(), 1);
        assert_eq!(hottest[0].0, "Lucan");
    }

    #[test]
    fn test_percentiles_attached_from_global_table() {
        let snap = MarketSnapshot::build(vec![
            row("1", "1 A St, Lucan, Co. Dublin", 300_000, 3, 100.0, 10, None, ""), // 3000/m²
            row("2", "2 A St, Lucan, Co. Dublin", 400_000, 3, 100.0, 10, None, ""), // 4000/m²
            row("3", "3 A St, Lucan, Co. Dublin", 500_000, 3, 0.0, 10, None, ""),   // unknown
        ]);
        let by_id = |id: &str| {
            snap.listings
                .iter()
                .find(|l| l.facts.listing_id == id)
                .unwrap()
        };
        assert_eq!(by_id("1").pps_percentile, 0);
        assert_eq!(by_id("2").pps_percentile, 50);
        assert_eq!(by_id("3").pps_percentile, 50); // unknown ranks midpoint
    }
}
