// src/domain/scoring.rs
//
// The desirability model: four independently weighted sub-scores summed
// into a 0-100 composite, plus the BER rule tables it leans on. Pure
// functions of one listing and the current statistics; no side effects.

use super::listing::{Desirability, Level, ScoreFactor};
use super::stats::AreaStats;
use crate::ingest::NormalizedListing;

/// Assumed average annual heating cost the BER savings are measured
/// against.
pub const AVG_HEATING: i64 = 2000;

/// Estimated annual heating cost per BER letter.
const BER_COSTS: [(char, i64); 7] = [
    ('A', 800),
    ('B', 1200),
    ('C', 1600),
    ('D', 2000),
    ('E', 2500),
    ('F', 3000),
    ('G', 3500),
];

/// Energy-efficiency sub-score per BER letter.
const BER_SCORES: [(char, i64); 7] = [
    ('A', 100),
    ('B', 80),
    ('C', 60),
    ('D', 40),
    ('E', 25),
    ('F', 15),
    ('G', 10),
];

/// Property-type sub-scores, matched as substrings in declaration order;
/// first match wins, so "Semi-D" must sit ahead of the bare "Semi".
const TYPE_SCORES: [(&str, i64); 6] = [
    ("Detached", 100),
    ("Semi-D", 85),
    ("Semi", 85),
    ("Bungalow", 80),
    ("Terrace", 70),
    ("End", 75),
];

const UNKNOWN_HEATING: i64 = 2200;
const UNKNOWN_BER_SCORE: i64 = 30;
const UNKNOWN_TYPE_SCORE: i64 = 60;

/// Annual heating cost for a BER grade; only the first letter counts, so
/// "A2" prices like "A". Missing or unrecognized grades get the neutral
/// default.
pub fn heating_cost(ber: Option<&str>) -> i64 {
    let Some(letter) = ber.and_then(|b| b.chars().next()) else {
        return UNKNOWN_HEATING;
    };
    BER_COSTS
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|&(_, cost)| cost)
        .unwrap_or(UNKNOWN_HEATING)
}

fn ber_score(ber: Option<char>) -> i64 {
    let Some(letter) = ber else {
        return UNKNOWN_BER_SCORE;
    };
    BER_SCORES
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|&(_, score)| score)
        .unwrap_or(UNKNOWN_BER_SCORE)
}

fn type_score(property_type: &str) -> i64 {
    TYPE_SCORES
        .iter()
        .find(|(t, _)| property_type.contains(t))
        .map(|&(_, score)| score)
        .unwrap_or(UNKNOWN_TYPE_SCORE)
}

/// Level thresholds over the rounded composite score.
fn level_for(score: i64) -> Level {
    if score >= 70 {
        Level::Hot
    } else if score >= 50 {
        Level::Warm
    } else {
        Level::Cool
    }
}

/// Thousands separators for the human descriptions ("4,500").
fn thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// Scores one listing against its area and the citywide statistics.
/// Weights: area demand 40, value for area 25, energy efficiency 20,
/// property type 15. Every unknown input resolves to a documented
/// neutral sub-score, never an error.
pub fn calc_desirability(facts: &NormalizedListing, area: Option<&AreaStats>) -> Desirability {
    let mut breakdown = Vec::with_capacity(4);

    let demand = area.map(|a| a.demand_score).unwrap_or(50.0);
    breakdown.push(ScoreFactor {
        key: "demand",
        value: demand.round() as i64,
        weight: 40,
        label: "Area Demand",
        description: match area {
            Some(a) => format!("Avg {} days to sell", a.avg_days.round() as i64),
            None => "Unknown".to_string(),
        },
    });

    let mut value_score = 50;
    let area_avg_pps = area.map(|a| a.avg_pps).unwrap_or(0.0);
    if facts.price_per_sqm > 0 && area_avg_pps > 0.0 {
        let ratio = facts.price_per_sqm as f64 / area_avg_pps;
        value_score = if ratio < 0.8 {
            100
        } else if ratio < 0.95 {
            75
        } else if ratio < 1.1 {
            50
        } else {
            25
        };
    }
    breakdown.push(ScoreFactor {
        key: "value",
        value: value_score,
        weight: 25,
        label: "Value for Area",
        description: if area_avg_pps > 0.0 {
            format!("Area avg €{}/m²", thousands(area_avg_pps.round() as i64))
        } else {
            "Unknown".to_string()
        },
    });

    let ber = ber_score(facts.ber_letter());
    breakdown.push(ScoreFactor {
        key: "ber",
        value: ber,
        weight: 20,
        label: "Energy Efficiency",
        description: match facts.ber.as_deref() {
            Some(rating) => format!("BER {rating} = ~€{}/yr heating", facts.heating_cost),
            None => "No BER rating".to_string(),
        },
    });

    let type_sub = type_score(&facts.property_type);
    breakdown.push(ScoreFactor {
        key: "type",
        value: type_sub,
        weight: 15,
        label: "Property Type",
        description: if facts.property_type.is_empty() {
            "Unknown type".to_string()
        } else {
            facts.property_type.clone()
        },
    });

    let score = (demand * 0.40
        + value_score as f64 * 0.25
        + ber as f64 * 0.20
        + type_sub as f64 * 0.15)
        .round() as i64;

    Desirability {
        score,
        level: level_for(score),
        breakdown,
    }
}
