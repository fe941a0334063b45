use crate::domain::query::{self, FilterSpec, QuickFilter, SortDir, SortKey};
use crate::domain::stats::summarize;
use crate::errors::LoadError;
use crate::ingest::{load_market_data, Source};
use crate::pipeline::MarketSnapshot;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

mod domain;
mod errors;
mod ingest;
mod pipeline;

fn main() {
    // Usage: home_scout [data_dir] [snapshot.json]
    let mut args = std::env::args().skip(1);
    let data_dir = PathBuf::from(args.next().unwrap_or_else(|| "data".to_string()));
    let json_out = args.next();

    let market = match load_market_data(&data_dir) {
        Ok(market) => market,
        Err(e) => {
            eprintln!("❌ Failed to load listing data: {e}");
            std::process::exit(1);
        }
    };

    for source in [Source::Daft, Source::MyHome] {
        if let Some(stamp) = market.timestamps.display(source) {
            println!("{source} last scraped: {stamp}");
        }
    }

    let snapshot = MarketSnapshot::build(market.listings);
    let view = query::filter(&snapshot.listings, &FilterSpec::default());
    let summary = summarize(&view);

    println!(
        "{} listings ({} Daft, {} MyHome) across {} areas",
        summary.total,
        summary.daft_count,
        summary.myhome_count,
        snapshot.area_stats.len()
    );
    println!(
        "Median {} | avg {} | range {} - {}",
        format_price(summary.median_price),
        format_price(summary.avg_price),
        format_price(summary.min_price),
        format_price(summary.max_price)
    );
    println!(
        "Avg €{}/m² | avg {} days listed | {} hot | {} listed 90+ days",
        summary.avg_pps, summary.avg_days, summary.hot_count, summary.negotiable_count
    );

    let hottest = snapshot.hottest_areas(3);
    if !hottest.is_empty() {
        let names: Vec<&str> = hottest.iter().map(|(name, _)| *name).collect();
        println!("Hottest: {}", names.join(", "));
    }

    let starters = query::table_view(&view, QuickFilter::Starter, "");
    if !starters.is_empty() {
        println!("{} starter homes", starters.len());
    }

    println!("Top picks:");
    for l in query::sort(&view, SortKey::Score, SortDir::Desc).iter().take(3) {
        println!(
            "  {:>3}  {}  {}",
            l.desirability.score,
            format_price(l.facts.price),
            l.facts.address
        );
    }

    if let Some(path) = json_out {
        match write_snapshot(&snapshot, &path) {
            Ok(()) => println!("✓ Snapshot written to {path}"),
            Err(e) => {
                eprintln!("❌ Failed to write snapshot: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn write_snapshot(snapshot: &MarketSnapshot, path: &str) -> Result<(), LoadError> {
    let file = File::create(path).map_err(|e| LoadError::Io(format!("{path}: {e}")))?;
    serde_json::to_writer_pretty(BufWriter::new(file), snapshot)
        .map_err(|e| LoadError::Io(e.to_string()))
}

/// Compact price for the console: "€450k", "1.2M".
fn format_price(price: i64) -> String {
    if price >= 1_000_000 {
        let millions = price as f64 / 1_000_000.0;
        let s = format!("{millions:.1}");
        format!("{}M", s.strip_suffix(".0").unwrap_or(&s))
    } else {
        format!("€{}k", (price as f64 / 1000.0).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::format_price;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(450_000), "€450k");
        assert_eq!(format_price(1_200_000), "1.2M");
        assert_eq!(format_price(2_000_000), "2M");
        assert_eq!(format_price(999_499), "€999k");
    }
}
