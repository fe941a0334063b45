// src/ingest/normalize.rs
//
// Maps raw rows from either export onto `NormalizedListing`. All numeric
// parsing is permissive: a missing or mangled field becomes 0 and the row
// carries on, it is never dropped here.

use super::csv;
use super::models::{NormalizedListing, Row, Source};
use crate::domain::geo::{extract_area, is_preferred_area};
use crate::domain::scoring::{heating_cost, AVG_HEATING};

/// Leading-integer parse: "2 Bed" -> 2, "450" -> 450, "" / "N/A" -> 0.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Leading-float parse with an optional sign, for sizes and coordinates:
/// "120.5 m²" -> 120.5, "-6.2603" -> -6.2603, "" -> 0.
fn leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        let ok = c.is_ascii_digit()
            || (i == 0 && (c == '-' || c == '+'))
            || (c == '.' && !seen_dot);
        if !ok {
            break;
        }
        if c == '.' {
            seen_dot = true;
        }
        end = i + c.len_utf8();
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Strips everything but digits and parses the remainder, for display
/// prices like "€495,000". Returns 0 when no digits survive.
fn digits_only(s: &str) -> i64 {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Normalizes one raw row. Price preference order: the explicit
/// `price_num` column (MyHome), then digits scraped out of the display
/// price, then 0.
pub fn normalize(row: &Row, source: Source) -> NormalizedListing {
    let address = row.get("address").to_string();
    let price_display = row.get("price").to_string();

    let price = match leading_int(row.get("price_num")) {
        0 => digits_only(&price_display),
        explicit => explicit,
    };
    let beds = leading_int(row.get("beds"));
    let size_sqm = leading_float(row.get("size_sqm")).max(0.0);
    let days_on_market = leading_int(row.get("days_on_market"));

    let mut lat = leading_float(row.get("latitude"));
    let mut lng = leading_float(row.get("longitude"));
    // MyHome publishes unmapped listings as (0,0) with a separate
    // brochure coordinate pair to fall back on. Daft has no such pair.
    if source == Source::MyHome && lat == 0.0 && lng == 0.0 {
        lat = leading_float(row.get("brochure_latitude"));
        lng = leading_float(row.get("brochure_longitude"));
    }

    let ber = match row.get("ber") {
        "" => None,
        b => Some(b.to_string()),
    };

    let price_per_sqm = if size_sqm > 0.0 {
        (price as f64 / size_sqm).round() as i64
    } else {
        0
    };

    let heating_cost = heating_cost(ber.as_deref());
    let area = extract_area(&address);
    let in_preferred_area = is_preferred_area(&address);
    let beds_display = if beds > 0 {
        format!("{beds} bed")
    } else {
        "-".to_string()
    };

    NormalizedListing {
        listing_id: row.get("listing_id").to_string(),
        source,
        url: row.get("url").to_string(),
        address,
        price_display,
        property_type: row.get("property_type").to_string(),
        ber,
        price,
        beds,
        size_sqm,
        days_on_market,
        lat,
        lng,
        price_per_sqm,
        area,
        in_preferred_area,
        heating_cost,
        heating_saving: AVG_HEATING - heating_cost,
        beds_display,
    }
}

/// Parses and normalizes a whole export in one go.
pub fn parse_source(text: &str, source: Source) -> Vec<NormalizedListing> {
    csv::parse(text)
        .iter()
        .map(|row| normalize(row, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAFT_HEADER: &str =
        "listing_id,url,address,price,beds,baths,size_sqm,property_type,ber,latitude,longitude,date_listed,days_on_market,image_url";
    const MYHOME_HEADER: &str =
        "listing_id,source,url,address,price,price_num,beds,baths,size_sqm,property_type,ber,latitude,longitude,brochure_latitude,brochure_longitude,date_listed,days_on_market,agent,is_new";

    fn one(header: &str, line: &str, source: Source) -> NormalizedListing {
        let rows = parse_source(&format!("{header}\n{line}"), source);
        assert_eq!(rows.len(), 1);
        rows.into_iter().next().unwrap()
    }

    #[test]
    fn test_daft_price_comes_from_display_string() {
        let l = one(
            DAFT_HEADER,
            r#"100,https://d/1,"4 Oak Rd, Ranelagh, Dublin 6",€495,3,2,110,Semi-D,B2,53.32,-6.25,2024-01-01,45,"#,
            Source::Daft,
        );
        // Daft has no price_num column; digits come out of the display price.
        assert_eq!(l.price, 495);
        assert_eq!(l.beds, 3);
        assert_eq!(l.size_sqm, 110.0);
        assert_eq!(l.days_on_market, 45);
        assert_eq!(l.ber.as_deref(), Some("B2"));
        assert_eq!(l.price_per_sqm, 5); // 495 / 110, rounded
    }

    #[test]
    fn test_quoted_price_keeps_thousands() {
        let l = one(
            DAFT_HEADER,
            r#"100,https://d/1,"4 Oak Rd, Dublin 6","€495,000",3,2,110,Semi-D,B2,53.32,-6.25,2024-01-01,45,"#,
            Source::Daft,
        );
        assert_eq!(l.price, 495_000);
        assert_eq!(l.price_per_sqm, 4500);
    }

    #[test]
    fn test_explicit_price_num_wins_over_display() {
        let l = one(
            MYHOME_HEADER,
            r#"200,myhome,https://m/2,"9 Elm Pk, Blackrock, Co. Dublin","€510,000 to €540,000",510000,4,3,140,Detached,A3,53.30,-6.18,,,2024-02-02,12,Agent,False"#,
            Source::MyHome,
        );
        assert_eq!(l.price, 510_000);
    }

    #[test]
    fn test_beds_with_suffix_parse_leading_digits() {
        let l = one(
            MYHOME_HEADER,
            r#"201,myhome,https://m/3,"1 Ash Ln, Bray, Co. Wicklow",€350000,350000,2 Bed,1,85 m²,Terrace,C1,0,0,53.20,-6.10,2024-02-02,12,Agent,False"#,
            Source::MyHome,
        );
        assert_eq!(l.beds, 2);
        assert_eq!(l.size_sqm, 85.0);
        assert_eq!(l.beds_display, "2 bed");
    }

    #[test]
    fn test_myhome_falls_back_to_brochure_coordinates() {
        let l = one(
            MYHOME_HEADER,
            r#"201,myhome,https://m/3,"1 Ash Ln, Bray, Co. Wicklow",€350000,350000,2,1,85,Terrace,C1,0,0,53.20,-6.10,2024-02-02,12,Agent,False"#,
            Source::MyHome,
        );
        assert_eq!(l.lat, 53.20);
        assert_eq!(l.lng, -6.10);
    }

    #[test]
    fn test_daft_never_uses_brochure_coordinates() {
        // Same zeroed primary pair but tagged daft: stays at (0,0).
        let l = one(
            MYHOME_HEADER,
            r#"201,daft,https://m/3,"1 Ash Ln, Bray, Co. Wicklow",€350000,350000,2,1,85,Terrace,C1,0,0,53.20,-6.10,2024-02-02,12,Agent,False"#,
            Source::Daft,
        );
        assert_eq!(l.lat, 0.0);
        assert_eq!(l.lng, 0.0);
    }

    #[test]
    fn test_malformed_row_degrades_to_zeroes() {
        let l = one(DAFT_HEADER, "bad", Source::Daft);
        assert_eq!(l.listing_id, "bad");
        assert_eq!(l.price, 0);
        assert_eq!(l.beds, 0);
        assert_eq!(l.size_sqm, 0.0);
        assert_eq!(l.days_on_market, 0);
        assert_eq!(l.ber, None);
        assert_eq!(l.beds_display, "-");
        assert_eq!(l.heating_cost, 2200);
        assert_eq!(l.heating_saving, -200);
    }

    #[test]
    fn test_leading_float_handles_sign_and_junk() {
        assert_eq!(leading_float("-6.2603"), -6.2603);
        assert_eq!(leading_float("120.5 m²"), 120.5);
        assert_eq!(leading_float("n/a"), 0.0);
        assert_eq!(leading_float(""), 0.0);
    }
}
