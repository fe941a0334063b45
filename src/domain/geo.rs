// src/domain/geo.rs
//
// Area classification from free-text addresses. Both portals publish
// addresses as comma-separated segments ending in a county, with the
// neighbourhood usually second-to-last, sometimes glued to a "Dublin N"
// postal district.

/// Fallback label when an address has no usable segments.
pub const DEFAULT_AREA: &str = "Dublin";

/// Curated allow-list for the preferred-area filter: the South Dublin /
/// North Wicklow coastal belt, matched as case-insensitive substrings.
const PREFERRED_AREAS: [&str; 25] = [
    "dun laoghaire",
    "dunlaoghaire",
    "dún laoghaire",
    "greystones",
    "bray",
    "blackrock",
    "shankill",
    "sallynoggin",
    "dalkey",
    "killiney",
    "glasthule",
    "monkstown",
    "sandycove",
    "glenageary",
    "cabinteely",
    "foxrock",
    "cornelscourt",
    "loughlinstown",
    "ballybrack",
    "kilmacud",
    "stillorgan",
    "mount merrion",
    "booterstown",
    "rathmichael",
    "carrickmines",
];

/// Case-insensitive (ASCII) search for `needle_lower` in `haystack`,
/// starting at byte offset `from`. The needle is plain ASCII so matches
/// can never start inside a multi-byte character.
fn find_ascii_ci(haystack: &str, needle_lower: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle_lower.as_bytes();
    if hay.len() < from + needle.len() {
        return None;
    }
    (from..=hay.len() - needle.len())
        .find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Removes every "Dublin <digits>" postal-district token, case-insensitive.
fn strip_postal_district(segment: &str) -> String {
    let mut out = segment.to_string();
    let mut from = 0;
    while let Some(start) = find_ascii_ci(&out, "dublin ", from) {
        let after = start + "dublin ".len();
        let digits = out[after..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if digits == 0 {
            from = after;
            continue;
        }
        out.replace_range(start..after + digits, "");
        from = start;
    }
    out
}

/// Derives the area label from an address: the second-to-last comma
/// segment with any postal-district token stripped. An address without
/// at least two segments gets the default label; a segment that strips
/// down to nothing falls back to its untouched form.
pub fn extract_area(address: &str) -> String {
    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() < 2 {
        return DEFAULT_AREA.to_string();
    }
    let raw = parts[parts.len() - 2].trim();
    let stripped = strip_postal_district(raw);
    let stripped = stripped.trim();
    if stripped.is_empty() {
        raw.to_string()
    } else {
        stripped.to_string()
    }
}

pub fn is_preferred_area(address: &str) -> bool {
    let lower = address.to_lowercase();
    PREFERRED_AREAS.iter().any(|area| lower.contains(area))
}
