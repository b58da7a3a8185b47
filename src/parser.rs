//! Field extraction: raw card text in, primitive typed values out.
//!
//! Every function here is total. Text that does not contain what we look for
//! resolves to a default (0, an all-zero [`Features`], or the fallback
//! [`Category`]) so one malformed card can never fail a batch.

use crate::models::{Category, Features};
use regex::Regex;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run pattern"));

static BEDROOMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*(?:bed|room)").expect("bedroom pattern"));
static BATHROOMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*bath").expect("bathroom pattern"));
static TOILETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*toilet").expect("toilet pattern"));
static PARKING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*(?:car|park)").expect("parking pattern"));

/// Title substrings and the category they select, most specific first.
///
/// Evaluated top to bottom and the first hit wins, so "semi detached duplex"
/// has to stay above "detached duplex", and so on down the list.
const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["semi detached duplex"], Category::SemiDetachedDuplex),
    (&["terraced duplex", "terrace"], Category::TerracedDuplexes),
    (&["detached duplex"], Category::DetachedDuplex),
    (&["semi detached bungalow"], Category::SemiDetachedBungalow),
    (&["terraced bungalow"], Category::TerracedBungalow),
    (&["detached bungalow", "bungalow"], Category::DetachedBungalow),
    (&["flat", "apartment"], Category::BlockOfFlats),
];

/// Extracts a best-effort integer price from arbitrary text.
///
/// All digit runs are concatenated in order, so "₦ 12,000,000 / year" gives
/// `12000000` but a range like "5,000,000 - 6,000,000" gives `50000006000000`.
/// Separators are never interpreted. Text without digits yields 0 and a digit
/// string too long for `u64` saturates, which the price filter then rejects.
///
/// Only ASCII `0-9` count as digits; other scripts' numerals are ignored.
pub fn clean_price(price_text: &str) -> u64 {
    let digits: String = DIGIT_RUN
        .find_iter(price_text)
        .map(|m| m.as_str())
        .collect();

    if digits.is_empty() {
        return 0;
    }

    digits.parse().unwrap_or(u64::MAX)
}

/// Counts bedrooms, bathrooms, toilets and parking spaces mentioned in `text`.
///
/// Matching is case-insensitive and takes the first number directly followed
/// by a trigger word. Counts too large for `u32` saturate. When no toilet count
/// is given but bathrooms are, toilets are assumed to be one more than bathrooms.
pub fn parse_features(text: &str) -> Features {
    let text = text.to_lowercase();

    let mut features = Features {
        bedrooms: first_count(&BEDROOMS, &text),
        bathrooms: first_count(&BATHROOMS, &text),
        toilets: first_count(&TOILETS, &text),
        parking_space: first_count(&PARKING, &text),
    };

    if features.toilets == 0 && features.bathrooms > 0 {
        features.toilets = features.bathrooms.saturating_add(1);
    }

    features
}

fn first_count(pattern: &Regex, text: &str) -> u32 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        // The capture is ASCII digits only, so parsing can only fail on overflow.
        .map(|m| m.as_str().parse().unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Maps a free-form listing title onto one of the fixed categories.
pub fn map_title(raw_title: &str) -> Category {
    let title = raw_title.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| title.contains(*needle)))
        .map(|(_, category)| *category)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_price_strips_currency_and_separators() {
        assert_eq!(clean_price("₦ 12,000,000 / year"), 12_000_000);
        assert_eq!(clean_price("NGN 3.500.000"), 3_500_000);
        assert_eq!(clean_price("1500000"), 1_500_000);
    }

    #[test]
    fn clean_price_without_digits_is_zero() {
        assert_eq!(clean_price(""), 0);
        assert_eq!(clean_price("Price on request"), 0);
    }

    #[test]
    fn clean_price_concatenates_every_digit_run() {
        assert_eq!(clean_price("5,000,000 - 6,000,000"), 50_000_006_000_000);
        assert_eq!(clean_price("₦ 2,500,000.50"), 250_000_050);
    }

    #[test]
    fn clean_price_saturates_on_overflow() {
        assert_eq!(clean_price("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn clean_price_ignores_non_ascii_numerals() {
        assert_eq!(clean_price("٦٠٠٠٠٠٠"), 0);
        assert_eq!(clean_price("₦ ٦ 7,000,000"), 7_000_000);
    }

    #[test]
    fn parse_features_saturates_huge_counts() {
        let features = parse_features("99999999999 beds | 99999999999 baths");
        assert_eq!(features.bedrooms, u32::MAX);
        assert_eq!(features.bathrooms, u32::MAX);
        assert_eq!(features.toilets, u32::MAX);
    }

    #[test]
    fn parse_features_reads_aux_info_blob() {
        let features = parse_features("4 beds | 3 baths | 2 cars");
        assert_eq!(
            features,
            Features {
                bedrooms: 4,
                bathrooms: 3,
                toilets: 4,
                parking_space: 2,
            }
        );
    }

    #[test]
    fn parse_features_is_case_insensitive_and_allows_no_space() {
        let features = parse_features("5BEDROOMS 5Bathrooms 6 Toilets 3 Parking Spaces");
        assert_eq!(features.bedrooms, 5);
        assert_eq!(features.bathrooms, 5);
        assert_eq!(features.toilets, 6);
        assert_eq!(features.parking_space, 3);
    }

    #[test]
    fn parse_features_matches_room_as_bedroom_trigger() {
        assert_eq!(parse_features("3 room flat").bedrooms, 3);
    }

    #[test]
    fn parse_features_takes_first_match() {
        assert_eq!(parse_features("2 beds, or 3 beds with annex").bedrooms, 2);
    }

    #[test]
    fn parse_features_defaults_to_zero() {
        assert_eq!(parse_features("lovely home near the park"), Features::default());
    }

    #[test]
    fn toilet_fallback_only_when_bathrooms_present() {
        assert_eq!(parse_features("2 baths").toilets, 3);
        assert_eq!(parse_features("2 baths 2 toilets").toilets, 2);
        assert_eq!(parse_features("3 beds").toilets, 0);
    }

    #[test]
    fn map_title_follows_rule_order() {
        let cases = [
            ("Luxury Semi Detached Duplex For Rent", Category::SemiDetachedDuplex),
            ("4 Bedroom Terraced Duplex", Category::TerracedDuplexes),
            ("Terrace house in Gwarinpa", Category::TerracedDuplexes),
            ("5 Bedroom Detached Duplex", Category::DetachedDuplex),
            ("Semi Detached Bungalow", Category::SemiDetachedBungalow),
            // "terrace" is tested before the bungalow rules
            ("Terraced Bungalow", Category::TerracedDuplexes),
            ("3 bedroom detached bungalow", Category::DetachedBungalow),
            ("Bungalow with BQ", Category::DetachedBungalow),
            ("2 Bedroom Flat", Category::BlockOfFlats),
            ("Serviced Apartment", Category::BlockOfFlats),
        ];
        for (title, expected) in cases {
            assert_eq!(map_title(title), expected, "{title}");
        }
    }

    #[test]
    fn map_title_falls_back_to_detached_duplex() {
        assert_eq!(map_title(""), Category::DetachedDuplex);
        assert_eq!(map_title("Commercial office space"), Category::DetachedDuplex);
    }
}
