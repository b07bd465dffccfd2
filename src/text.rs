//! Free-text coordinate parsing and formatting.
//!
//! Five textual grammars compete for the same input strings, so parsing
//! runs through an ordered chain from most specific to least specific:
//! MGRS, Wikipedia-style symbol DMS, dotted DMS, decimal degrees, and
//! finally a plain Google-style pair. A less specific grammar can
//! partially match text intended for a more specific one (a dotted DMS
//! triple looks a lot like a decimal value), so the order in
//! [`PARSE_ORDER`] is a correctness requirement, not a tuning choice.
//! Each parser either fully matches or bows out with `None`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{latlon::LatLon, mgrs::Mgrs, ThisOrThat};

/// Identifier for one of the five supported textual grammars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextFormat {
    /// Decimal degrees with hemisphere letters, e.g. `48.858° N, 2.294° E`
    Decimal,
    /// Dotted degree.minute.second triples, e.g. `31.57.8S 115.51.32E`
    Dms,
    /// Symbolic DMS as written on Wikipedia, e.g. `48°51'29"N 2°17'40"E`
    Wikipedia,
    /// A bare signed pair as accepted by map search boxes, e.g. `48.858, 2.294`
    Google,
    /// A military grid reference, e.g. `18TWL8566411315`
    Mgrs,
}

impl TextFormat {
    /// Maps a numeric format id to a format. Unknown ids fall back to
    /// [`TextFormat::Decimal`].
    pub fn from_id(id: i32) -> TextFormat {
        match id {
            2 => TextFormat::Dms,
            3 => TextFormat::Wikipedia,
            4 => TextFormat::Google,
            5 => TextFormat::Mgrs,
            _ => TextFormat::Decimal,
        }
    }

    /// The numeric id of this format; inverse of [`TextFormat::from_id`].
    pub fn id(self) -> i32 {
        match self {
            TextFormat::Decimal => 1,
            TextFormat::Dms => 2,
            TextFormat::Wikipedia => 3,
            TextFormat::Google => 4,
            TextFormat::Mgrs => 5,
        }
    }
}

/// The parser chain, most specific grammar first. The order is load
/// bearing: decimal degrees would happily eat the degree part of a DMS
/// string, and a bare pair matches almost anything numeric.
pub const PARSE_ORDER: [TextFormat; 5] = [
    TextFormat::Mgrs,
    TextFormat::Wikipedia,
    TextFormat::Dms,
    TextFormat::Decimal,
    TextFormat::Google,
];

/// Parses free-form coordinate text by trying each grammar in
/// [`PARSE_ORDER`] and returning the first full match.
///
/// # Usage
///
/// ```
/// let coord = geocoord::parse("S31°57'8\" E115°51'32\"").unwrap();
///
/// assert!((coord.latitude() + 31.952222).abs() < 1e-5);
/// assert!((coord.longitude() - 115.858889).abs() < 1e-5);
///
/// assert!(geocoord::parse("91,200").is_none());
/// ```
pub fn parse(text: &str) -> Option<LatLon> {
    for format in PARSE_ORDER {
        log::trace!("trying {format:?} parser on {text:?}");
        if let Some(coord) = try_parse(format, text) {
            log::debug!("parsed {text:?} as {format:?}");
            return Some(coord);
        }
    }

    None
}

/// Runs the same ordered chain as [`parse`] but reports which grammar
/// matched instead of the parsed value.
///
/// # Usage
///
/// ```
/// use geocoord::{detect_format, TextFormat};
///
/// assert_eq!(detect_format("18TWL8566411315"), Some(TextFormat::Mgrs));
/// assert_eq!(detect_format("48.858, 2.294"), Some(TextFormat::Google));
/// assert_eq!(detect_format("not a coordinate"), None);
/// ```
pub fn detect_format(text: &str) -> Option<TextFormat> {
    PARSE_ORDER
        .into_iter()
        .find(|&format| try_parse(format, text).is_some())
}

fn try_parse(format: TextFormat, text: &str) -> Option<LatLon> {
    match format {
        TextFormat::Decimal => parse_decimal(text),
        TextFormat::Dms => parse_dms(text),
        TextFormat::Wikipedia => parse_wikipedia(text),
        TextFormat::Google => parse_google(text),
        TextFormat::Mgrs => parse_mgrs(text),
    }
}

/// Formats a coordinate into the requested textual form.
///
/// `decimal_places` controls the precision of the final numeric component
/// (degrees for decimal forms, seconds for DMS forms); a negative value
/// switches to shortest-round-trip printing with trailing zeros stripped.
///
/// [`TextFormat::Mgrs`] ignores `decimal_places` and emits a full 1 m
/// reference. A latitude outside the UTM bands `[-80, 84]` formats with
/// the `Z` band sentinel; such a string names no real grid square and
/// [`parse`] will not accept it back.
///
/// # Usage
///
/// ```
/// use geocoord::{format_coordinate, TextFormat};
///
/// let text = format_coordinate(-31.952222, 115.858889, TextFormat::Dms, 0);
/// assert_eq!(text, "31.57.8S 115.51.32E");
/// ```
pub fn format_coordinate(lat: f64, lon: f64, format: TextFormat, decimal_places: i32) -> String {
    match format {
        TextFormat::Decimal => format_decimal(lat, lon, decimal_places),
        TextFormat::Dms => format_dms(lat, lon, decimal_places),
        TextFormat::Wikipedia => format_wikipedia(lat, lon, decimal_places),
        TextFormat::Google => format!(
            "{}, {}",
            format_value(lat, decimal_places),
            format_value(lon, decimal_places),
        ),
        TextFormat::Mgrs => match LatLon::create(lat, lon) {
            Ok(coord) => coord.to_mgrs(5).to_string(),
            // Out-of-range input has no grid reference; degrade to decimal
            Err(_) => format_decimal(lat, lon, decimal_places),
        },
    }
}

// ================================
// Per-format parsers
// ================================

fn num(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Applies a hemisphere letter's sign to an absolute value.
fn signed(value: f64, hemisphere: &str) -> f64 {
    match hemisphere {
        "S" | "s" | "W" | "w" => -value,
        _ => value,
    }
}

fn build(lat: f64, lon: f64) -> Option<LatLon> {
    if lat.abs() > 90.0 || lon.abs() > 180.0 {
        return None;
    }
    Some(LatLon::new(lat, lon))
}

fn parse_mgrs(text: &str) -> Option<LatLon> {
    lazy_static! {
        // Cheap shape filter so ordinary lat/lon text never reaches the
        // strict decoder: 1-2 zone digits, band letter, 100km square,
        // optional digit tail.
        static ref MGRS_SHAPE: Regex = Regex::new(
            r"^\d{1,2}[C-HJ-NP-X][A-HJ-NP-Z][A-HJ-NP-V](\d{2,10})?$"
        ).unwrap();
    }

    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    if !MGRS_SHAPE.is_match(&compact) {
        return None;
    }

    match Mgrs::parse_str(&compact) {
        Ok(coord) => Some(coord.to_latlon()),
        Err(err) => {
            // Shape matched but the reference is malformed; the chain
            // treats it like any other failed candidate
            log::debug!("rejected MGRS candidate {compact:?}: {err}");
            None
        }
    }
}

lazy_static! {
    // Decimal degrees with hemisphere letters, four variants: the letter
    // before or after the value, latitude or longitude first.
    static ref DEC_LAT_LON_SUFFIX: Regex = Regex::new(
        r"(?i)^\s*(\d{1,2}(?:\.\d+)?)\s*°?\s*([NS])\s*[,;]?\s*(\d{1,3}(?:\.\d+)?)\s*°?\s*([EW])\s*$"
    ).unwrap();
    static ref DEC_LAT_LON_PREFIX: Regex = Regex::new(
        r"(?i)^\s*([NS])\s*(\d{1,2}(?:\.\d+)?)\s*°?\s*[,;]?\s*([EW])\s*(\d{1,3}(?:\.\d+)?)\s*°?\s*$"
    ).unwrap();
    static ref DEC_LON_LAT_SUFFIX: Regex = Regex::new(
        r"(?i)^\s*(\d{1,3}(?:\.\d+)?)\s*°?\s*([EW])\s*[,;]?\s*(\d{1,2}(?:\.\d+)?)\s*°?\s*([NS])\s*$"
    ).unwrap();
    static ref DEC_LON_LAT_PREFIX: Regex = Regex::new(
        r"(?i)^\s*([EW])\s*(\d{1,3}(?:\.\d+)?)\s*°?\s*[,;]?\s*([NS])\s*(\d{1,2}(?:\.\d+)?)\s*°?\s*$"
    ).unwrap();
}

fn parse_decimal(text: &str) -> Option<LatLon> {
    let (lat, ns, lon, ew) = if let Some(c) = DEC_LAT_LON_SUFFIX.captures(text) {
        (num(&c[1])?, c[2].to_string(), num(&c[3])?, c[4].to_string())
    } else if let Some(c) = DEC_LAT_LON_PREFIX.captures(text) {
        (num(&c[2])?, c[1].to_string(), num(&c[4])?, c[3].to_string())
    } else if let Some(c) = DEC_LON_LAT_SUFFIX.captures(text) {
        (num(&c[3])?, c[4].to_string(), num(&c[1])?, c[2].to_string())
    } else if let Some(c) = DEC_LON_LAT_PREFIX.captures(text) {
        (num(&c[4])?, c[3].to_string(), num(&c[2])?, c[1].to_string())
    } else {
        return None;
    };

    build(signed(lat, &ns), signed(lon, &ew))
}

lazy_static! {
    // Dotted degree.minute.second triples with hemisphere letters, same
    // four variants as the decimal grammar.
    static ref DMS_LAT_LON_SUFFIX: Regex = Regex::new(
        r"(?i)^\s*(\d{1,2})\.(\d{1,2})\.(\d{1,2}(?:\.\d+)?)\s*([NS])\s*[,;]?\s*(\d{1,3})\.(\d{1,2})\.(\d{1,2}(?:\.\d+)?)\s*([EW])\s*$"
    ).unwrap();
    static ref DMS_LAT_LON_PREFIX: Regex = Regex::new(
        r"(?i)^\s*([NS])\s*(\d{1,2})\.(\d{1,2})\.(\d{1,2}(?:\.\d+)?)\s*[,;]?\s*([EW])\s*(\d{1,3})\.(\d{1,2})\.(\d{1,2}(?:\.\d+)?)\s*$"
    ).unwrap();
    static ref DMS_LON_LAT_SUFFIX: Regex = Regex::new(
        r"(?i)^\s*(\d{1,3})\.(\d{1,2})\.(\d{1,2}(?:\.\d+)?)\s*([EW])\s*[,;]?\s*(\d{1,2})\.(\d{1,2})\.(\d{1,2}(?:\.\d+)?)\s*([NS])\s*$"
    ).unwrap();
    static ref DMS_LON_LAT_PREFIX: Regex = Regex::new(
        r"(?i)^\s*([EW])\s*(\d{1,3})\.(\d{1,2})\.(\d{1,2}(?:\.\d+)?)\s*[,;]?\s*([NS])\s*(\d{1,2})\.(\d{1,2})\.(\d{1,2}(?:\.\d+)?)\s*$"
    ).unwrap();
}

fn dms_to_degrees(deg: f64, min: f64, sec: f64) -> Option<f64> {
    if min >= 60.0 || sec >= 60.0 {
        return None;
    }
    Some(deg + min / 60.0 + sec / 3600.0)
}

fn parse_dms(text: &str) -> Option<LatLon> {
    let (lat, ns, lon, ew) = if let Some(c) = DMS_LAT_LON_SUFFIX.captures(text) {
        (
            dms_to_degrees(num(&c[1])?, num(&c[2])?, num(&c[3])?)?,
            c[4].to_string(),
            dms_to_degrees(num(&c[5])?, num(&c[6])?, num(&c[7])?)?,
            c[8].to_string(),
        )
    } else if let Some(c) = DMS_LAT_LON_PREFIX.captures(text) {
        (
            dms_to_degrees(num(&c[2])?, num(&c[3])?, num(&c[4])?)?,
            c[1].to_string(),
            dms_to_degrees(num(&c[6])?, num(&c[7])?, num(&c[8])?)?,
            c[5].to_string(),
        )
    } else if let Some(c) = DMS_LON_LAT_SUFFIX.captures(text) {
        (
            dms_to_degrees(num(&c[5])?, num(&c[6])?, num(&c[7])?)?,
            c[8].to_string(),
            dms_to_degrees(num(&c[1])?, num(&c[2])?, num(&c[3])?)?,
            c[4].to_string(),
        )
    } else if let Some(c) = DMS_LON_LAT_PREFIX.captures(text) {
        (
            dms_to_degrees(num(&c[6])?, num(&c[7])?, num(&c[8])?)?,
            c[5].to_string(),
            dms_to_degrees(num(&c[2])?, num(&c[3])?, num(&c[4])?)?,
            c[1].to_string(),
        )
    } else {
        return None;
    };

    build(signed(lat, &ns), signed(lon, &ew))
}

lazy_static! {
    // Symbolic DMS with °, ' or ′, and " or ″; minutes and seconds are
    // optional but seconds require minutes. Four variants again.
    static ref WIKI_LAT_LON_SUFFIX: Regex = Regex::new(
        r#"(?i)^\s*(\d{1,2})\s*°(?:\s*(\d{1,2}(?:\.\d+)?)\s*['′](?:\s*(\d{1,2}(?:\.\d+)?)\s*["″])?)?\s*([NS])\s*[,;]?\s*(\d{1,3})\s*°(?:\s*(\d{1,2}(?:\.\d+)?)\s*['′](?:\s*(\d{1,2}(?:\.\d+)?)\s*["″])?)?\s*([EW])\s*$"#
    ).unwrap();
    static ref WIKI_LAT_LON_PREFIX: Regex = Regex::new(
        r#"(?i)^\s*([NS])\s*(\d{1,2})\s*°(?:\s*(\d{1,2}(?:\.\d+)?)\s*['′](?:\s*(\d{1,2}(?:\.\d+)?)\s*["″])?)?\s*[,;]?\s*([EW])\s*(\d{1,3})\s*°(?:\s*(\d{1,2}(?:\.\d+)?)\s*['′](?:\s*(\d{1,2}(?:\.\d+)?)\s*["″])?)?\s*$"#
    ).unwrap();
    static ref WIKI_LON_LAT_SUFFIX: Regex = Regex::new(
        r#"(?i)^\s*(\d{1,3})\s*°(?:\s*(\d{1,2}(?:\.\d+)?)\s*['′](?:\s*(\d{1,2}(?:\.\d+)?)\s*["″])?)?\s*([EW])\s*[,;]?\s*(\d{1,2})\s*°(?:\s*(\d{1,2}(?:\.\d+)?)\s*['′](?:\s*(\d{1,2}(?:\.\d+)?)\s*["″])?)?\s*([NS])\s*$"#
    ).unwrap();
    static ref WIKI_LON_LAT_PREFIX: Regex = Regex::new(
        r#"(?i)^\s*([EW])\s*(\d{1,3})\s*°(?:\s*(\d{1,2}(?:\.\d+)?)\s*['′](?:\s*(\d{1,2}(?:\.\d+)?)\s*["″])?)?\s*[,;]?\s*([NS])\s*(\d{1,2})\s*°(?:\s*(\d{1,2}(?:\.\d+)?)\s*['′](?:\s*(\d{1,2}(?:\.\d+)?)\s*["″])?)?\s*$"#
    ).unwrap();
}

fn opt_num(text: Option<regex::Match<'_>>) -> Option<f64> {
    match text {
        Some(m) => num(m.as_str()),
        None => Some(0.0),
    }
}

fn parse_wikipedia(text: &str) -> Option<LatLon> {
    let (lat, ns, lon, ew) = if let Some(c) = WIKI_LAT_LON_SUFFIX.captures(text) {
        (
            dms_to_degrees(num(&c[1])?, opt_num(c.get(2))?, opt_num(c.get(3))?)?,
            c[4].to_string(),
            dms_to_degrees(num(&c[5])?, opt_num(c.get(6))?, opt_num(c.get(7))?)?,
            c[8].to_string(),
        )
    } else if let Some(c) = WIKI_LAT_LON_PREFIX.captures(text) {
        (
            dms_to_degrees(num(&c[2])?, opt_num(c.get(3))?, opt_num(c.get(4))?)?,
            c[1].to_string(),
            dms_to_degrees(num(&c[6])?, opt_num(c.get(7))?, opt_num(c.get(8))?)?,
            c[5].to_string(),
        )
    } else if let Some(c) = WIKI_LON_LAT_SUFFIX.captures(text) {
        (
            dms_to_degrees(num(&c[5])?, opt_num(c.get(6))?, opt_num(c.get(7))?)?,
            c[8].to_string(),
            dms_to_degrees(num(&c[1])?, opt_num(c.get(2))?, opt_num(c.get(3))?)?,
            c[4].to_string(),
        )
    } else if let Some(c) = WIKI_LON_LAT_PREFIX.captures(text) {
        (
            dms_to_degrees(num(&c[6])?, opt_num(c.get(7))?, opt_num(c.get(8))?)?,
            c[5].to_string(),
            dms_to_degrees(num(&c[2])?, opt_num(c.get(3))?, opt_num(c.get(4))?)?,
            c[1].to_string(),
        )
    } else {
        return None;
    };

    build(signed(lat, &ns), signed(lon, &ew))
}

lazy_static! {
    static ref GOOGLE_PAIR: Regex = Regex::new(
        r"^\s*([+-]?\d{1,3}(?:\.\d+)?)\s*[,;\s]\s*([+-]?\d{1,3}(?:\.\d+)?)\s*$"
    ).unwrap();
}

fn parse_google(text: &str) -> Option<LatLon> {
    let c = GOOGLE_PAIR.captures(text)?;
    let first = num(&c[1])?;
    let second = num(&c[2])?;

    // A bare pair carries no axis markers; the only disambiguation rule
    // is that a magnitude beyond 90° can only be a longitude.
    if first.abs() > 90.0 {
        build(second, first)
    } else {
        build(first, second)
    }
}

// ================================
// Per-format formatters
// ================================

/// Renders a value at the requested precision; negative precision means
/// shortest-round-trip with trailing zeros stripped.
fn format_value(value: f64, decimal_places: i32) -> String {
    if decimal_places >= 0 {
        #[allow(clippy::cast_sign_loss)]
        let places = decimal_places as usize;
        format!("{value:.places$}")
    } else {
        let mut buf = ryu::Buffer::new();
        buf.format(value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Splits an absolute angle into whole degrees, whole minutes, and
/// fractional seconds.
fn split_dms(value: f64) -> (u32, u32, f64) {
    let abs = value.abs();
    let deg = abs.floor();
    let min_full = (abs - deg) * 60.0;
    let min = min_full.floor();
    let sec = (min_full - min) * 60.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    (deg as u32, min as u32, sec)
}

/// Renders seconds, guarding the sexagesimal boundary: a value that
/// would round up to "60" at the requested precision is emitted as "59"
/// followed by a maximal run of 9s instead.
fn format_seconds(sec: f64, decimal_places: i32) -> String {
    let text = format_value(sec, decimal_places);

    if text.starts_with("60") {
        if decimal_places > 0 {
            #[allow(clippy::cast_sign_loss)]
            let nines = "9".repeat(decimal_places as usize);
            format!("59.{nines}")
        } else {
            "59".to_string()
        }
    } else {
        text
    }
}

fn hemisphere_letters(lat: f64, lon: f64) -> (char, char) {
    ((lat < 0.0).ternary('S', 'N'), (lon < 0.0).ternary('W', 'E'))
}

fn format_decimal(lat: f64, lon: f64, decimal_places: i32) -> String {
    let (ns, ew) = hemisphere_letters(lat, lon);
    format!(
        "{}° {}, {}° {}",
        format_value(lat.abs(), decimal_places),
        ns,
        format_value(lon.abs(), decimal_places),
        ew,
    )
}

fn format_dms(lat: f64, lon: f64, decimal_places: i32) -> String {
    let (ns, ew) = hemisphere_letters(lat, lon);
    let (lat_d, lat_m, lat_s) = split_dms(lat);
    let (lon_d, lon_m, lon_s) = split_dms(lon);

    format!(
        "{lat_d}.{lat_m}.{}{ns} {lon_d}.{lon_m}.{}{ew}",
        format_seconds(lat_s, decimal_places),
        format_seconds(lon_s, decimal_places),
    )
}

fn format_wikipedia(lat: f64, lon: f64, decimal_places: i32) -> String {
    let (ns, ew) = hemisphere_letters(lat, lon);
    let (lat_d, lat_m, lat_s) = split_dms(lat);
    let (lon_d, lon_m, lon_s) = split_dms(lon);

    format!(
        "{lat_d}°{lat_m}'{}\"{ns} {lon_d}°{lon_m}'{}\"{ew}",
        format_seconds(lat_s, decimal_places),
        format_seconds(lon_s, decimal_places),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(coord: &LatLon, lat: f64, lon: f64) -> bool {
        (coord.latitude() - lat).abs() < 1e-5 && (coord.longitude() - lon).abs() < 1e-5
    }

    #[test]
    fn chain_order_is_most_specific_first() {
        assert_eq!(
            PARSE_ORDER,
            [
                TextFormat::Mgrs,
                TextFormat::Wikipedia,
                TextFormat::Dms,
                TextFormat::Decimal,
                TextFormat::Google,
            ],
        );
    }

    #[test]
    fn decimal_variants() {
        for text in [
            "48.858° N, 2.294° E",
            "N 48.858°, E 2.294°",
            "2.294° E, 48.858° N",
            "E 2.294°, N 48.858°",
            "48.858 N 2.294 E",
        ] {
            let coord = parse(text).unwrap_or_else(|| panic!("{text} should parse"));
            assert!(close(&coord, 48.858, 2.294), "{text}");
            assert_eq!(detect_format(text), Some(TextFormat::Decimal), "{text}");
        }

        let coord = parse("48.858° S, 2.294° W").unwrap();
        assert!(close(&coord, -48.858, -2.294));
    }

    #[test]
    fn dms_variants() {
        for text in [
            "31.57.8S 115.51.32E",
            "S31.57.8 E115.51.32",
            "115.51.32E 31.57.8S",
            "E115.51.32 S31.57.8",
        ] {
            let coord = parse(text).unwrap_or_else(|| panic!("{text} should parse"));
            assert!(close(&coord, -31.952222, 115.858889), "{text}");
            assert_eq!(detect_format(text), Some(TextFormat::Dms), "{text}");
        }
    }

    #[test]
    fn wikipedia_variants() {
        for text in [
            "31°57'8\"S 115°51'32\"E",
            "S31°57'8\" E115°51'32\"",
            "115°51'32\"E 31°57'8\"S",
            "E115°51'32\" S31°57'8\"",
        ] {
            let coord = parse(text).unwrap_or_else(|| panic!("{text} should parse"));
            assert!(close(&coord, -31.952222, 115.858889), "{text}");
            assert_eq!(detect_format(text), Some(TextFormat::Wikipedia), "{text}");
        }

        // Unicode prime marks and omitted seconds
        let coord = parse("48°51′29″N 2°17′40″E").unwrap();
        assert!(close(&coord, 48.858056, 2.294444));
        let coord = parse("48°51'N 2°17'E").unwrap();
        assert!(close(&coord, 48.85, 2.283333));
    }

    #[test]
    fn google_axis_disambiguation() {
        let coord = parse("48.858, 2.294").unwrap();
        assert!(close(&coord, 48.858, 2.294));

        // First value beyond 90° can only be a longitude
        let coord = parse("115.858889 -31.952222").unwrap();
        assert!(close(&coord, -31.952222, 115.858889));

        assert!(parse("91,200").is_none());
        assert!(parse("200, 91").is_none());
    }

    #[test]
    fn mgrs_in_the_chain() {
        let coord = parse("18TWL8566411315").unwrap();
        assert!(close(&coord, 40.748333, -73.985278));
        assert_eq!(detect_format("18TWL8566411315"), Some(TextFormat::Mgrs));

        // Spaced form is compacted before decoding
        assert_eq!(detect_format("18T WL 85664 11315"), Some(TextFormat::Mgrs));

        // Shaped like MGRS but malformed stays a quiet rejection
        assert!(parse("18TIL8566411315").is_none());
    }

    #[test]
    fn rejects_junk() {
        for text in ["", "hello", "48.858°", "48.858 2.294 1.0", "1000, 1000"] {
            assert!(parse(text).is_none(), "{text:?} should not parse");
            assert!(detect_format(text).is_none(), "{text:?}");
        }
    }

    #[test]
    fn format_dispatch() {
        assert_eq!(
            format_coordinate(48.858, 2.294, TextFormat::Decimal, 3),
            "48.858° N, 2.294° E",
        );
        assert_eq!(
            format_coordinate(-31.952222, 115.858889, TextFormat::Dms, 0),
            "31.57.8S 115.51.32E",
        );
        assert_eq!(
            format_coordinate(-31.952222, 115.858889, TextFormat::Wikipedia, 0),
            "31°57'8\"S 115°51'32\"E",
        );
        assert_eq!(
            format_coordinate(48.858, 2.294, TextFormat::Google, 3),
            "48.858, 2.294",
        );
        assert_eq!(
            format_coordinate(40.748333, -73.985278, TextFormat::Mgrs, 0),
            "18TWL8566411315",
        );
    }

    #[test]
    fn polar_latitude_formats_with_the_band_sentinel() {
        // 89°N is a valid latitude but sits above every UTM band
        let text = format_coordinate(89.0, 10.0, TextFormat::Mgrs, 0);

        assert!(text.starts_with("32Z"), "{text}");
        assert!(parse(&text).is_none(), "{text} should not decode");
    }

    #[test]
    fn unknown_format_id_falls_back_to_decimal() {
        assert_eq!(TextFormat::from_id(99), TextFormat::Decimal);
        assert_eq!(TextFormat::from_id(-1), TextFormat::Decimal);
        for format in PARSE_ORDER {
            assert_eq!(TextFormat::from_id(format.id()), format);
        }
    }

    #[test]
    fn strip_trailing_zeros_mode() {
        assert_eq!(
            format_coordinate(48.5, 2.0, TextFormat::Google, -1),
            "48.5, 2",
        );
        assert_eq!(
            format_coordinate(48.5, 2.25, TextFormat::Decimal, -1),
            "48.5° N, 2.25° E",
        );
    }

    #[test]
    fn seconds_never_round_to_sixty() {
        // 29.9999..." of a second under each precision
        assert_eq!(format_seconds(59.9996, 3), "59.999");
        assert_eq!(format_seconds(59.7, 0), "59");
        assert_eq!(format_seconds(59.99999, 2), "59.99");
        assert_eq!(format_seconds(8.0, 0), "8");

        // A latitude a hair under the next minute
        let text = format_coordinate(45.0 + 59.9999 / 3600.0, 0.0, TextFormat::Wikipedia, 3);
        assert!(text.starts_with("45°0'59.999\""), "{text}");
    }

    #[test]
    fn round_trips_through_parse() {
        for format in [
            TextFormat::Decimal,
            TextFormat::Dms,
            TextFormat::Wikipedia,
            TextFormat::Google,
            TextFormat::Mgrs,
        ] {
            let text = format_coordinate(-31.952222, 115.858889, format, 4);
            let coord = parse(&text)
                .unwrap_or_else(|| panic!("{format:?} output {text:?} should parse"));
            assert!(
                (coord.latitude() + 31.952222).abs() < 1e-3,
                "{format:?}: {text}",
            );
            assert!(
                (coord.longitude() - 115.858889).abs() < 1e-3,
                "{format:?}: {text}",
            );
            assert_eq!(detect_format(&text), Some(format), "{text}");
        }
    }
}
