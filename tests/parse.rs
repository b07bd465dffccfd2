//! End-to-end checks of the free-text parser chain and the formatters,
//! driven through the crate's public surface.

use geocoord::{detect_format, format_coordinate, parse, text, TextFormat};

#[test]
fn parses_decimal_with_hemisphere_letters() {
    let coord = parse("48.858° N, 2.294° E").unwrap();

    assert!((coord.latitude() - 48.858).abs() < 1e-9);
    assert!((coord.longitude() - 2.294).abs() < 1e-9);
}

#[test]
fn parses_prefixed_symbol_dms() {
    let coord = parse("S31°57'8\" E115°51'32\"").unwrap();

    assert!((coord.latitude() - -31.952222).abs() < 1e-5);
    assert!((coord.longitude() - 115.858889).abs() < 1e-5);
}

#[test]
fn formats_dotted_dms() {
    assert_eq!(
        format_coordinate(-31.952222, 115.858889, TextFormat::Dms, 0),
        "31.57.8S 115.51.32E",
    );
}

#[test]
fn oversized_bare_pair_is_rejected() {
    // 91 cannot be a latitude and 200 cannot be anything
    assert!(parse("91,200").is_none());
    assert!(detect_format("91,200").is_none());
}

#[test]
fn bare_pair_swaps_axes_when_first_value_is_a_longitude() {
    let coord = parse("115.858889, -31.952222").unwrap();

    assert!((coord.latitude() - -31.952222).abs() < 1e-9);
    assert!((coord.longitude() - 115.858889).abs() < 1e-9);
}

#[test]
fn chain_prefers_more_specific_grammars() {
    assert_eq!(
        text::PARSE_ORDER,
        [
            TextFormat::Mgrs,
            TextFormat::Wikipedia,
            TextFormat::Dms,
            TextFormat::Decimal,
            TextFormat::Google,
        ],
    );

    // A dotted DMS string must never be consumed by the decimal grammar
    assert_eq!(detect_format("31.57.8S 115.51.32E"), Some(TextFormat::Dms));
    // A grid reference must never be consumed by the numeric grammars
    assert_eq!(detect_format("18TWL8566411315"), Some(TextFormat::Mgrs));
}

#[test]
fn detects_each_format() {
    let cases = [
        ("48.858° N, 2.294° E", TextFormat::Decimal),
        ("31.57.8S 115.51.32E", TextFormat::Dms),
        ("48°51'29\"N 2°17'40\"E", TextFormat::Wikipedia),
        ("48.858, 2.294", TextFormat::Google),
        ("18TWL8566411315", TextFormat::Mgrs),
    ];

    for (text, expected) in cases {
        assert_eq!(detect_format(text), Some(expected), "{text}");
    }
}

#[test]
fn seconds_display_never_reaches_sixty() {
    // Just under the next whole minute at every precision
    let lat = 45.0 + (59.0 + 59.9999 / 60.0) / 60.0;

    for places in 0..=3 {
        let text = format_coordinate(lat, 0.0, TextFormat::Wikipedia, places);
        assert!(!text.contains("60\"") && !text.contains("60.0"), "{text}");
    }
}

#[test]
fn formatted_mgrs_parses_back() {
    let text = format_coordinate(40.748333, -73.985278, TextFormat::Mgrs, 0);
    assert_eq!(text, "18TWL8566411315");

    let coord = parse(&text).unwrap();
    assert!((coord.latitude() - 40.748333).abs() < 1e-4);
    assert!((coord.longitude() - -73.985278).abs() < 1e-4);
}
