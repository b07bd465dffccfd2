use std::{fmt::Display, str::FromStr};

use num::Integer;

use crate::{
    latlon::{Bounds, LatLon},
    utm::UtmCoordinate,
    Error,
};

/// The 100km letter scheme repeats over this many UTM zones.
const NUM_100K_SETS: i32 = 6;
/// Per-set origin letters for 100km columns (I and O never appear).
const SET_ORIGIN_COLUMN_LETTERS: &[u8] = b"AJSAJS";
/// Per-set origin letters for 100km rows.
const SET_ORIGIN_ROW_LETTERS: &[u8] = b"AFAFAF";

const ASCII_A: u8 = b'A';
const ASCII_I: u8 = b'I';
const ASCII_O: u8 = b'O';
const ASCII_V: u8 = b'V';
const ASCII_Z: u8 = b'Z';

/// Size of a 100km tile in meters.
const TILE: f64 = 100_000.0;
/// The 100km row letters repeat with this period going north, in meters.
const ROW_PERIOD_M: f64 = 2_000_000.0;

/// Representation of an
/// [MGRS](https://en.wikipedia.org/wiki/Military_Grid_Reference_System)
/// grid reference: a UTM coordinate plus a precision of up to 5 digits
/// per axis (100km cells down to 1m cells; 0 digits names the bare
/// 100km square). The textual form is produced by `Display` and parsed
/// by `FromStr`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mgrs {
    pub(crate) utm: UtmCoordinate,
    pub(crate) precision: usize,
}

impl Mgrs {
    /// Returns the underlying zone number.
    pub fn zone_number(&self) -> i32 {
        self.utm.zone_number
    }

    /// Returns the underlying latitude band letter.
    pub fn zone_letter(&self) -> char {
        self.utm.zone_letter
    }

    /// Returns the underlying easting in meters.
    pub fn easting(&self) -> f64 {
        self.utm.easting
    }

    /// Returns the underlying northing in meters.
    pub fn northing(&self) -> f64 {
        self.utm.northing
    }

    /// Returns the precision in digits per axis, up to 5 (1m). A bare
    /// 100km square reference parsed without digits has precision 0.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Parses an MGRS string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMgrs`] for a malformed reference; see
    /// [`Mgrs::from_str`].
    ///
    /// # Usage
    ///
    /// ```
    /// use geocoord::Mgrs;
    ///
    /// let coord = Mgrs::parse_str("18TWL8566411315").unwrap();
    ///
    /// assert_eq!(coord.zone_number(), 18);
    /// assert_eq!(coord.zone_letter(), 'T');
    /// assert!((coord.easting() - 585664.0).abs() < 1e-6);
    /// assert!((coord.northing() - 4511315.0).abs() < 1e-6);
    /// assert_eq!(coord.precision(), 5);
    /// ```
    pub fn parse_str(mgrs_str: &str) -> Result<Mgrs, Error> {
        Self::from_str(mgrs_str)
    }

    /// Converts from [`LatLon`] to [`Mgrs`]. Precision is clamped into
    /// `[1, 5]`.
    pub fn from_latlon(value: &LatLon, precision: usize) -> Mgrs {
        Mgrs {
            utm: UtmCoordinate::from_latlon(value),
            precision: precision.clamp(1, 5),
        }
    }

    /// Converts from [`Mgrs`] to [`LatLon`], yielding the center of the
    /// grid cell when the coordinate carries an accuracy and the cell
    /// corner point otherwise.
    pub fn to_latlon(&self) -> LatLon {
        match self.utm.to_bounds() {
            Some(bounds) => bounds.center(),
            None => self.utm.to_latlon(),
        }
    }

    /// Returns the latitude/longitude box of the grid cell, or `None`
    /// when the underlying UTM coordinate carries no accuracy.
    pub fn to_bounds(&self) -> Option<Bounds> {
        self.utm.to_bounds()
    }

    /// Converts from [`UtmCoordinate`] to [`Mgrs`]. Precision is clamped
    /// into `[1, 5]`.
    pub fn from_utm(value: &UtmCoordinate, precision: usize) -> Mgrs {
        Mgrs {
            utm: *value,
            precision: precision.clamp(1, 5),
        }
    }

    /// Converts from [`Mgrs`] to [`UtmCoordinate`]
    pub fn to_utm(&self) -> UtmCoordinate {
        self.utm
    }
}

/// Returns which of the six letter-origin sets a UTM zone uses.
pub(crate) fn get_100k_set_for_zone(zone_number: i32) -> usize {
    #[allow(clippy::cast_sign_loss)]
    let set = zone_number.mod_floor(&NUM_100K_SETS) as usize;
    if set == 0 { NUM_100K_SETS as usize } else { set }
}

/// Returns the two-letter 100km square designator for an easting/northing
/// within a UTM zone.
///
/// # Errors
///
/// Returns [`Error::InvalidMgrs`] if the letter offset would wrap the
/// alphabet a second time, which cannot happen for an easting below
/// 1,000km and means the input is not a representable UTM position.
pub fn get_100k_id(easting: f64, northing: f64, zone_number: i32) -> Result<String, Error> {
    let set = get_100k_set_for_zone(zone_number);

    #[allow(clippy::cast_possible_truncation)]
    let column = (easting / TILE).floor() as i32;
    #[allow(clippy::cast_possible_truncation)]
    let row = ((northing / TILE).floor() as i32).mod_floor(&20);

    let col_letter = offset_letter(
        SET_ORIGIN_COLUMN_LETTERS[set - 1],
        column - 1,
        ASCII_Z,
    )?;
    let row_letter = offset_letter(
        SET_ORIGIN_ROW_LETTERS[set - 1],
        row,
        ASCII_V,
    )?;

    Ok(format!("{}{}", col_letter as char, row_letter as char))
}

/// Advances `steps` letters from `origin`, skipping I and O and wrapping
/// once past `last` back to A. A second wrap is a hard error.
fn offset_letter(origin: u8, steps: i32, last: u8) -> Result<u8, Error> {
    let mut cur = origin;
    let mut rollover = false;

    for _ in 0..steps {
        cur += 1;
        if cur == ASCII_I {
            cur += 1;
        }
        if cur == ASCII_O {
            cur += 1;
        }
        if cur > last {
            if rollover {
                return Err(Error::InvalidMgrs(format!(
                    "Bad character: offset {steps} from {} wraps twice",
                    origin as char,
                )));
            }
            cur = ASCII_A;
            rollover = true;
        }
    }

    Ok(cur)
}

/// Inverts a 100km column letter back to its easting base in meters.
fn easting_from_char(ch: u8, set: usize) -> Result<f64, Error> {
    let mut cur = SET_ORIGIN_COLUMN_LETTERS[set - 1];
    let mut easting = TILE;
    let mut rewind = false;

    while cur != ch {
        cur += 1;
        if cur == ASCII_I {
            cur += 1;
        }
        if cur == ASCII_O {
            cur += 1;
        }
        if cur > ASCII_Z {
            if rewind {
                return Err(Error::InvalidMgrs(format!("Bad character: {}", ch as char)));
            }
            cur = ASCII_A;
            rewind = true;
        }
        easting += TILE;
    }

    Ok(easting)
}

/// Inverts a 100km row letter back to its northing base in meters. The
/// result repeats every 2,000,000 m; the caller disambiguates with the
/// zone letter's minimum northing.
fn northing_from_char(ch: u8, set: usize) -> Result<f64, Error> {
    if ch > ASCII_V {
        return Err(Error::InvalidMgrs(format!(
            "Invalid northing letter {}",
            ch as char,
        )));
    }

    let mut cur = SET_ORIGIN_ROW_LETTERS[set - 1];
    let mut northing = 0.0;
    let mut rewind = false;

    while cur != ch {
        cur += 1;
        if cur == ASCII_I {
            cur += 1;
        }
        if cur == ASCII_O {
            cur += 1;
        }
        if cur > ASCII_V {
            if rewind {
                return Err(Error::InvalidMgrs(format!("Bad character: {}", ch as char)));
            }
            cur = ASCII_A;
            rewind = true;
        }
        northing += TILE;
    }

    Ok(northing)
}

/// Minimum northing in meters for each latitude band letter, used to
/// resolve the 2,000,000 m row-letter ambiguity.
fn min_northing(zone_letter: char) -> Result<f64, Error> {
    let northing = match zone_letter {
        'C' => 1_100_000.0,
        'D' => 2_000_000.0,
        'E' => 2_800_000.0,
        'F' => 3_700_000.0,
        'G' => 4_600_000.0,
        'H' => 5_500_000.0,
        'J' => 6_400_000.0,
        'K' => 7_300_000.0,
        'L' => 8_200_000.0,
        'M' => 9_100_000.0,
        'N' => 0.0,
        'P' => 800_000.0,
        'Q' => 1_700_000.0,
        'R' => 2_600_000.0,
        'S' => 3_500_000.0,
        'T' => 4_400_000.0,
        'U' => 5_300_000.0,
        'V' => 6_200_000.0,
        'W' => 7_000_000.0,
        'X' => 7_900_000.0,
        _ => {
            return Err(Error::InvalidMgrs(format!(
                "Invalid zone letter {zone_letter}",
            )))
        }
    };

    Ok(northing)
}

impl FromStr for Mgrs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.to_ascii_uppercase();
        let chars = value.as_bytes();
        let len = chars.len();

        if len == 0 {
            return Err(Error::InvalidMgrs("Empty string".to_string()));
        }

        // 1-2 leading digits of zone number
        let mut p = 0;
        let mut zone_number = 0i32;
        while p < len && chars[p].is_ascii_digit() {
            if p >= 2 {
                return Err(Error::InvalidMgrs(format!(
                    "More than 2 digits at start of MGRS {}",
                    &value[..=p],
                )));
            }
            zone_number = 10 * zone_number + i32::from(chars[p] - b'0');
            p += 1;
        }

        if p == 0 {
            return Err(Error::InvalidMgrs(format!("Missing zone number in {value}")));
        }
        if !(1..=60).contains(&zone_number) {
            return Err(Error::InvalidMgrs(format!("Zone {zone_number} not in [1,60]")));
        }
        if p + 3 > len {
            return Err(Error::InvalidMgrs(format!("Too short: {value}")));
        }

        let zone_letter = chars[p] as char;
        p += 1;
        if zone_letter <= 'A'
            || zone_letter == 'B'
            || zone_letter == 'Y'
            || zone_letter >= 'Z'
            || zone_letter == 'I'
            || zone_letter == 'O'
        {
            return Err(Error::InvalidMgrs(format!(
                "Zone letter {zone_letter} not handled in {value}",
            )));
        }

        let set = get_100k_set_for_zone(zone_number);
        let east_100k = easting_from_char(chars[p], set)?;
        let mut north_100k = northing_from_char(chars[p + 1], set)?;
        p += 2;

        // The row letters repeat every 2,000,000 m going north; shift up
        // until the northing is plausible for the latitude band.
        let floor = min_northing(zone_letter)?;
        while north_100k < floor {
            north_100k += ROW_PERIOD_M;
        }
        if north_100k > floor {
            log::debug!(
                "resolved 100km row ambiguity for band {zone_letter}: northing base {north_100k}",
            );
        }

        if !chars[p..].iter().all(u8::is_ascii_digit) {
            return Err(Error::InvalidMgrs(format!(
                "Encountered a non-digit in {}",
                &value[p..],
            )));
        }

        let remainder = len - p;
        if remainder % 2 != 0 {
            return Err(Error::InvalidMgrs(format!(
                "Not an even number of digits in {}",
                &value[p..],
            )));
        }

        let sep = remainder / 2;
        if sep > 5 {
            return Err(Error::InvalidMgrs(format!(
                "More than 10 digits in {}",
                &value[p..],
            )));
        }

        let mut accuracy = TILE;
        let mut sep_easting = 0.0;
        let mut sep_northing = 0.0;

        if sep > 0 {
            accuracy = TILE / 10_f64.powi(i32::try_from(sep).unwrap_or(5));

            let easting_digits = &value[p..p + sep];
            let northing_digits = &value[p + sep..];

            sep_easting = easting_digits.parse::<f64>().map_err(|_| {
                Error::InvalidMgrs(format!("Encountered a non-digit in {}", &value[p..]))
            })? * accuracy;
            sep_northing = northing_digits.parse::<f64>().map_err(|_| {
                Error::InvalidMgrs(format!("Encountered a non-digit in {}", &value[p..]))
            })? * accuracy;
        }

        let utm = UtmCoordinate::new(
            east_100k + sep_easting,
            north_100k + sep_northing,
            zone_number,
            zone_letter,
        )
        .with_accuracy(accuracy);

        Ok(Mgrs {
            utm,
            precision: sep,
        })
    }
}

impl Display for Mgrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let precision = self.precision.min(5);

        #[allow(clippy::cast_possible_truncation)]
        let easting = self.utm.easting.floor() as i64;
        #[allow(clippy::cast_possible_truncation)]
        let northing = self.utm.northing.floor() as i64;

        // In-range UTM coordinates can never wrap the letter alphabet twice
        let square = get_100k_id(self.utm.easting, self.utm.northing, self.utm.zone_number)
            .expect("Invalid coords");

        let sub_easting = format!("{:05}", easting.mod_floor(&100_000));
        let sub_northing = format!("{:05}", northing.mod_floor(&100_000));

        write!(
            f,
            "{}{}{}{}{}",
            self.utm.zone_number,
            self.utm.zone_letter,
            square,
            &sub_easting[..precision],
            &sub_northing[..precision],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reference_point() {
        let coord = LatLon::create(40.748333, -73.985278).unwrap();
        assert_eq!(Mgrs::from_latlon(&coord, 5).to_string(), "18TWL8566411315");
        assert_eq!(Mgrs::from_latlon(&coord, 3).to_string(), "18TWL856113");
        assert_eq!(Mgrs::from_latlon(&coord, 1).to_string(), "18TWL81");
    }

    #[test]
    fn set_repeats_every_six_zones() {
        assert_eq!(get_100k_set_for_zone(1), 1);
        assert_eq!(get_100k_set_for_zone(6), 6);
        assert_eq!(get_100k_set_for_zone(7), 1);
        assert_eq!(get_100k_set_for_zone(18), 6);
        assert_eq!(get_100k_set_for_zone(60), 6);
    }

    #[test]
    fn hundred_k_id_skips_i_and_o() {
        // Set 1 columns start at A; the 9th column steps over I
        let id = get_100k_id(950_000.0, 50_000.0, 1).unwrap();
        assert_eq!(id, "JA");

        // Row 14 of set 1 steps over both I and O on the way to Q
        let id = get_100k_id(950_000.0, 1_450_000.0, 1).unwrap();
        assert_eq!(id, "JQ");
    }

    #[test]
    fn decode_resolves_row_ambiguity() {
        let coord = Mgrs::parse_str("18TWL8566411315").unwrap();
        // The L row alone only fixes northing mod 2,000,000; band T pins it
        assert!((coord.northing() - 4_511_315.0).abs() < 1e-6);
    }

    #[test]
    fn decode_rejects_invalid_zone_letters() {
        for bad in ["18A12341234", "18B12341234", "18I12341234", "18O12341234", "18Y12341234", "18Z12341234"] {
            assert!(Mgrs::parse_str(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn decode_rejects_odd_digit_count() {
        assert!(Mgrs::parse_str("18TWL856641131").is_err());
    }

    #[test]
    fn decode_rejects_bad_square_letters() {
        // I is never a valid column letter
        assert!(Mgrs::parse_str("18TIL8566411315").is_err());
        // W is past V and never a valid row letter
        assert!(Mgrs::parse_str("18TWW8566411315").is_err());
    }

    #[test]
    fn decode_rejects_missing_zone() {
        assert!(Mgrs::parse_str("TWL8566411315").is_err());
        assert!(Mgrs::parse_str("123TWL85664113").is_err());
        assert!(Mgrs::parse_str("61TWL8566411315").is_err());
    }

    #[test]
    fn bare_square_reference_round_trips() {
        let coord = Mgrs::parse_str("18TWL").unwrap();

        assert_eq!(coord.precision(), 0);
        assert!((coord.to_utm().accuracy().unwrap() - 100_000.0).abs() < 1e-9);
        assert_eq!(coord.to_string(), "18TWL");
    }

    #[test]
    fn decode_accuracy_tracks_digit_count() {
        for (s, accuracy) in [
            ("18TWL8566411315", 1.0),
            ("18TWL856113", 100.0),
            ("18TWL81", 10_000.0),
            ("18TWL", 100_000.0),
        ] {
            let coord = Mgrs::parse_str(s).unwrap();
            let cell = coord.to_utm().accuracy().unwrap();
            assert!((cell - accuracy).abs() < 1e-9, "{s}: {cell} != {accuracy}");
        }
    }
}
