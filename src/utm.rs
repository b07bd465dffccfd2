use std::fmt::Display;

use crate::{
    constants::{UTM_E2, UTM_FALSE_EASTING, UTM_FALSE_NORTHING, UTM_K0, WGS84_A},
    latlon::{Bounds, LatLon},
    mgrs::Mgrs,
    Error, ThisOrThat,
};

/// Latitude band letters, 8° bands from 80°S up to 84°N (the X band is
/// 12° tall). I and O are skipped.
const BAND_LETTERS: &str = "CDEFGHJKLMNPQRSTUVWX";

/// Sentinel band letter for latitudes outside the UTM bands. Never emitted
/// for a latitude in `[-80, 84]`.
pub const OUT_OF_BAND: char = 'Z';

/// Representation of a WGS84
/// [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
/// point. The optional accuracy, in meters, marks the coordinate as a grid
/// cell of that size rather than a point, and drives [`UtmCoordinate::to_bounds`].
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtmCoordinate {
    pub(crate) easting: f64,
    pub(crate) northing: f64,
    pub(crate) zone_number: i32,
    pub(crate) zone_letter: char,
    pub(crate) accuracy: Option<f64>,
}

impl UtmCoordinate {
    /// Internal-only constructor that doesn't check the coordinate
    pub(crate) fn new(easting: f64, northing: f64, zone_number: i32, zone_letter: char) -> UtmCoordinate {
        Self {
            easting,
            northing,
            zone_number,
            zone_letter,
            accuracy: None,
        }
    }

    /// Tries to create a UTM point from its constituent parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUtmCoords`] if the zone number is outside
    /// `[1, 60]`, the zone letter is not one of `C`-`X` (minus `I`/`O`), or
    /// easting/northing fall outside the representable grid.
    ///
    /// # Usage
    ///
    /// ```
    /// use geocoord::UtmCoordinate;
    ///
    /// let coord = UtmCoordinate::create(585664.1, 4511315.4, 18, 'T');
    /// assert!(coord.is_ok());
    ///
    /// assert!(UtmCoordinate::create(585664.1, 4511315.4, 0, 'T').is_err());
    /// assert!(UtmCoordinate::create(585664.1, 4511315.4, 18, 'I').is_err());
    /// ```
    pub fn create(easting: f64, northing: f64, zone_number: i32, zone_letter: char) -> Result<UtmCoordinate, Error> {
        if !(1..=60).contains(&zone_number) {
            return Err(Error::InvalidUtmCoords(format!("Zone {zone_number} not in range [1, 60]")));
        }

        let zone_letter = zone_letter.to_ascii_uppercase();
        if !BAND_LETTERS.contains(zone_letter) {
            return Err(Error::InvalidUtmCoords(format!("Zone letter {zone_letter} not in set {BAND_LETTERS}")));
        }

        if !(0_f64..1_000_000_f64).contains(&easting) {
            return Err(Error::InvalidUtmCoords(format!(
                "Easting {:.2}km not in range [0km, 1000km)",
                easting / 1000.0,
            )));
        }

        if !(0_f64..=10_000_000_f64).contains(&northing) {
            return Err(Error::InvalidUtmCoords(format!(
                "Northing {:.2}km not in range [0km, 10000km]",
                northing / 1000.0,
            )));
        }

        Ok(UtmCoordinate::new(easting, northing, zone_number, zone_letter))
    }

    /// Returns a copy carrying an accuracy in meters, marking the
    /// coordinate as a grid cell of that size.
    pub fn with_accuracy(mut self, accuracy: f64) -> UtmCoordinate {
        self.accuracy = Some(accuracy);
        self
    }

    /// Returns the UTM easting in meters.
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// Returns the UTM northing in meters.
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Returns the UTM zone number, 1 through 60.
    pub fn zone_number(&self) -> i32 {
        self.zone_number
    }

    /// Returns the latitude band letter, `C`-`X` minus `I`/`O`.
    pub fn zone_letter(&self) -> char {
        self.zone_letter
    }

    /// Returns the cell accuracy in meters, if the coordinate carries one.
    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    /// Returns whether the coordinate is in the northern hemisphere. Bands
    /// `N` and above are northern.
    pub fn is_north(&self) -> bool {
        self.zone_letter >= 'N'
    }

    /// Converts from [`LatLon`] to [`UtmCoordinate`] with the standard
    /// 6th-order Transverse Mercator series.
    ///
    /// The zone number is `floor((lon+180)/6)+1`, with three overrides
    /// applied in order: longitude exactly 180° maps to zone 60; southwest
    /// Norway (56-64°N, 3-12°E) maps to zone 32; Svalbard (72-84°N) maps
    /// to zones {31,33,35,37} by longitude band.
    ///
    /// # Usage
    ///
    /// ```
    /// use geocoord::{LatLon, UtmCoordinate};
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    /// let converted = UtmCoordinate::from_latlon(&coord);
    ///
    /// assert_eq!(converted.zone_number(), 18);
    /// assert_eq!(converted.zone_letter(), 'T');
    /// assert!((converted.easting() - 585664.1).abs() < 0.5);
    /// assert!((converted.northing() - 4511315.4).abs() < 0.5);
    /// ```
    pub fn from_latlon(value: &LatLon) -> UtmCoordinate {
        let lat = value.latitude;
        let lon = value.longitude;
        let lat_rad = lat.to_radians();

        #[allow(clippy::cast_possible_truncation)]
        let mut zone_number = ((lon + 180.0) / 6.0).floor() as i32 + 1;

        if lon == 180.0 {
            zone_number = 60;
        }

        // The Norway exception
        if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
            zone_number = 32;
        }

        // The Svalbard exception
        if (72.0..84.0).contains(&lat) {
            if (0.0..9.0).contains(&lon) {
                zone_number = 31;
            } else if (9.0..21.0).contains(&lon) {
                zone_number = 33;
            } else if (21.0..33.0).contains(&lon) {
                zone_number = 35;
            } else if (33.0..42.0).contains(&lon) {
                zone_number = 37;
            }
        }

        let lon_origin = central_meridian(zone_number);
        let lon_origin_rad = lon_origin.to_radians();

        let ecc = UTM_E2;
        let ecc_prime = ecc / (1.0 - ecc);

        let n = WGS84_A / (1.0 - ecc * lat_rad.sin().powi(2)).sqrt();
        let t = lat_rad.tan().powi(2);
        let c = ecc_prime * lat_rad.cos().powi(2);
        let a = lat_rad.cos() * (lon.to_radians() - lon_origin_rad);

        let m = WGS84_A * (
            (1.0 - ecc / 4.0 - 3.0 * ecc.powi(2) / 64.0 - 5.0 * ecc.powi(3) / 256.0) * lat_rad
            - (3.0 * ecc / 8.0 + 3.0 * ecc.powi(2) / 32.0 + 45.0 * ecc.powi(3) / 1024.0) * (2.0 * lat_rad).sin()
            + (15.0 * ecc.powi(2) / 256.0 + 45.0 * ecc.powi(3) / 1024.0) * (4.0 * lat_rad).sin()
            - (35.0 * ecc.powi(3) / 3072.0) * (6.0 * lat_rad).sin()
        );

        let easting = UTM_K0 * n * (
            a
            + (1.0 - t + c) * a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t.powi(2) + 72.0 * c - 58.0 * ecc_prime) * a.powi(5) / 120.0
        ) + UTM_FALSE_EASTING;

        let northing = UTM_K0 * (
            m + n * lat_rad.tan() * (
                a.powi(2) / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c.powi(2)) * a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t.powi(2) + 600.0 * c - 330.0 * ecc_prime) * a.powi(6) / 720.0
            )
        ) + (lat < 0.0).ternary(UTM_FALSE_NORTHING, 0.0);

        UtmCoordinate::new(easting, northing, zone_number, zone_letter_for(lat))
    }

    /// Converts from [`UtmCoordinate`] to [`LatLon`] with the inverse
    /// Krüger series through the footpoint latitude. The hemisphere is
    /// decided by the zone letter: bands lexically before `N` are southern
    /// and shed the 10,000,000 m false northing first.
    ///
    /// # Usage
    ///
    /// ```
    /// use geocoord::{LatLon, UtmCoordinate};
    ///
    /// let coord = UtmCoordinate::create(585664.1, 4511315.4, 18, 'T').unwrap();
    /// let converted = coord.to_latlon();
    ///
    /// assert!((converted.latitude() - 40.748333).abs() < 1e-5);
    /// assert!((converted.longitude() + 73.985278).abs() < 1e-5);
    /// ```
    pub fn to_latlon(&self) -> LatLon {
        let ecc = UTM_E2;
        let ecc_prime = ecc / (1.0 - ecc);
        let e1 = (1.0 - (1.0 - ecc).sqrt()) / (1.0 + (1.0 - ecc).sqrt());

        let x = self.easting - UTM_FALSE_EASTING;
        let mut y = self.northing;
        if !self.is_north() {
            y -= UTM_FALSE_NORTHING;
        }

        let lon_origin = central_meridian(self.zone_number);

        // Footpoint latitude
        let m = y / UTM_K0;
        let mu = m / (WGS84_A * (1.0 - ecc / 4.0 - 3.0 * ecc.powi(2) / 64.0 - 5.0 * ecc.powi(3) / 256.0));

        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin();

        let n1 = WGS84_A / (1.0 - ecc * phi1.sin().powi(2)).sqrt();
        let t1 = phi1.tan().powi(2);
        let c1 = ecc_prime * phi1.cos().powi(2);
        let r1 = WGS84_A * (1.0 - ecc) / (1.0 - ecc * phi1.sin().powi(2)).powf(1.5);
        let d = x / (n1 * UTM_K0);

        let lat = phi1 - (n1 * phi1.tan() / r1) * (
            d.powi(2) / 2.0
            - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ecc_prime) * d.powi(4) / 24.0
            + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2) - 252.0 * ecc_prime - 3.0 * c1.powi(2)) * d.powi(6) / 720.0
        );

        let lon = (
            d
            - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ecc_prime + 24.0 * t1.powi(2)) * d.powi(5) / 120.0
        ) / phi1.cos();

        LatLon::new(lat.to_degrees(), lon_origin + lon.to_degrees())
    }

    /// Returns the latitude/longitude box of the grid cell this coordinate
    /// names, or `None` when the coordinate carries no accuracy. The
    /// inverse transform runs twice, at the cell corner and offset by
    /// +accuracy on both axes.
    pub fn to_bounds(&self) -> Option<Bounds> {
        let accuracy = self.accuracy?;

        let sw = self.to_latlon();
        let ne = UtmCoordinate::new(
            self.easting + accuracy,
            self.northing + accuracy,
            self.zone_number,
            self.zone_letter,
        )
        .to_latlon();

        Some(Bounds {
            top: ne.latitude,
            right: ne.longitude,
            bottom: sw.latitude,
            left: sw.longitude,
        })
    }

    /// Converts from [`Mgrs`] to [`UtmCoordinate`]
    pub fn from_mgrs(value: &Mgrs) -> UtmCoordinate {
        value.utm
    }

    /// Converts from [`UtmCoordinate`] to [`Mgrs`] with `precision` digits
    /// per axis.
    pub fn to_mgrs(&self, precision: usize) -> Mgrs {
        Mgrs {
            utm: *self,
            precision,
        }
    }
}

pub(crate) fn central_meridian(zone: i32) -> f64 {
    6.0 * f64::from(zone) - 183.
}

/// Returns the latitude band letter for a latitude in degrees, or the
/// [`OUT_OF_BAND`] sentinel for latitudes outside `[-80, 84]`.
pub fn zone_letter_for(lat: f64) -> char {
    if !(-80.0..=84.0).contains(&lat) {
        return OUT_OF_BAND;
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let idx = (((lat + 80.0) / 8.0).floor() as usize).min(19);
    BAND_LETTERS.as_bytes()[idx] as char
}

impl Display for UtmCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            self.zone_number,
            self.zone_letter,
            self.easting,
            self.northing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antimeridian_forces_zone_60() {
        let coord = LatLon::create(0.0, 180.0).unwrap();
        assert_eq!(UtmCoordinate::from_latlon(&coord).zone_number(), 60);
    }

    #[test]
    fn norway_exception() {
        // Bergen-ish, would be zone 31 by the plain formula
        let coord = LatLon::create(60.39, 5.32).unwrap();
        assert_eq!(UtmCoordinate::from_latlon(&coord).zone_number(), 32);

        // Just south of the band, the plain formula holds
        let coord = LatLon::create(55.9, 5.32).unwrap();
        assert_eq!(UtmCoordinate::from_latlon(&coord).zone_number(), 31);
    }

    #[test]
    fn svalbard_exception() {
        for (lon, zone) in [(5.0, 31), (15.0, 33), (25.0, 35), (35.0, 37)] {
            let coord = LatLon::create(78.0, lon).unwrap();
            assert_eq!(UtmCoordinate::from_latlon(&coord).zone_number(), zone);
        }
    }

    #[test]
    fn southern_hemisphere_offset() {
        let coord = LatLon::create(-33.865143, 151.209900).unwrap();
        let utm = UtmCoordinate::from_latlon(&coord);

        assert_eq!(utm.zone_number(), 56);
        assert_eq!(utm.zone_letter(), 'H');
        assert!(!utm.is_north());
        assert!(utm.northing() > 6_000_000.0);

        let back = utm.to_latlon();
        assert!((back.latitude() - coord.latitude()).abs() < 1e-6);
        assert!((back.longitude() - coord.longitude()).abs() < 1e-6);
    }

    #[test]
    fn band_letters_cover_the_utm_range() {
        assert_eq!(zone_letter_for(-80.0), 'C');
        assert_eq!(zone_letter_for(-0.1), 'M');
        assert_eq!(zone_letter_for(0.0), 'N');
        assert_eq!(zone_letter_for(45.0), 'T');
        assert_eq!(zone_letter_for(72.0), 'X');
        assert_eq!(zone_letter_for(84.0), 'X');

        assert_eq!(zone_letter_for(-80.1), OUT_OF_BAND);
        assert_eq!(zone_letter_for(84.1), OUT_OF_BAND);
    }

    #[test]
    fn bounds_require_accuracy() {
        let utm = UtmCoordinate::create(585664.1, 4511315.4, 18, 'T').unwrap();
        assert!(utm.to_bounds().is_none());

        let cell = utm.with_accuracy(1000.0);
        let bounds = cell.to_bounds().unwrap();
        assert!(bounds.top > bounds.bottom);
        assert!(bounds.right > bounds.left);
    }
}
