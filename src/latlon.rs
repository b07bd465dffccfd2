use std::fmt::Display;

use crate::{Error, ecef::Ecef, mgrs::Mgrs, spherical, utm::UtmCoordinate};

/// Representation of a WGS84 latitude/longitude point with an optional
/// altitude above the ellipsoid. Can be converted to/from [`Ecef`],
/// [`UtmCoordinate`], and [`Mgrs`].
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
    #[cfg_attr(feature = "serde", serde(default, alias = "alt"))]
    pub(crate) altitude: Option<f64>,
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
            altitude: None,
        }
    }

    /// Tries to create a latitude/longitude point from a lat/lon pair. First checks if the
    /// values are valid:
    /// * Latitude must be in range [-90,90]
    /// * Longitude must be in range [-180,180]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either latitude or longitude are invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use geocoord::LatLon;
    ///
    /// let coord = LatLon::create(40.748333, -73.985278);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.latitude(), 40.748333);
    /// assert_eq!(coord.longitude(), -73.985278);
    ///
    /// let invalid_coord_lat = LatLon::create(100.0, 0.0);
    /// assert!(invalid_coord_lat.is_err());
    ///
    /// let invalid_coord_lon = LatLon::create(0.0, -200.0);
    /// assert!(invalid_coord_lon.is_err());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        if !(-90_f64..=90_f64).contains(&lat) {
            Err(Error::InvalidCoord(format!("Latitude {lat} outside of valid range [-90, 90].")))
        } else if !(-180_f64..=180_f64).contains(&lon) {
            Err(Error::InvalidCoord(format!("Longitude {lon} outside of valid range [-180, 180].")))
        } else {
            Ok(LatLon::new(lat, lon))
        }
    }

    /// Like [`LatLon::create`], but carries an altitude in meters above the
    /// ellipsoid. The altitude participates only in ECEF conversions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either latitude or longitude are invalid.
    pub fn with_altitude(lat: f64, lon: f64, alt: f64) -> Result<LatLon, Error> {
        let mut coord = LatLon::create(lat, lon)?;
        coord.altitude = Some(alt);
        Ok(coord)
    }

    /// Creates a point from a radian coordinate, converting to degrees.
    pub fn from_radians(value: &LatLonRad) -> LatLon {
        value.to_degrees()
    }

    /// Returns the latitude value in degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude value in degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the altitude in meters, if one was supplied.
    #[inline]
    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    /// Returns whether the current point is in the northern hemisphere.
    pub fn is_north(&self) -> bool {
        self.latitude.is_sign_positive()
    }

    /// Converts this point to radians.
    ///
    /// # Example
    ///
    /// ```
    /// use geocoord::LatLon;
    ///
    /// let coord = LatLon::create(90.0, -180.0).unwrap();
    /// let rad = coord.to_radians();
    ///
    /// assert!((rad.latitude() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    /// assert!((rad.longitude() + std::f64::consts::PI).abs() < 1e-12);
    /// ```
    pub fn to_radians(&self) -> LatLonRad {
        LatLonRad {
            latitude: self.latitude.to_radians(),
            longitude: self.longitude.to_radians(),
            altitude: self.altitude,
        }
    }

    /// Returns the great-circle distance in meters to `other`, computed on
    /// the mean-radius sphere. See [`spherical::distance`].
    pub fn haversine(&self, other: &LatLon) -> f64 {
        spherical::distance(self, other)
    }

    /// Converts from [`Ecef`] to [`LatLon`]
    pub fn from_ecef(value: &Ecef) -> LatLon {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`Ecef`]
    pub fn to_ecef(&self) -> Ecef {
        Ecef::from_latlon(self)
    }

    /// Converts from [`UtmCoordinate`] to [`LatLon`]
    pub fn from_utm(value: &UtmCoordinate) -> LatLon {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`UtmCoordinate`]
    ///
    /// # Usage
    ///
    /// ```
    /// use geocoord::{LatLon, UtmCoordinate};
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    /// let converted = coord.to_utm();
    ///
    /// assert_eq!(converted.zone_number(), 18);
    /// assert_eq!(converted.zone_letter(), 'T');
    /// ```
    pub fn to_utm(&self) -> UtmCoordinate {
        UtmCoordinate::from_latlon(self)
    }

    /// Converts from [`Mgrs`] to [`LatLon`], yielding the grid cell center.
    pub fn from_mgrs(value: &Mgrs) -> LatLon {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`Mgrs`] with `precision` digits per axis
    /// (1 = 10km cells, 5 = 1m cells).
    ///
    /// # Usage
    ///
    /// ```
    /// use geocoord::LatLon;
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    ///
    /// assert_eq!(coord.to_mgrs(5).to_string(), "18TWL8566411315");
    /// ```
    pub fn to_mgrs(&self, precision: usize) -> Mgrs {
        Mgrs::from_latlon(self, precision)
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        write!(
            f,
            "{lat} {lon}",
        )
    }
}

/// A latitude/longitude point in radians. Mirrors [`LatLon`] exactly;
/// conversion between the two is pure and lossless up to float rounding.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLonRad {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) altitude: Option<f64>,
}

impl LatLonRad {
    /// Returns the latitude value in radians.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude value in radians.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Converts this point to degrees.
    pub fn to_degrees(&self) -> LatLon {
        LatLon {
            latitude: self.latitude.to_degrees(),
            longitude: self.longitude.to_degrees(),
            altitude: self.altitude,
        }
    }
}

/// A latitude/longitude bounding box in degrees, returned by grid-cell
/// inverse queries and [`spherical::bounds`].
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Bounds {
    /// Center of the box as a point.
    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.top + self.bottom) / 2.0,
            (self.left + self.right) / 2.0,
        )
    }
}
