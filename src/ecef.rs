use crate::{constants::{WGS84_A, WGS84_B, WGS84_E2}, latlon::LatLon};

/// Horizontal radius below which a point is considered to lie on the polar
/// axis and the iterative inverse would divide by ~0.
const POLAR_AXIS_EPS: f64 = 1e-6;

/// Convergence tolerance on successive latitude deltas, in radians.
const LATITUDE_TOL: f64 = 1e-6;

/// Cap on the geodetic latitude refinement loop.
const MAX_ITERATIONS: usize = 5;

/// Radii of curvature of the ellipsoid at a geodetic latitude.
///
/// Note that the engine's ECEF family carries a zero flattening, so all
/// three radii collapse to the semi-major axis; the formulas are kept in
/// their general ellipsoidal form.
#[derive(Clone, Copy, Debug)]
pub struct Radii {
    /// Gaussian mean radius, `sqrt(m * n)`
    pub r: f64,
    /// Meridional radius of curvature
    pub m: f64,
    /// Prime-vertical radius of curvature
    pub n: f64,
}

/// Computes the ellipsoid radii of curvature at a geodetic latitude given
/// in radians.
pub fn radii_of_curvature(lat_rad: f64) -> Radii {
    let sin_lat = lat_rad.sin();
    let denom = 1.0 - WGS84_E2 * sin_lat.powi(2);

    let n = WGS84_A / denom.sqrt();
    let m = WGS84_A * (1.0 - WGS84_E2) / denom.powf(1.5);

    Radii {
        r: (m * n).sqrt(),
        m,
        n,
    }
}

/// An Earth-Centered, Earth-Fixed Cartesian point in meters. The origin is
/// Earth's center of mass, +x passes through the prime meridian at the
/// equator, and +z through the north pole.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ecef {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) z: f64,
}

impl Ecef {
    pub fn create(x: f64, y: f64, z: f64) -> Ecef {
        Self { x, y, z }
    }

    /// Returns the x component in meters.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y component in meters.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns the z component in meters.
    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Converts from [`LatLon`] to [`Ecef`] with the closed-form transform.
    /// An altitude on the point is taken as meters above the ellipsoid;
    /// a missing altitude means the surface.
    ///
    /// # Usage
    ///
    /// ```
    /// use geocoord::{Ecef, LatLon};
    ///
    /// let coord = LatLon::create(0.0, 0.0).unwrap();
    /// let ecef = Ecef::from_latlon(&coord);
    ///
    /// // On the prime meridian at the equator, x is the Earth radius
    /// assert!((ecef.x() - 6_378_137.0).abs() < 1e-6);
    /// assert!(ecef.y().abs() < 1e-6);
    /// assert!(ecef.z().abs() < 1e-6);
    /// ```
    pub fn from_latlon(value: &LatLon) -> Ecef {
        let rad = value.to_radians();
        let alt = value.altitude.unwrap_or(0.0);

        let (sin_lat, cos_lat) = rad.latitude.sin_cos();
        let (sin_lon, cos_lon) = rad.longitude.sin_cos();

        let n = radii_of_curvature(rad.latitude).n;

        Ecef {
            x: (n + alt) * cos_lat * cos_lon,
            y: (n + alt) * cos_lat * sin_lon,
            z: (n * (1.0 - WGS84_E2) + alt) * sin_lat,
        }
    }

    /// Converts from [`Ecef`] back to [`LatLon`] with an iterative inverse:
    /// the geocentric latitude seeds a refinement loop that corrects toward
    /// geodetic latitude, capped at 5 iterations with an early exit once
    /// successive deltas drop below 1e-6 rad. Points on or near the polar
    /// axis are resolved directly. Non-convergence is not an error; the
    /// value reached at the iteration cap is returned.
    ///
    /// The returned point always carries an altitude.
    ///
    /// # Usage
    ///
    /// ```
    /// use geocoord::{Ecef, LatLon};
    ///
    /// let coord = LatLon::with_altitude(40.748333, -73.985278, 125.0).unwrap();
    /// let back = Ecef::from_latlon(&coord).to_latlon();
    ///
    /// assert!((back.latitude() - coord.latitude()).abs() < 1e-4);
    /// assert!((back.longitude() - coord.longitude()).abs() < 1e-9);
    /// assert!((back.altitude().unwrap() - 125.0).abs() < 1.0);
    /// ```
    pub fn to_latlon(&self) -> LatLon {
        let p = self.x.hypot(self.y);

        if p < POLAR_AXIS_EPS {
            // On the polar axis the horizontal radius vanishes; resolve
            // the pole directly instead of dividing by ~0.
            let lat = std::f64::consts::FRAC_PI_2.copysign(self.z);
            let mut coord = LatLon::new(lat.to_degrees(), 0.0);
            coord.altitude = Some(self.z.abs() - WGS84_B);
            return coord;
        }

        let lon = self.y.atan2(self.x);

        // Geocentric seed, corrected toward geodetic latitude
        let mut lat = self.z.atan2(p * (1.0 - WGS84_E2));
        let mut n = radii_of_curvature(lat).n;
        let mut alt = p / lat.cos() - n;

        for _ in 0..MAX_ITERATIONS {
            n = radii_of_curvature(lat).n;
            alt = p / lat.cos() - n;

            let next = self.z.atan2(p * (1.0 - WGS84_E2 * n / (n + alt)));
            let delta = (next - lat).abs();
            lat = next;

            if delta < LATITUDE_TOL {
                break;
            }
        }

        let mut coord = LatLon::new(lat.to_degrees(), lon.to_degrees());
        coord.altitude = Some(alt);
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_collapse_to_semi_major_axis() {
        // Zero flattening means every radius equals a, at any latitude
        for lat in [-1.2, 0.0, 0.7, 1.5] {
            let radii = radii_of_curvature(lat);
            assert!((radii.r - WGS84_A).abs() < 1e-6);
            assert!((radii.m - WGS84_A).abs() < 1e-6);
            assert!((radii.n - WGS84_A).abs() < 1e-6);
        }
    }

    #[test]
    fn polar_point_resolves_directly() {
        let pole = Ecef::create(0.0, 0.0, WGS84_B + 10.0);
        let coord = pole.to_latlon();

        assert!((coord.latitude() - 90.0).abs() < 1e-9);
        assert!((coord.longitude()).abs() < 1e-9);
        assert!((coord.altitude().unwrap() - 10.0).abs() < 1e-6);

        let south = Ecef::create(0.0, 0.0, -WGS84_B).to_latlon();
        assert!((south.latitude() + 90.0).abs() < 1e-9);
    }

    #[test]
    fn round_trip_surface_point() {
        let coord = LatLon::create(-33.865143, 151.209900).unwrap();
        let back = Ecef::from_latlon(&coord).to_latlon();

        assert!((back.latitude() - coord.latitude()).abs() < 1e-4);
        assert!((back.longitude() - coord.longitude()).abs() < 1e-9);
        assert!(back.altitude().unwrap().abs() < 1.0);
    }
}
