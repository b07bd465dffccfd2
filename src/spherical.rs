//! Great-circle calculations on the mean-radius sphere.
//!
//! This family deliberately uses the 6 371 000 m mean Earth radius rather
//! than the WGS84 constants of the ECEF/UTM families; the two earth models
//! are independent and their outputs must not be unified.

use std::f64::consts::TAU;

use crate::{constants::EARTH_MEAN_RADIUS_M, latlon::{Bounds, LatLon}};

/// Treat angular separations below this as coincident points.
const COINCIDENT_EPS: f64 = 1e-12;

fn wrap_degrees(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 540.0).rem_euclid(360.0) - 180.0
    }
}

/// Returns the great-circle distance in meters between two points using the
/// [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
///
/// # Usage
///
/// ```
/// use geocoord::LatLon;
/// use geocoord::spherical;
///
/// let jfk = LatLon::create(40.6413, -73.7781).unwrap();
/// let lhr = LatLon::create(51.4700, -0.4543).unwrap();
///
/// let d = spherical::distance(&jfk, &lhr);
/// assert!((d - 5_539_700.0).abs() < 10_000.0);
/// ```
pub fn distance(a: &LatLon, b: &LatLon) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    2.0 * EARTH_MEAN_RADIUS_M * (
        ((b.latitude - a.latitude).to_radians() / 2.0).sin().powi(2) +
        lat1.cos() * lat2.cos() *
        ((b.longitude - a.longitude).to_radians() / 2.0).sin().powi(2)
    ).sqrt().asin()
}

/// Returns the initial bearing in degrees `[0, 360)` of the great circle
/// from `a` toward `b`.
pub fn bearing(a: &LatLon, b: &LatLon) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Returns the midpoint of the great-circle path between two points.
pub fn midpoint(a: &LatLon, b: &LatLon) -> LatLon {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let bx = lat2.cos() * dlon.cos();
    let by = lat2.cos() * dlon.sin();

    let lat = (lat1.sin() + lat2.sin())
        .atan2(((lat1.cos() + bx).powi(2) + by.powi(2)).sqrt());
    let lon = lon1 + by.atan2(lat1.cos() + bx);

    LatLon::new(lat.to_degrees(), wrap_degrees(lon.to_degrees()))
}

/// Returns the point reached after traveling `distance` meters from
/// `start` along the initial bearing `bearing_deg`.
///
/// # Usage
///
/// ```
/// use geocoord::LatLon;
/// use geocoord::spherical;
///
/// let start = LatLon::create(51.47788, -0.00147).unwrap();
/// let end = spherical::destination(&start, 300.7, 7794.0);
///
/// assert!((end.latitude() - 51.5136).abs() < 1e-3);
/// assert!((end.longitude() + 0.0983).abs() < 1e-3);
/// ```
pub fn destination(start: &LatLon, bearing_deg: f64, distance: f64) -> LatLon {
    let lat1 = start.latitude.to_radians();
    let lon1 = start.longitude.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance / EARTH_MEAN_RADIUS_M;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1 + (theta.sin() * delta.sin() * lat1.cos())
        .atan2(delta.cos() - lat1.sin() * lat2.sin());

    LatLon::new(lat2.to_degrees(), wrap_degrees(lon2.to_degrees()))
}

/// Returns the intersection of two great-circle paths, each given by a
/// start point and an initial bearing in degrees.
///
/// Returns `None` when the configuration has no single answer: coincident
/// start points, paths whose bearings never cross on this side of the
/// sphere (sign-mismatched sines of the interior angles), or both interior
/// angles zero (infinitely many intersections).
///
/// # Usage
///
/// ```
/// use geocoord::LatLon;
/// use geocoord::spherical;
///
/// let p1 = LatLon::create(51.8853, 0.2545).unwrap();
/// let p2 = LatLon::create(49.0034, 2.5735).unwrap();
///
/// let x = spherical::intersection(&p1, 108.547, &p2, 32.435).unwrap();
/// assert!((x.latitude() - 50.9078).abs() < 1e-3);
/// assert!((x.longitude() - 4.5084).abs() < 1e-3);
/// ```
pub fn intersection(p1: &LatLon, bearing1: f64, p2: &LatLon, bearing2: f64) -> Option<LatLon> {
    let lat1 = p1.latitude.to_radians();
    let lon1 = p1.longitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let lon2 = p2.longitude.to_radians();
    let theta13 = bearing1.to_radians();
    let theta23 = bearing2.to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let delta12 = 2.0 * ((dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2))
        .sqrt()
        .asin();

    if delta12.abs() < COINCIDENT_EPS {
        return None;
    }

    // Initial and final bearings between the two start points
    let theta_a = ((lat2.sin() - lat1.sin() * delta12.cos())
        / (delta12.sin() * lat1.cos()))
        .clamp(-1.0, 1.0)
        .acos();
    let theta_b = ((lat1.sin() - lat2.sin() * delta12.cos())
        / (delta12.sin() * lat2.cos()))
        .clamp(-1.0, 1.0)
        .acos();

    let (theta12, theta21) = if dlon.sin() > 0.0 {
        (theta_a, TAU - theta_b)
    } else {
        (TAU - theta_a, theta_b)
    };

    let alpha1 = theta13 - theta12;
    let alpha2 = theta21 - theta23;

    if alpha1.sin() == 0.0 && alpha2.sin() == 0.0 {
        // Infinite intersections
        return None;
    }
    if alpha1.sin() * alpha2.sin() < 0.0 {
        // Ambiguous intersection (antipodal?)
        return None;
    }

    let alpha3 = (-alpha1.cos() * alpha2.cos()
        + alpha1.sin() * alpha2.sin() * delta12.cos())
        .clamp(-1.0, 1.0)
        .acos();
    let delta13 = (delta12.sin() * alpha1.sin() * alpha2.sin())
        .atan2(alpha2.cos() + alpha1.cos() * alpha3.cos());

    let lat3 = (lat1.sin() * delta13.cos()
        + lat1.cos() * delta13.sin() * theta13.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let dlon13 = (theta13.sin() * delta13.sin() * lat1.cos())
        .atan2(delta13.cos() - lat1.sin() * lat3.sin());
    let lon3 = lon1 + dlon13;

    Some(LatLon::new(lat3.to_degrees(), wrap_degrees(lon3.to_degrees())))
}

/// Returns the smallest latitude/longitude box containing every point, or
/// `None` for an empty slice.
pub fn bounds(points: &[LatLon]) -> Option<Bounds> {
    let first = points.first()?;

    let mut result = Bounds {
        top: first.latitude,
        right: first.longitude,
        bottom: first.latitude,
        left: first.longitude,
    };

    for point in &points[1..] {
        result.top = result.top.max(point.latitude);
        result.bottom = result.bottom.min(point.latitude);
        result.right = result.right.max(point.longitude);
        result.left = result.left.min(point.longitude);
    }

    Some(result)
}
