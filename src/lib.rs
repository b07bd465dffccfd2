#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! A lightweight engine for geographic coordinates: parsing free-form
//! coordinate text in five common entry formats, converting between
//! degree/radian, geodetic/ECEF, and UTM/MGRS representations, and
//! formatting numeric coordinates back into any of the textual forms.
//!
//! The free-text entry point is [`parse`]:
//!
//! ```
//! let coord = geocoord::parse("48.858° N, 2.294° E").unwrap();
//!
//! assert!((coord.latitude() - 48.858).abs() < 1e-9);
//! assert!((coord.longitude() - 2.294).abs() < 1e-9);
//! ```

use thiserror::Error;

pub mod latlon;
pub mod ecef;
pub mod spherical;
pub mod utm;
pub mod mgrs;
pub mod text;

pub use latlon::{Bounds, LatLon, LatLonRad};
pub use ecef::Ecef;
pub use mgrs::Mgrs;
pub use utm::UtmCoordinate;
pub use text::{detect_format, format_coordinate, parse, TextFormat};

pub(crate) mod constants;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Coordinate parameters are not valid: {0}")]
    InvalidCoord(String),
    #[error("MGRS String is invalid: {0}")]
    InvalidMgrs(String),
    #[error("UTM coords are invalid: {0}")]
    InvalidUtmCoords(String),
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }
}
