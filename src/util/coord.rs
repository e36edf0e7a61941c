use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A decoded cell center in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns the coordinate as a `geo_types::Point` (x = longitude, y = latitude).
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl From<LatLon> for (f64, f64) {
    /// Yields `(latitude, longitude)`.
    fn from(value: LatLon) -> Self {
        (value.lat, value.lon)
    }
}

impl From<LatLon> for Point<f64> {
    fn from(value: LatLon) -> Self {
        value.to_point()
    }
}

/// Trait for types that can provide longitude/latitude.
///
/// Implemented for `(f64, f64)` tuples (read as `(lon, lat)`, x first, like
/// every other geo type), `geo_types::Point<f64>` and [`LatLon`].
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for LatLon {
    fn x(&self) -> f64 {
        self.lon
    }
    fn y(&self) -> f64 {
        self.lat
    }
}
