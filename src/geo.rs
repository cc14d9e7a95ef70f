//! Geographic primitives.
//!
//! Coordinates are WGS84 degrees. Planar math happens in spherical
//! Web-Mercator units where the whole world spans `[0, 1]` on both axes,
//! the same zoom-independent unit the map renderer uses.

use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Equatorial circumference of the spherical earth model, in meters.
pub const EARTH_CIRCUMFERENCE_M: f64 = 2.0 * PI * EARTH_RADIUS_M;

/// A longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A point in Web-Mercator units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

impl MercatorPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_coordinate(coord: Coordinate) -> Self {
        let x = (180.0 + coord.lon) / 360.0;
        let y = (180.0 - (180.0 / PI) * (PI / 4.0 + coord.lat * PI / 360.0).tan().ln()) / 360.0;
        Self { x, y }
    }

    pub fn to_coordinate(self) -> Coordinate {
        let lon = self.x * 360.0 - 180.0;
        let y = 180.0 - self.y * 360.0;
        let lat = 360.0 / PI * (y * PI / 180.0).exp().atan() - 90.0;
        Coordinate { lon, lat }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_sq(self) -> f64 {
        self.dot(self)
    }
}

impl Add for MercatorPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for MercatorPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for MercatorPoint {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Meters covered by one Mercator unit at the given latitude.
///
/// Mercator stretches distances by `1 / cos(lat)`, so the scale shrinks
/// towards the poles.
pub fn meters_per_unit(lat: f64) -> f64 {
    EARTH_CIRCUMFERENCE_M * lat.to_radians().cos()
}
