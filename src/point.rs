//! Coordinate value types. Angles are radians, lengths metres.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position relative to an ellipsoid surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodeticPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
}

impl GeodeticPoint {
    pub const fn new(longitude: f64, latitude: f64, altitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            altitude,
        }
    }

    /// Build from longitude and latitude given in degrees.
    pub fn from_degrees(longitude: f64, latitude: f64, altitude: f64) -> Self {
        Self::new(longitude.to_radians(), latitude.to_radians(), altitude)
    }

    /// (longitude, latitude) in degrees.
    pub fn to_degrees(&self) -> (f64, f64) {
        (self.longitude.to_degrees(), self.latitude.to_degrees())
    }
}

/// Earth-centred, right-handed Cartesian position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeocentricPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GeocentricPoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance from the ellipsoid centre.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Planar position in a CRS. The altitude passes through projections untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub altitude: f64,
}

impl ProjectedPoint {
    pub const fn new(x: f64, y: f64, altitude: f64) -> Self {
        Self { x, y, altitude }
    }
}
