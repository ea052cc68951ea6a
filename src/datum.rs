//! Geodetic datums and the 7-parameter Helmert transform between them.
//!
//! Parameters are stored per datum as the shift onto WGS84. A transform
//! between two datums applies the parameter difference src − dst:
//!
//!   x' = dx + (1 + ds)·( x − rz·y + ry·z)
//!   y' = dy + (1 + ds)·( rz·x + y − rx·z)
//!   z' = dz + (1 + ds)·(−ry·x + rx·y + z)
//!
//! with rotations converted from arc-seconds and the scale from ppm.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::convergence::Convergence;
use crate::ellipsoid::{Ellipsoid, AIRY_1830, AIRY_MODIFIED_1849, INTERNATIONAL_1924, WGS84};
use crate::geocentric;
use crate::point::{GeocentricPoint, GeodeticPoint};

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / 648_000.0;
const PPM: f64 = 1e-6;

/// Seven Helmert parameters: translations (metres), rotations (arc-seconds),
/// scale (parts per million).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Helmert {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub ds: f64,
}

impl Helmert {
    pub const IDENTITY: Helmert = Helmert::translation(0.0, 0.0, 0.0);

    pub const fn new(dx: f64, dy: f64, dz: f64, rx: f64, ry: f64, rz: f64, ds: f64) -> Self {
        Self {
            dx,
            dy,
            dz,
            rx,
            ry,
            rz,
            ds,
        }
    }

    /// Three-parameter (Molodensky-style) shift.
    pub const fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(dx, dy, dz, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    fn difference(&self, other: &Helmert) -> Helmert {
        Helmert {
            dx: self.dx - other.dx,
            dy: self.dy - other.dy,
            dz: self.dz - other.dz,
            rx: self.rx - other.rx,
            ry: self.ry - other.ry,
            rz: self.rz - other.rz,
            ds: self.ds - other.ds,
        }
    }

    fn apply(&self, p: &GeocentricPoint) -> GeocentricPoint {
        let rx = self.rx * ARCSEC_TO_RAD;
        let ry = self.ry * ARCSEC_TO_RAD;
        let rz = self.rz * ARCSEC_TO_RAD;
        let scale = 1.0 + self.ds * PPM;
        GeocentricPoint {
            x: self.dx + scale * (p.x - rz * p.y + ry * p.z),
            y: self.dy + scale * (rz * p.x + p.y - rx * p.z),
            z: self.dz + scale * (-ry * p.x + rx * p.y + p.z),
        }
    }
}

/// An ellipsoid tied to the earth by a prime meridian and Helmert parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Datum<'e> {
    pub ellipsoid: &'e Ellipsoid,
    /// Longitude of the prime meridian east of Greenwich (radians).
    pub prime_meridian: f64,
    pub helmert: Helmert,
}

impl<'e> Datum<'e> {
    pub const fn new(ellipsoid: &'e Ellipsoid, prime_meridian: f64, helmert: Helmert) -> Self {
        Self {
            ellipsoid,
            prime_meridian,
            helmert,
        }
    }

    /// Greenwich datum with no shift relative to the common frame.
    pub const fn from_ellipsoid(ellipsoid: &'e Ellipsoid) -> Self {
        Self::new(ellipsoid, 0.0, Helmert::IDENTITY)
    }

    pub fn to_geocentric(&self, lla: &GeodeticPoint) -> GeocentricPoint {
        let greenwich = GeodeticPoint {
            longitude: lla.longitude + self.prime_meridian,
            ..*lla
        };
        geocentric::to_geocentric(self.ellipsoid, &greenwich)
    }

    pub fn to_geodetic(&self, xyz: &GeocentricPoint) -> Convergence<GeodeticPoint> {
        geocentric::to_geodetic(self.ellipsoid, xyz).map(|mut p| {
            p.longitude -= self.prime_meridian;
            p
        })
    }

    /// Move a geodetic position from this datum onto `dst`.
    pub fn transform_geodetic(
        &self,
        dst: &Datum,
        lla: &GeodeticPoint,
    ) -> Convergence<GeodeticPoint> {
        if self == dst {
            return Convergence::exact(*lla);
        }
        let shifted = transform(self, dst, &self.to_geocentric(lla));
        dst.to_geodetic(&shifted)
    }
}

/// Helmert transform of a geocentric point from `src` to `dst`.
pub fn transform(src: &Datum, dst: &Datum, xyz: &GeocentricPoint) -> GeocentricPoint {
    let delta = src.helmert.difference(&dst.helmert);
    if delta.is_identity() {
        return *xyz;
    }
    delta.apply(xyz)
}

pub const WGS84_DATUM: Datum<'static> = Datum::from_ellipsoid(&WGS84);

/// Ordnance Survey of Great Britain 1936.
pub const OSGB36: Datum<'static> = Datum::new(
    &AIRY_1830,
    0.0,
    Helmert::new(446.448, -125.157, 542.06, 0.1502, 0.247, 0.8421, -20.4894),
);

/// Ireland 1965.
pub const TM65: Datum<'static> = Datum::new(
    &AIRY_MODIFIED_1849,
    0.0,
    Helmert::new(482.5, -130.6, 564.6, -1.042, -0.214, -0.631, 8.15),
);

/// European Datum 1950.
pub const ED50: Datum<'static> = Datum::new(
    &INTERNATIONAL_1924,
    0.0,
    Helmert::translation(-87.0, -98.0, -121.0),
);
