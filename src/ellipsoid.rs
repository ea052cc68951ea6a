//! Reference ellipsoids of revolution.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// Reference ellipsoid parameters.
///
/// All shape constants are derived from the semi-major axis and the
/// flattening, so they stay mutually consistent whichever pair the
/// ellipsoid was built from.
///
/// With the `serde` feature an ellipsoid is (de)serialized as `{a, f}` and
/// rebuilt through [`Ellipsoid::from_flattening`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "EllipsoidDef", into = "EllipsoidDef"))]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    a: f64,
    /// Flattening (dimensionless)
    f: f64,
    /// Semi-minor axis: a * (1 - f)
    b: f64,
    /// First eccentricity squared: 2f - f^2
    e2: f64,
    /// Second eccentricity squared: e^2 / (1 - e^2)
    ep2: f64,
    /// Third flattening: f / (2 - f)
    n: f64,
}

impl Ellipsoid {
    /// Unchecked constructor from semi-major axis and flattening.
    ///
    /// Usable in const context; prefer [`Ellipsoid::from_flattening`] for
    /// values that are not known to be valid.
    pub const fn new(a: f64, f: f64) -> Self {
        let e2 = 2.0 * f - f * f;
        Self {
            a,
            f,
            b: a * (1.0 - f),
            e2,
            ep2: e2 / (1.0 - e2),
            n: f / (2.0 - f),
        }
    }

    pub fn from_flattening(a: f64, f: f64) -> Result<Self, GeoError> {
        check_semi_major(a)?;
        if !f.is_finite() || !(0.0..1.0).contains(&f) {
            return Err(GeoError::InvalidEllipsoid(format!(
                "flattening must be in [0, 1), got {f}"
            )));
        }
        Ok(Self::new(a, f))
    }

    /// Build from the inverse flattening `1/f`; zero denotes a sphere.
    pub fn from_inverse_flattening(a: f64, rf: f64) -> Result<Self, GeoError> {
        if rf == 0.0 {
            return Self::from_flattening(a, 0.0);
        }
        if !rf.is_finite() || rf <= 1.0 {
            return Err(GeoError::InvalidEllipsoid(format!(
                "inverse flattening must be greater than 1, got {rf}"
            )));
        }
        Self::from_flattening(a, 1.0 / rf)
    }

    pub fn from_semi_axes(a: f64, b: f64) -> Result<Self, GeoError> {
        check_semi_major(a)?;
        if !b.is_finite() || b <= 0.0 || b > a {
            return Err(GeoError::InvalidEllipsoid(format!(
                "semi-minor axis must be in (0, a], got {b}"
            )));
        }
        Ok(Self::new(a, (a - b) / a))
    }

    pub fn from_eccentricity(a: f64, e: f64) -> Result<Self, GeoError> {
        check_semi_major(a)?;
        if !e.is_finite() || !(0.0..1.0).contains(&e) {
            return Err(GeoError::InvalidEllipsoid(format!(
                "eccentricity must be in [0, 1), got {e}"
            )));
        }
        Self::from_flattening(a, 1.0 - (1.0 - e * e).sqrt())
    }

    pub fn sphere(radius: f64) -> Result<Self, GeoError> {
        Self::from_flattening(radius, 0.0)
    }

    /// Semi-major axis (metres).
    pub const fn a(&self) -> f64 {
        self.a
    }

    /// Semi-minor axis (metres).
    pub const fn b(&self) -> f64 {
        self.b
    }

    pub const fn f(&self) -> f64 {
        self.f
    }

    /// First eccentricity.
    pub fn e(&self) -> f64 {
        self.e2.sqrt()
    }

    /// First eccentricity squared.
    pub const fn e2(&self) -> f64 {
        self.e2
    }

    /// Second eccentricity squared.
    pub const fn ep2(&self) -> f64 {
        self.ep2
    }

    /// Third flattening.
    pub const fn n(&self) -> f64 {
        self.n
    }

    pub fn is_sphere(&self) -> bool {
        self.f == 0.0
    }
}

/// Serialized form of an [`Ellipsoid`].
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct EllipsoidDef {
    a: f64,
    f: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<EllipsoidDef> for Ellipsoid {
    type Error = GeoError;

    fn try_from(def: EllipsoidDef) -> Result<Self, Self::Error> {
        Ellipsoid::from_flattening(def.a, def.f)
    }
}

#[cfg(feature = "serde")]
impl From<Ellipsoid> for EllipsoidDef {
    fn from(ellipsoid: Ellipsoid) -> Self {
        EllipsoidDef {
            a: ellipsoid.a,
            f: ellipsoid.f,
        }
    }
}

fn check_semi_major(a: f64) -> Result<(), GeoError> {
    if a.is_finite() && a > 0.0 {
        Ok(())
    } else {
        Err(GeoError::InvalidEllipsoid(format!(
            "semi-major axis must be positive, got {a}"
        )))
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_223_563);
pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_222_101);
pub const AIRY_1830: Ellipsoid = Ellipsoid::new(6_377_563.396, 1.0 / 299.324_964_6);
pub const AIRY_MODIFIED_1849: Ellipsoid = Ellipsoid::new(6_377_340.189, 1.0 / 299.324_964_6);
pub const INTERNATIONAL_1924: Ellipsoid = Ellipsoid::new(6_378_388.0, 1.0 / 297.0);
pub const BESSEL_1841: Ellipsoid = Ellipsoid::new(6_377_397.155, 1.0 / 299.152_812_8);
/// Clarke 1880 (IGN), defined by its two semi-axes.
pub const CLARKE_1880_IGN: Ellipsoid =
    Ellipsoid::new(6_378_249.2, (6_378_249.2 - 6_356_515.0) / 6_378_249.2);
