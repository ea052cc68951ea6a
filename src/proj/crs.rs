use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::datum::Datum;
use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{Projection, ProjectionKind};

/// Linear unit of a CRS, as metres per unit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unit {
    pub ratio: f64,
}

impl Unit {
    pub const METRE: Unit = Unit { ratio: 1.0 };
    pub const FOOT: Unit = Unit { ratio: 0.3048 };
    pub const US_SURVEY_FOOT: Unit = Unit {
        ratio: 1200.0 / 3937.0,
    };

    /// A unit of `ratio` metres, which must be positive and finite.
    pub fn new(ratio: f64) -> Result<Self, ProjError> {
        let unit = Unit { ratio };
        unit.check()?;
        Ok(unit)
    }

    fn check(&self) -> Result<(), ProjError> {
        if self.ratio.is_finite() && self.ratio > 0.0 {
            Ok(())
        } else {
            Err(ProjError::InvalidParameter(format!(
                "unit ratio must be positive, got {}",
                self.ratio
            )))
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::METRE
    }
}

/// Numeric parameters shared by every projection family.
///
/// Angles are radians, offsets metres; families ignore the fields they
/// have no use for.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectionParameters {
    /// Longitude of origin.
    pub lambda0: f64,
    /// Latitude of origin.
    pub phi0: f64,
    /// First standard parallel.
    pub phi1: f64,
    /// Second standard parallel.
    pub phi2: f64,
    /// Scale factor at the origin.
    pub k0: f64,
    /// False easting.
    pub x0: f64,
    /// False northing.
    pub y0: f64,
    /// Azimuth of the central line (oblique Mercator).
    pub azimuth: f64,
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self {
            lambda0: 0.0,
            phi0: 0.0,
            phi1: 0.0,
            phi2: 0.0,
            k0: 1.0,
            x0: 0.0,
            y0: 0.0,
            azimuth: 0.0,
        }
    }
}

impl ProjectionParameters {
    pub fn with_origin(mut self, lambda0: f64, phi0: f64) -> Self {
        self.lambda0 = lambda0;
        self.phi0 = phi0;
        self
    }

    pub fn with_standard_parallels(mut self, phi1: f64, phi2: f64) -> Self {
        self.phi1 = phi1;
        self.phi2 = phi2;
        self
    }

    pub fn with_scale_factor(mut self, k0: f64) -> Self {
        self.k0 = k0;
        self
    }

    pub fn with_false_origin(mut self, x0: f64, y0: f64) -> Self {
        self.x0 = x0;
        self.y0 = y0;
        self
    }

    pub fn with_azimuth(mut self, azimuth: f64) -> Self {
        self.azimuth = azimuth;
        self
    }
}

/// A projection family instantiated on a datum.
///
/// The datum is borrowed, so one datum can back any number of CRS values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crs<'d> {
    pub datum: &'d Datum<'d>,
    pub kind: ProjectionKind,
    pub unit: Unit,
    pub params: ProjectionParameters,
}

impl<'d> Crs<'d> {
    pub fn new(datum: &'d Datum<'d>, kind: ProjectionKind, params: ProjectionParameters) -> Self {
        Self {
            datum,
            kind,
            unit: Unit::METRE,
            params,
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Universal Transverse Mercator zone `zone` (1..=60).
    pub fn utm(datum: &'d Datum<'d>, zone: u8, north: bool) -> Result<Self, ProjError> {
        if !(1..=60).contains(&zone) {
            return Err(ProjError::InvalidParameter(format!(
                "UTM zone must be in 1..=60, got {zone}"
            )));
        }
        let lambda0 = (f64::from(zone) - 1.0) * 6.0 - 180.0 + 3.0;
        let y0 = if north { 0.0 } else { 10_000_000.0 };
        let params = ProjectionParameters::default()
            .with_origin(lambda0 * PI / 180.0, 0.0)
            .with_scale_factor(0.9996)
            .with_false_origin(500_000.0, y0);
        Ok(Self::new(datum, ProjectionKind::TransverseMercator, params))
    }

    /// Same datum and a value-equal datum are treated alike.
    pub fn shares_datum(&self, other: &Crs) -> bool {
        self.datum == other.datum
    }
}

impl Projection for Crs<'_> {
    fn forward(&self, point: &GeodeticPoint) -> Result<ProjectedPoint, ProjError> {
        self.unit.check()?;
        let p = self.kind.forward(self, point)?;
        Ok(ProjectedPoint {
            x: p.x / self.unit.ratio,
            y: p.y / self.unit.ratio,
            altitude: p.altitude,
        })
    }

    fn inverse(&self, point: &ProjectedPoint) -> Result<GeodeticPoint, ProjError> {
        self.unit.check()?;
        let metres = ProjectedPoint {
            x: point.x * self.unit.ratio,
            y: point.y * self.unit.ratio,
            altitude: point.altitude,
        };
        Ok(self.kind.inverse(self, &metres)?.into_value())
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        self.datum.ellipsoid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::WGS84_DATUM;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_parameters() {
        let p = ProjectionParameters::default();
        assert_eq!(p.k0, 1.0);
        assert_eq!(p.x0, 0.0);
        assert_eq!(p.azimuth, 0.0);
    }

    #[test]
    fn test_utm_zone_parameters() {
        let crs = Crs::utm(&WGS84_DATUM, 31, true).unwrap();
        assert_relative_eq!(crs.params.lambda0.to_degrees(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(crs.params.k0, 0.9996);
        assert_relative_eq!(crs.params.x0, 500_000.0);
        assert_relative_eq!(crs.params.y0, 0.0);

        let south = Crs::utm(&WGS84_DATUM, 1, false).unwrap();
        assert_relative_eq!(south.params.lambda0.to_degrees(), -177.0, epsilon = 1e-12);
        assert_relative_eq!(south.params.y0, 10_000_000.0);

        assert!(Crs::utm(&WGS84_DATUM, 0, true).is_err());
        assert!(Crs::utm(&WGS84_DATUM, 61, true).is_err());
    }

    #[test]
    fn test_unit_conversion() {
        let metres = Crs::utm(&WGS84_DATUM, 31, true).unwrap();
        let feet = metres.with_unit(Unit::FOOT);
        let p = GeodeticPoint::from_degrees(5.0, 45.0, 12.0);

        let m = metres.forward(&p).unwrap();
        let ft = feet.forward(&p).unwrap();
        assert_relative_eq!(ft.x * 0.3048, m.x, epsilon = 1e-6);
        assert_relative_eq!(ft.y * 0.3048, m.y, epsilon = 1e-6);
        assert_relative_eq!(ft.altitude, 12.0);

        let back = feet.inverse(&ft).unwrap();
        assert_relative_eq!(back.longitude, p.longitude, epsilon = 1e-10);
        assert_relative_eq!(back.latitude, p.latitude, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_unit_rejected() {
        assert!(Unit::new(0.3048).is_ok());
        for ratio in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(Unit::new(ratio).is_err(), "{ratio}");
            let crs = Crs::utm(&WGS84_DATUM, 31, true)
                .unwrap()
                .with_unit(Unit { ratio });
            assert!(matches!(
                crs.forward(&GeodeticPoint::from_degrees(3.0, 45.0, 0.0)),
                Err(ProjError::InvalidParameter(_))
            ));
            assert!(crs.inverse(&ProjectedPoint::new(500_000.0, 0.0, 0.0)).is_err());
        }
    }

    #[test]
    fn test_batch_matches_single() {
        let crs = Crs::utm(&WGS84_DATUM, 31, true).unwrap();
        let points: Vec<GeodeticPoint> = [(1.0, 52.0), (3.0, 45.0), (5.0, 45.0)]
            .iter()
            .map(|&(lon, lat)| GeodeticPoint::from_degrees(lon, lat, 0.0))
            .collect();
        let projected = crs.forward_batch(&points).unwrap();
        assert_eq!(projected.len(), points.len());
        for (p, q) in points.iter().zip(&projected) {
            assert_eq!(crs.forward(p).unwrap(), *q);
        }
        let back = crs.inverse_batch(&projected).unwrap();
        for (p, q) in points.iter().zip(&back) {
            assert_relative_eq!(p.latitude, q.latitude, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_ellipsoid_is_borrowed_from_datum() {
        let crs = Crs::utm(&WGS84_DATUM, 31, true).unwrap();
        assert_eq!(crs.ellipsoid(), &crate::ellipsoid::WGS84);
    }
}
