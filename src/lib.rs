//! Ellipsoidal geodesy and map projections.
//!
//! Angles are radians and lengths metres throughout, unless a CRS carries
//! another linear [`Unit`](proj::Unit).

pub mod calibration;
pub mod common;
pub mod convergence;
pub mod datum;
pub mod ellipsoid;
pub mod error;
pub mod geocentric;
pub mod geodesic;
pub mod grid;
pub mod interpolate;
pub mod locator;
pub mod point;
pub mod proj;
pub mod utm;

pub use convergence::Convergence;
pub use datum::{Datum, Helmert};
pub use ellipsoid::Ellipsoid;
pub use error::{GeoError, ProjError};
pub use point::{GeocentricPoint, GeodeticPoint, ProjectedPoint};
pub use proj::{Crs, Pipeline, Projection, ProjectionKind, ProjectionParameters};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::utm::UtmGrid;

    #[test]
    fn test_parameters_from_json() {
        let params: ProjectionParameters =
            serde_json::from_str(r#"{"lambda0": 0.05, "k0": 0.9996, "x0": 500000.0}"#).unwrap();
        assert_eq!(params.k0, 0.9996);
        assert_eq!(params.x0, 500_000.0);
        assert_eq!(params.phi0, 0.0);

        let kind: ProjectionKind = serde_json::from_str(r#""TransverseMercator""#).unwrap();
        assert_eq!(kind, ProjectionKind::TransverseMercator);
    }

    #[test]
    fn test_ellipsoid_from_semi_major_and_flattening() {
        let json = format!(r#"{{"a": 6378137.0, "f": {}}}"#, 1.0 / 298.257_223_563);
        let wgs84: Ellipsoid = serde_json::from_str(&json).unwrap();
        assert_eq!(wgs84, ellipsoid::WGS84);
        assert_eq!(wgs84.b(), ellipsoid::WGS84.b());

        let written = serde_json::to_value(ellipsoid::WGS84).unwrap();
        assert_eq!(written.as_object().map(|o| o.len()), Some(2));
    }

    #[test]
    fn test_invalid_ellipsoid_rejected() {
        for json in [
            r#"{"a": -5.0, "f": 0.003}"#,
            r#"{"a": 6378137.0, "f": 3.0}"#,
            r#"{"a": 6378137.0}"#,
        ] {
            assert!(serde_json::from_str::<Ellipsoid>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_owned_types_roundtrip() {
        let grid = UtmGrid {
            zone: 31,
            band: 'T',
            easting: 500_000.0,
            northing: 4_982_950.4,
            altitude: 12.0,
        };
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<UtmGrid>(&json).unwrap(), grid);

        let mgrs = crate::grid::mgrs::from_utm(&grid).unwrap();
        let json = serde_json::to_string(&mgrs).unwrap();
        assert_eq!(serde_json::from_str::<crate::grid::mgrs::MgrsGrid>(&json).unwrap(), mgrs);

        let airy: Ellipsoid =
            serde_json::from_str(&serde_json::to_string(&ellipsoid::AIRY_1830).unwrap()).unwrap();
        assert_eq!(airy, ellipsoid::AIRY_1830);

        let helmert: Helmert =
            serde_json::from_str(&serde_json::to_string(&datum::OSGB36.helmert).unwrap()).unwrap();
        assert_eq!(helmert, datum::OSGB36.helmert);
    }
}
