//! Geodetic ↔ geocentric conversion.
//!
//! forward: X = (N + h)·cosφ·cosλ, Y = (N + h)·cosφ·sinλ, Z = (N·(1 − e²) + h)·sinφ
//! inverse: φ refined from atan2(Z, (1 − e²)·p) with φ ← atan2(Z + e²·N(φ)·sinφ, p),
//!          λ = atan2(Y, X), h recovered from the converged φ.

use crate::common::prime_vertical_radius;
use crate::convergence::{fixed_point, Convergence};
use crate::ellipsoid::Ellipsoid;
use crate::point::{GeocentricPoint, GeodeticPoint};

/// Below this |cos φ| the altitude is taken from the polar axis instead.
const NEAR_POLE_COS: f64 = 1e-6;

pub fn to_geocentric(ellipsoid: &Ellipsoid, lla: &GeodeticPoint) -> GeocentricPoint {
    let v = prime_vertical_radius(ellipsoid, lla.latitude);
    let (sin_lat, cos_lat) = lla.latitude.sin_cos();
    let (sin_lon, cos_lon) = lla.longitude.sin_cos();
    GeocentricPoint {
        x: (v + lla.altitude) * cos_lat * cos_lon,
        y: (v + lla.altitude) * cos_lat * sin_lon,
        z: (v * (1.0 - ellipsoid.e2()) + lla.altitude) * sin_lat,
    }
}

pub fn to_geodetic(ellipsoid: &Ellipsoid, xyz: &GeocentricPoint) -> Convergence<GeodeticPoint> {
    let e2 = ellipsoid.e2();
    let p = xyz.x.hypot(xyz.y);

    let seed = xyz.z.atan2((1.0 - e2) * p);
    let latitude = fixed_point("to_geodetic", seed, |phi| {
        (xyz.z + e2 * prime_vertical_radius(ellipsoid, phi) * phi.sin()).atan2(p)
    });

    latitude.map(|phi| {
        let v = prime_vertical_radius(ellipsoid, phi);
        let (sin_phi, cos_phi) = phi.sin_cos();
        let altitude = if cos_phi.abs() > NEAR_POLE_COS {
            p / cos_phi - v
        } else {
            xyz.z / sin_phi - v * (1.0 - e2)
        };
        GeodeticPoint {
            longitude: xyz.y.atan2(xyz.x),
            latitude: phi,
            altitude,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::{AIRY_1830, WGS84};
    use approx::assert_relative_eq;

    #[test]
    fn test_london_wgs84() {
        let london = GeodeticPoint::from_degrees(-0.127005, 51.518602, 0.0);
        let xyz = to_geocentric(&WGS84, &london);
        assert_relative_eq!(xyz.x, 3_977_018.848, epsilon = 1e-3);
        assert_relative_eq!(xyz.y, -8_815.695, epsilon = 1e-3);
        assert_relative_eq!(xyz.z, 4_969_650.564, epsilon = 1e-3);
    }

    #[test]
    fn test_london_airy() {
        let london = GeodeticPoint::from_degrees(-0.127005, 51.518602, 0.0);
        let xyz = to_geocentric(&AIRY_1830, &london);
        assert_relative_eq!(xyz.x, 3_976_632.017, epsilon = 1e-3);
        assert_relative_eq!(xyz.z, 4_969_286.446, epsilon = 1e-3);
    }

    #[test]
    fn test_equator_prime_meridian() {
        let xyz = to_geocentric(&WGS84, &GeodeticPoint::new(0.0, 0.0, 100.0));
        assert_relative_eq!(xyz.x, WGS84.a() + 100.0, epsilon = 1e-6);
        assert_relative_eq!(xyz.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(xyz.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_distance_from_centre() {
        // Equatorial radius a, polar radius b, whatever the longitude
        for lon in [0.0, 45.0, -120.0_f64] {
            let equator = to_geocentric(&WGS84, &GeodeticPoint::from_degrees(lon, 0.0, 0.0));
            assert_relative_eq!(equator.norm(), WGS84.a(), epsilon = 1e-6);
            let pole = to_geocentric(&WGS84, &GeodeticPoint::from_degrees(lon, 90.0, 10.0));
            assert_relative_eq!(pole.norm(), WGS84.b() + 10.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_roundtrip() {
        let cases: &[(f64, f64, f64)] = &[
            (0.0, 0.0, 0.0),
            (2.35, 48.86, 35.0),
            (-73.9857, 40.7484, -20.0),
            (139.6917, 35.6895, 1_200.0),
            (151.2, -33.86, 8_848.0),
            (-179.0, -89.5, 0.0),
            (179.9, 89.0, 10_000.0),
        ];
        for &(lon, lat, h) in cases {
            let lla = GeodeticPoint::from_degrees(lon, lat, h);
            let back = to_geodetic(&WGS84, &to_geocentric(&WGS84, &lla));
            assert!(back.converged);
            assert_relative_eq!(back.value.longitude, lla.longitude, epsilon = 1e-10);
            assert_relative_eq!(back.value.latitude, lla.latitude, epsilon = 1e-10);
            assert_relative_eq!(back.value.altitude, h, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_pole() {
        let pole = GeocentricPoint::new(0.0, 0.0, WGS84.b() + 50.0);
        let lla = to_geodetic(&WGS84, &pole).value;
        assert_relative_eq!(lla.latitude, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(lla.altitude, 50.0, epsilon = 1e-6);
    }
}
