//! Ellipsoid primitives: radii of curvature, isometric latitude and the
//! meridian arc.
//!
//! Every projection and conversion in the crate goes through these
//! functions rather than re-deriving the formulas locally.
//!
//!   N(φ) = a / √(1 − e²·sin²φ)
//!   ρ(φ) = a·(1 − e²) / (1 − e²·sin²φ)^(3/2)
//!   ψ(φ) = ln(tan(π/4 + φ/2) · ((1 − e·sinφ)/(1 + e·sinφ))^(e/2))

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::convergence::{fixed_point, Convergence};
use crate::ellipsoid::Ellipsoid;

/// Radius of curvature in the prime vertical, N(φ).
pub fn prime_vertical_radius(ellipsoid: &Ellipsoid, phi: f64) -> f64 {
    let es = ellipsoid.e() * phi.sin();
    ellipsoid.a() / (1.0 - es * es).sqrt()
}

/// Radius of curvature in the meridian plane, ρ(φ).
pub fn meridian_radius(ellipsoid: &Ellipsoid, phi: f64) -> f64 {
    let es = ellipsoid.e() * phi.sin();
    ellipsoid.a() * (1.0 - ellipsoid.e2()) / (1.0 - es * es).powf(1.5)
}

/// Radius of the parallel of latitude φ: cos(φ)·N(φ).
pub fn parallel_radius(ellipsoid: &Ellipsoid, phi: f64) -> f64 {
    phi.cos() * prime_vertical_radius(ellipsoid, phi)
}

/// Isometric latitude ψ(φ) for eccentricity `e`.
pub fn isometric_latitude(e: f64, phi: f64) -> f64 {
    let es = e * phi.sin();
    ((FRAC_PI_4 + phi / 2.0).tan() * ((1.0 - es) / (1.0 + es)).powf(e / 2.0)).ln()
}

/// Geodetic latitude from isometric latitude, by fixed-point iteration
/// seeded with the spherical solution.
pub fn latitude_from_isometric(e: f64, iso: f64) -> Convergence<f64> {
    let exp_iso = iso.exp();
    let seed = 2.0 * exp_iso.atan() - FRAC_PI_2;
    fixed_point("latitude_from_isometric", seed, |phi| {
        let es = e * phi.sin();
        2.0 * (((1.0 + es) / (1.0 - es)).powf(e / 2.0) * exp_iso).atan() - FRAC_PI_2
    })
}

/// Meridian arc length from the equator to latitude φ (metres).
///
/// Series in the first eccentricity, carried through e⁸.
pub fn meridian_arc_length(ellipsoid: &Ellipsoid, phi: f64) -> f64 {
    let e2 = ellipsoid.e2();
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let e8 = e6 * e2;

    let a0 = 1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0 - 175.0 * e8 / 16384.0;
    let a2 = -3.0 * e2 / 8.0 - 3.0 * e4 / 32.0 - 45.0 * e6 / 1024.0 - 420.0 * e8 / 16384.0;
    let a4 = 15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0 + 525.0 * e8 / 16384.0;
    let a6 = -35.0 * e6 / 3072.0 - 175.0 * e8 / 12288.0;
    let a8 = 315.0 * e8 / 131072.0;

    ellipsoid.a()
        * (a0 * phi
            + a2 * (2.0 * phi).sin()
            + a4 * (4.0 * phi).sin()
            + a6 * (6.0 * phi).sin()
            + a8 * (8.0 * phi).sin())
}

/// Footpoint latitude: the latitude whose meridian arc length is `distance`.
///
/// Newton-style refinement φ ← φ − (M(φ) − s)/a seeded with s/a.
pub fn footpoint_latitude(ellipsoid: &Ellipsoid, distance: f64) -> Convergence<f64> {
    let a = ellipsoid.a();
    fixed_point("footpoint_latitude", distance / a, |phi| {
        phi - (meridian_arc_length(ellipsoid, phi) - distance) / a
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::WGS84;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_radii_at_equator_and_pole() {
        assert_relative_eq!(prime_vertical_radius(&WGS84, 0.0), WGS84.a(), epsilon = 1e-6);
        // ρ(0) = b²/a, N(π/2) = ρ(π/2) = a²/b
        let b = WGS84.b();
        assert_relative_eq!(meridian_radius(&WGS84, 0.0), b * b / WGS84.a(), epsilon = 1e-3);
        let polar = WGS84.a() * WGS84.a() / b;
        assert_relative_eq!(prime_vertical_radius(&WGS84, FRAC_PI_2), polar, epsilon = 1e-3);
        assert_relative_eq!(meridian_radius(&WGS84, FRAC_PI_2), polar, epsilon = 1e-3);
        assert!(parallel_radius(&WGS84, FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_meridian_arc_equator() {
        let m = meridian_arc_length(&WGS84, 0.0);
        assert_relative_eq!(m, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_meridian_arc_45() {
        let m = meridian_arc_length(&WGS84, FRAC_PI_4);
        assert_relative_eq!(m, 4_984_944.378, epsilon = 1e-3);
        // Quarter meridian of WGS84
        let q = meridian_arc_length(&WGS84, FRAC_PI_2);
        assert_relative_eq!(q, 10_001_965.729, epsilon = 1e-2);
    }

    #[test]
    fn test_isometric_latitude_roundtrip() {
        let e = WGS84.e();
        for deg in [-80.0, -45.0, -10.0, 0.0, 1.0, 30.0, 60.0, 85.0_f64] {
            let phi = deg.to_radians();
            let result = latitude_from_isometric(e, isometric_latitude(e, phi));
            assert!(result.converged, "no convergence at {deg}");
            assert_relative_eq!(result.value, phi, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_isometric_latitude_sphere() {
        // On a sphere ψ = ln(tan(π/4 + φ/2)) and the inverse needs one step
        let phi = 0.7;
        assert_relative_eq!(
            isometric_latitude(0.0, phi),
            (FRAC_PI_4 + phi / 2.0).tan().ln(),
            epsilon = 1e-15
        );
        let result = latitude_from_isometric(0.0, isometric_latitude(0.0, phi));
        assert_eq!(result.iterations, 1);
        assert_relative_eq!(result.value, phi, epsilon = 1e-12);
    }

    #[test]
    fn test_footpoint_latitude_roundtrip() {
        for deg in [-70.0, -20.0, 0.0, 15.0, 45.0, 89.0_f64] {
            let phi = deg.to_radians();
            let result = footpoint_latitude(&WGS84, meridian_arc_length(&WGS84, phi));
            assert!(result.converged);
            assert_relative_eq!(result.value, phi, epsilon = 1e-10);
        }
    }
}
