//! Lambert Conformal Conic projection, secant (two standard parallels) and
//! tangent (one parallel with a scale factor) variants.
//!
//! With ψ the isometric latitude and N the prime-vertical radius:
//!
//!   secant:  n = ln(N₂·cosφ₂ / (N₁·cosφ₁)) / (ψ₁ − ψ₂),  c = N₁·cosφ₁/n · exp(n·ψ₁)
//!   tangent: n = sin φ₀,  c = k₀·N₀·cot φ₀ · exp(n·ψ₀)
//!
//!   forward: R = c·exp(−n·ψ),  θ = n·(λ − λ₀)
//!            x = x₀ + R·sin θ,  y = ys − R·cos θ

use std::f64::consts::FRAC_PI_2;

use crate::common::{isometric_latitude, latitude_from_isometric, prime_vertical_radius};
use crate::convergence::{Convergence, EPS};
use crate::error::ProjError;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{check_not_polar, check_scale_factor, Crs};

struct Cone {
    n: f64,
    c: f64,
    /// Northing of the cone apex.
    ys: f64,
}

impl Cone {
    fn new(crs: &Crs) -> Result<Self, ProjError> {
        let p = &crs.params;
        let ellipsoid = crs.datum.ellipsoid;
        let e = ellipsoid.e();

        let (n, c, ys) = if (p.phi1 - p.phi2).abs() > EPS {
            check_not_polar("phi1", p.phi1)?;
            check_not_polar("phi2", p.phi2)?;
            let r1 = prime_vertical_radius(ellipsoid, p.phi1) * p.phi1.cos();
            let r2 = prime_vertical_radius(ellipsoid, p.phi2) * p.phi2.cos();
            let iso1 = isometric_latitude(e, p.phi1);
            let n = (r2 / r1).ln() / (iso1 - isometric_latitude(e, p.phi2));
            if n.abs() < EPS {
                return Err(ProjError::InvalidParameter(
                    "standard parallels symmetric about the equator give a flat cone".into(),
                ));
            }
            let c = r1 / n * (n * iso1).exp();
            let ys = if (p.phi0 - FRAC_PI_2).abs() < EPS {
                p.y0
            } else {
                p.y0 + c * (-n * isometric_latitude(e, p.phi0)).exp()
            };
            (n, c, ys)
        } else if p.phi0.abs() > EPS {
            check_not_polar("phi0", p.phi0)?;
            check_scale_factor(p.k0)?;
            let n = p.phi0.sin();
            let apex = p.k0 * prime_vertical_radius(ellipsoid, p.phi0) / p.phi0.tan();
            let c = apex * (n * isometric_latitude(e, p.phi0)).exp();
            (n, c, p.y0 + apex)
        } else {
            return Err(ProjError::InvalidParameter(
                "tangent cone needs a non-zero latitude of origin".into(),
            ));
        };

        Ok(Self { n, c, ys })
    }
}

pub fn forward(crs: &Crs, lla: &GeodeticPoint) -> Result<ProjectedPoint, ProjError> {
    let cone = Cone::new(crs)?;
    let p = &crs.params;
    let r = cone.c * (-cone.n * isometric_latitude(crs.datum.ellipsoid.e(), lla.latitude)).exp();
    let theta = cone.n * (lla.longitude - p.lambda0);
    Ok(ProjectedPoint {
        x: p.x0 + r * theta.sin(),
        y: cone.ys - r * theta.cos(),
        altitude: lla.altitude,
    })
}

pub fn inverse(crs: &Crs, xya: &ProjectedPoint) -> Result<Convergence<GeodeticPoint>, ProjError> {
    let cone = Cone::new(crs)?;
    let p = &crs.params;

    // For n < 0 the cone opens southwards; flip before the angle and radius
    let (dx, dy) = if cone.n < 0.0 {
        (p.x0 - xya.x, xya.y - cone.ys)
    } else {
        (xya.x - p.x0, cone.ys - xya.y)
    };
    let r = dx.hypot(dy);
    let theta = dx.atan2(dy); // atan2(x', y'): angle from the central meridian

    let longitude = p.lambda0 + theta / cone.n;
    let iso = -(r / cone.c.abs()).ln() / cone.n;
    Ok(
        latitude_from_isometric(crs.datum.ellipsoid.e(), iso).map(|latitude| GeodeticPoint {
            longitude,
            latitude,
            altitude: xya.altitude,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::WGS84_DATUM;
    use crate::proj::testing::proj4rs_forward;
    use crate::proj::{ProjectionKind, ProjectionParameters};
    use approx::assert_relative_eq;

    fn lcc(lon0: f64, lat0: f64, lat1: f64, lat2: f64, k0: f64, x0: f64, y0: f64) -> Crs<'static> {
        let params = ProjectionParameters::default()
            .with_origin(lon0.to_radians(), lat0.to_radians())
            .with_standard_parallels(lat1.to_radians(), lat2.to_radians())
            .with_scale_factor(k0)
            .with_false_origin(x0, y0);
        Crs::new(&WGS84_DATUM, ProjectionKind::LambertConformalConic, params)
    }

    fn lambert93() -> Crs<'static> {
        // lat1=44°, lat2=49°, lat0=46.5°, lon0=3°
        lcc(3.0, 46.5, 44.0, 49.0, 1.0, 700_000.0, 6_600_000.0)
    }

    fn assert_roundtrip(crs: &Crs, cases: &[(f64, f64)]) {
        for &(lon_deg, lat_deg) in cases {
            let p = GeodeticPoint::from_degrees(lon_deg, lat_deg, 0.0);
            let back = inverse(crs, &forward(crs, &p).unwrap()).unwrap();
            assert!(back.converged);
            assert_relative_eq!(back.value.longitude, p.longitude, epsilon = 1e-10);
            assert_relative_eq!(back.value.latitude, p.latitude, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_secant_roundtrip() {
        assert_roundtrip(
            &lambert93(),
            &[
                (3.0, 46.5),    // origin
                (2.35, 48.86),  // Paris
                (-1.55, 47.22), // Nantes
                (7.75, 48.58),  // Strasbourg
            ],
        );
    }

    #[test]
    fn test_paris_lambert93() {
        let xy = forward(&lambert93(), &GeodeticPoint::from_degrees(2.35, 48.86, 0.0)).unwrap();
        assert_relative_eq!(xy.x, 652_310.718, epsilon = 1e-3);
        assert_relative_eq!(xy.y, 6_862_414.637, epsilon = 1e-3);
    }

    #[test]
    fn test_origin_point() {
        let xy = forward(&lambert93(), &GeodeticPoint::from_degrees(3.0, 46.5, 0.0)).unwrap();
        assert_relative_eq!(xy.x, 700_000.0, epsilon = 1e-6);
        assert_relative_eq!(xy.y, 6_600_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_southern_cone() {
        let crs = lcc(-60.0, -30.0, -20.0, -40.0, 1.0, 0.0, 0.0);
        assert_roundtrip(&crs, &[(-60.0, -30.0), (-50.0, -10.0), (-75.0, -45.0), (-62.0, -55.0)]);
    }

    #[test]
    fn test_tangent_cone() {
        let north = lcc(0.0, 45.0, 45.0, 45.0, 1.0, 0.0, 0.0);
        assert_roundtrip(&north, &[(5.0, 48.0), (-10.0, 30.0), (0.0, 60.0)]);
        let xy = forward(&north, &GeodeticPoint::from_degrees(0.0, 45.0, 0.0)).unwrap();
        assert_relative_eq!(xy.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(xy.y, 0.0, epsilon = 1e-6);

        let south = lcc(145.0, -37.0, -37.0, -37.0, 0.9996, 0.0, 0.0);
        let xy = forward(&south, &GeodeticPoint::from_degrees(146.0, -36.0, 0.0)).unwrap();
        assert_relative_eq!(xy.x, 90_139.575, epsilon = 1e-3);
        assert_relative_eq!(xy.y, 110_456.104, epsilon = 1e-3);
        assert_roundtrip(&south, &[(146.0, -36.0), (140.0, -40.0)]);
    }

    #[test]
    fn test_matches_proj4rs() {
        let def = "+proj=lcc +ellps=WGS84 +lat_0=46.5 +lon_0=3 +lat_1=49 +lat_2=44 \
                   +x_0=700000 +y_0=6600000 +units=m";
        let crs = lambert93();
        for &(lon, lat) in &[(2.35, 48.86), (-4.48, 48.39), (7.26, 43.7), (3.0, 46.5)] {
            let p = GeodeticPoint::from_degrees(lon, lat, 0.0);
            let ours = forward(&crs, &p).unwrap();
            let (x, y) = proj4rs_forward(def, &p);
            assert_relative_eq!(ours.x, x, epsilon = 1e-3);
            assert_relative_eq!(ours.y, y, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_undefined_cones_rejected() {
        let p = GeodeticPoint::new(0.0, 0.5, 0.0);
        // phi1 = phi2 on the equator with phi0 = 0 has no branch
        let flat = lcc(0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        assert!(matches!(forward(&flat, &p), Err(ProjError::InvalidParameter(_))));
        // Symmetric parallels give n = 0
        let symmetric = lcc(0.0, 0.0, 30.0, -30.0, 1.0, 0.0, 0.0);
        assert!(matches!(forward(&symmetric, &p), Err(ProjError::InvalidParameter(_))));
        let bad_scale = lcc(0.0, 45.0, 45.0, 45.0, -1.0, 0.0, 0.0);
        assert!(inverse(&bad_scale, &ProjectedPoint::default()).is_err());
    }
}
