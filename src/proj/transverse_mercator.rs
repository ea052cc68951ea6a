//! Transverse Mercator projection, Redfearn series through the 8th power
//! of the transverse coordinate.
//!
//! With ψ = N/ρ (ratio of the radii of curvature), t = tan φ and
//! ω = cos φ·(λ − λ₀):
//!
//!   x = k₀·N·ω·(1 + ω²·(W₃/3! + ω²·(W₅/5! + ω²·W₇/7!))) + x₀
//!   y = k₀·(M(φ) − M(φ₀) + N·t·ω²·(1/2 + ω²·(W₄/4! + ω²·(W₆/6! + ω²·W₈/8!)))) + y₀
//!
//! The inverse series is evaluated at the footpoint latitude of
//! M(φ₀) + (y − y₀)/k₀. This is the projection underlying all UTM zones.

use crate::common::{footpoint_latitude, meridian_arc_length, meridian_radius, prime_vertical_radius};
use crate::convergence::Convergence;
use crate::error::ProjError;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{check_scale_factor, Crs};

const F3: f64 = 6.0;
const F4: f64 = 24.0;
const F5: f64 = 120.0;
const F6: f64 = 720.0;
const F7: f64 = 5_040.0;
const F8: f64 = 40_320.0;

pub fn forward(crs: &Crs, lla: &GeodeticPoint) -> Result<ProjectedPoint, ProjError> {
    let p = &crs.params;
    check_scale_factor(p.k0)?;
    let ellipsoid = crs.datum.ellipsoid;
    let phi = lla.latitude;

    let m = meridian_arc_length(ellipsoid, phi) - meridian_arc_length(ellipsoid, p.phi0);
    let v = prime_vertical_radius(ellipsoid, phi);
    let psi = v / meridian_radius(ellipsoid, phi);
    let w = phi.cos() * (lla.longitude - p.lambda0);
    let t = phi.tan();
    let w2 = w * w;

    let (psi2, t2) = (psi * psi, t * t);
    let (psi3, t4) = (psi * psi2, t2 * t2);
    let (psi4, t6) = (psi * psi3, t2 * t4);

    let w3 = psi - t2;
    let w4 = 4.0 * psi2 + psi - t2;
    let w5 = 4.0 * psi3 * (1.0 - 6.0 * t2) + psi2 * (1.0 + 8.0 * t2) - 2.0 * psi * t2 + t4;
    let w6 = 8.0 * psi4 * (11.0 - 24.0 * t2) - 28.0 * psi3 * (1.0 - 6.0 * t2)
        + psi2 * (1.0 - 32.0 * t2)
        - 2.0 * psi * t2
        + t4;
    let w7 = 61.0 - 479.0 * t2 + 179.0 * t4 - t6;
    let w8 = 1385.0 - 3111.0 * t2 + 543.0 * t4 - t6;

    let x = v * w * (1.0 + w2 * (w3 / F3 + w2 * (w5 / F5 + w2 * w7 / F7)));
    let y = m + v * t * w2 * (0.5 + w2 * (w4 / F4 + w2 * (w6 / F6 + w2 * w8 / F8)));

    Ok(ProjectedPoint {
        x: p.k0 * x + p.x0,
        y: p.k0 * y + p.y0,
        altitude: lla.altitude,
    })
}

pub fn inverse(crs: &Crs, xya: &ProjectedPoint) -> Result<Convergence<GeodeticPoint>, ProjError> {
    let p = &crs.params;
    check_scale_factor(p.k0)?;
    let ellipsoid = crs.datum.ellipsoid;

    let arc = meridian_arc_length(ellipsoid, p.phi0) + (xya.y - p.y0) / p.k0;
    let footpoint = footpoint_latitude(ellipsoid, arc);

    Ok(footpoint.map(|f| {
        let v = prime_vertical_radius(ellipsoid, f);
        let x = (xya.x - p.x0) / (p.k0 * v);
        let x2 = x * x;
        let psi = v / meridian_radius(ellipsoid, f);
        let t = f.tan();

        let (psi2, t2) = (psi * psi, t * t);
        let (psi3, t4) = (psi * psi2, t2 * t2);
        let (psi4, t6) = (psi * psi3, t2 * t4);

        let v3 = psi + 2.0 * t2;
        let v5 =
            4.0 * psi3 * (1.0 - 6.0 * t2) - psi2 * (9.0 - 68.0 * t2) - 72.0 * psi * t2 - 24.0 * t4;
        let v7 = 61.0 + 662.0 * t2 + 1320.0 * t4 + 720.0 * t6;
        let u4 = 4.0 * psi2 - 9.0 * psi * (1.0 - t2) - 12.0 * t2;
        let u6 = 8.0 * psi4 * (11.0 - 24.0 * t2) - 12.0 * psi3 * (21.0 - 71.0 * t2)
            + 15.0 * psi2 * (15.0 - 98.0 * t2 + 15.0 * t4)
            + 180.0 * psi * (5.0 * t2 - 3.0 * t4)
            + 360.0 * t4;
        let u8 = -1385.0 - 3633.0 * t2 - 4095.0 * t4 - 1575.0 * t6;

        let lambda = x / f.cos() * (1.0 - x2 * (v3 / F3 + x2 * (v5 / F5 + x2 * v7 / F7)));
        let phi = f - x2 * psi * t * (0.5 + x2 * (u4 / F4 + x2 * (u6 / F6 + x2 * u8 / F8)));

        GeodeticPoint {
            longitude: lambda + p.lambda0,
            latitude: phi,
            altitude: xya.altitude,
        }
    }))
}
