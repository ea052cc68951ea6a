//! Miller cylindrical projection (spherical, non-conformal).
//!
//!   forward: x = a·(λ − λ₀) + x₀,  y = 5a/4 · ln(tan(π/4 + 2φ/5)) + y₀
//!   inverse: φ = 5/2 · (atan(exp(4(y − y₀)/5a)) − π/4)

use std::f64::consts::FRAC_PI_4;

use crate::convergence::Convergence;
use crate::error::ProjError;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::Crs;

pub fn forward(crs: &Crs, lla: &GeodeticPoint) -> Result<ProjectedPoint, ProjError> {
    let p = &crs.params;
    let a = crs.datum.ellipsoid.a();
    Ok(ProjectedPoint {
        x: a * (lla.longitude - p.lambda0) + p.x0,
        y: a * 1.25 * (FRAC_PI_4 + 0.4 * lla.latitude).tan().ln() + p.y0,
        altitude: lla.altitude,
    })
}

pub fn inverse(crs: &Crs, xya: &ProjectedPoint) -> Result<Convergence<GeodeticPoint>, ProjError> {
    let p = &crs.params;
    let a = crs.datum.ellipsoid.a();
    Ok(Convergence::exact(GeodeticPoint {
        longitude: (xya.x - p.x0) / a + p.lambda0,
        latitude: 2.5 * ((0.8 * (xya.y - p.y0) / a).exp().atan() - FRAC_PI_4),
        altitude: xya.altitude,
    }))
}
