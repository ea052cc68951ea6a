//! Equirectangular (plate carrée) projection.
//!
//!   forward: x = a·cos(φ₁)·(λ − λ₀) + x₀,  y = a·(φ − φ₀) + y₀
//!   inverse: closed form.

use crate::convergence::Convergence;
use crate::error::ProjError;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{check_not_polar, Crs};

pub fn forward(crs: &Crs, lla: &GeodeticPoint) -> Result<ProjectedPoint, ProjError> {
    let p = &crs.params;
    check_not_polar("phi1", p.phi1)?;
    let a = crs.datum.ellipsoid.a();
    Ok(ProjectedPoint {
        x: p.phi1.cos() * (lla.longitude - p.lambda0) * a + p.x0,
        y: (lla.latitude - p.phi0) * a + p.y0,
        altitude: lla.altitude,
    })
}

pub fn inverse(crs: &Crs, xya: &ProjectedPoint) -> Result<Convergence<GeodeticPoint>, ProjError> {
    let p = &crs.params;
    check_not_polar("phi1", p.phi1)?;
    let a = crs.datum.ellipsoid.a();
    Ok(Convergence::exact(GeodeticPoint {
        longitude: (xya.x - p.x0) / (p.phi1.cos() * a) + p.lambda0,
        latitude: (xya.y - p.y0) / a + p.phi0,
        altitude: xya.altitude,
    }))
}
