//! Ellipsoidal Mercator projection with a standard parallel.
//!
//!   ak₀ = cos|φ₁|·N(φ₁)
//!   forward: x = k₀·ak₀·(λ − λ₀) + x₀,  y = k₀·ak₀·(ψ(φ) − ψ(φ₀)) + y₀
//!   inverse: λ closed form, φ from the isometric latitude (iterative).

use crate::common::{isometric_latitude, latitude_from_isometric, parallel_radius};
use crate::convergence::Convergence;
use crate::error::ProjError;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{check_not_polar, check_scale_factor, Crs};

/// Radius of the scaled standard parallel, k₀·cos|φ₁|·N(φ₁).
fn scaled_radius(crs: &Crs) -> Result<f64, ProjError> {
    let p = &crs.params;
    check_scale_factor(p.k0)?;
    check_not_polar("phi1", p.phi1)?;
    check_not_polar("phi0", p.phi0)?;
    Ok(p.k0 * parallel_radius(crs.datum.ellipsoid, p.phi1.abs()))
}

pub fn forward(crs: &Crs, lla: &GeodeticPoint) -> Result<ProjectedPoint, ProjError> {
    let p = &crs.params;
    let radius = scaled_radius(crs)?;
    let e = crs.datum.ellipsoid.e();
    Ok(ProjectedPoint {
        x: p.x0 + radius * (lla.longitude - p.lambda0),
        y: radius * (isometric_latitude(e, lla.latitude) - isometric_latitude(e, p.phi0)) + p.y0,
        altitude: lla.altitude,
    })
}

pub fn inverse(crs: &Crs, xya: &ProjectedPoint) -> Result<Convergence<GeodeticPoint>, ProjError> {
    let p = &crs.params;
    let radius = scaled_radius(crs)?;
    let e = crs.datum.ellipsoid.e();
    let iso = (xya.y - p.y0) / radius + isometric_latitude(e, p.phi0);
    let longitude = (xya.x - p.x0) / radius + p.lambda0;
    Ok(latitude_from_isometric(e, iso).map(|latitude| GeodeticPoint {
        longitude,
        latitude,
        altitude: xya.altitude,
    }))
}
