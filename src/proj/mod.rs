pub mod crs;
pub mod equirectangular;
pub mod lambert_conformal;
pub mod mercator;
pub mod miller;
pub mod oblique_mercator;
pub mod pipeline;
pub mod transverse_mercator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::convergence::Convergence;
use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::point::{GeodeticPoint, ProjectedPoint};

pub use crs::{Crs, ProjectionParameters, Unit};
pub use pipeline::Pipeline;

/// Trait for map projections supporting forward and inverse transforms.
///
/// Planar coordinates are expressed in the implementor's unit.
pub trait Projection: Send + Sync {
    /// Forward: geodetic (radians) -> planar
    fn forward(&self, point: &GeodeticPoint) -> Result<ProjectedPoint, ProjError>;

    /// Inverse: planar -> geodetic (radians)
    fn inverse(&self, point: &ProjectedPoint) -> Result<GeodeticPoint, ProjError>;

    /// Batch forward transform (default: loop).
    fn forward_batch(&self, points: &[GeodeticPoint]) -> Result<Vec<ProjectedPoint>, ProjError> {
        points.iter().map(|p| self.forward(p)).collect()
    }

    /// Batch inverse transform.
    fn inverse_batch(&self, points: &[ProjectedPoint]) -> Result<Vec<GeodeticPoint>, ProjError> {
        points.iter().map(|p| self.inverse(p)).collect()
    }

    fn ellipsoid(&self) -> &Ellipsoid;
}

/// The projection families a [`Crs`] can be built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProjectionKind {
    Equirectangular,
    Mercator,
    Miller,
    LambertConformalConic,
    TransverseMercator,
    ObliqueMercator,
}

impl ProjectionKind {
    pub const ALL: [ProjectionKind; 6] = [
        ProjectionKind::Equirectangular,
        ProjectionKind::Mercator,
        ProjectionKind::Miller,
        ProjectionKind::LambertConformalConic,
        ProjectionKind::TransverseMercator,
        ProjectionKind::ObliqueMercator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProjectionKind::Equirectangular => "equirectangular",
            ProjectionKind::Mercator => "mercator",
            ProjectionKind::Miller => "miller",
            ProjectionKind::LambertConformalConic => "lambert_conformal_conic",
            ProjectionKind::TransverseMercator => "transverse_mercator",
            ProjectionKind::ObliqueMercator => "oblique_mercator",
        }
    }

    /// Forward projection in metres.
    pub fn forward(&self, crs: &Crs, point: &GeodeticPoint) -> Result<ProjectedPoint, ProjError> {
        match self {
            ProjectionKind::Equirectangular => equirectangular::forward(crs, point),
            ProjectionKind::Mercator => mercator::forward(crs, point),
            ProjectionKind::Miller => miller::forward(crs, point),
            ProjectionKind::LambertConformalConic => lambert_conformal::forward(crs, point),
            ProjectionKind::TransverseMercator => transverse_mercator::forward(crs, point),
            ProjectionKind::ObliqueMercator => oblique_mercator::forward(crs, point),
        }
    }

    /// Inverse projection from metres.
    pub fn inverse(
        &self,
        crs: &Crs,
        point: &ProjectedPoint,
    ) -> Result<Convergence<GeodeticPoint>, ProjError> {
        match self {
            ProjectionKind::Equirectangular => equirectangular::inverse(crs, point),
            ProjectionKind::Mercator => mercator::inverse(crs, point),
            ProjectionKind::Miller => miller::inverse(crs, point),
            ProjectionKind::LambertConformalConic => lambert_conformal::inverse(crs, point),
            ProjectionKind::TransverseMercator => transverse_mercator::inverse(crs, point),
            ProjectionKind::ObliqueMercator => oblique_mercator::inverse(crs, point),
        }
    }
}

impl std::fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reject scale factors that would collapse or mirror the plane.
pub(crate) fn check_scale_factor(k0: f64) -> Result<(), ProjError> {
    if k0.is_finite() && k0 > 0.0 {
        Ok(())
    } else {
        Err(ProjError::InvalidParameter(format!(
            "scale factor must be positive, got {k0}"
        )))
    }
}

/// Reject a latitude whose cosine is used as a divisor.
pub(crate) fn check_not_polar(name: &str, phi: f64) -> Result<(), ProjError> {
    if phi.is_finite() && phi.abs() < std::f64::consts::FRAC_PI_2 {
        Ok(())
    } else {
        Err(ProjError::InvalidParameter(format!(
            "{name} must lie strictly between the poles, got {phi}"
        )))
    }
}
